pub mod constants;
pub mod frame;
pub mod media;
pub mod video_metadata;
