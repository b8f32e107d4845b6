pub mod frame_sampler;
pub mod media_opener;
pub mod video_reader;
