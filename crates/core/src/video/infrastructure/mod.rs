mod decode;
pub mod ffmpeg_media_opener;
pub mod ffmpeg_reader;
pub mod image_file_reader;
