use crate::shared::media::MediaKind;
use crate::video::domain::media_opener::MediaOpener;
use crate::video::domain::video_reader::VideoReader;
use crate::video::infrastructure::ffmpeg_reader::FfmpegReader;
use crate::video::infrastructure::image_file_reader::ImageFileReader;

/// Opens stills with [`ImageFileReader`] and videos with [`FfmpegReader`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FfmpegMediaOpener;

impl MediaOpener for FfmpegMediaOpener {
    fn reader_for(&self, kind: MediaKind) -> Box<dyn VideoReader> {
        match kind {
            MediaKind::Image => Box::new(ImageFileReader::new()),
            MediaKind::Video => Box::new(FfmpegReader::new()),
        }
    }
}
