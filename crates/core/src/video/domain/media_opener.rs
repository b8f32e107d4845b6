use crate::shared::media::MediaKind;
use crate::video::domain::video_reader::VideoReader;

/// Chooses a [`VideoReader`] for a kind of media.
///
/// Lets the comparison pipeline stay independent of the decoding backend
/// and lets tests substitute in-memory readers.
pub trait MediaOpener: Send + Sync {
    fn reader_for(&self, kind: MediaKind) -> Box<dyn VideoReader>;
}
