use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

pub type ReadError = Box<dyn std::error::Error + Send + Sync>;

/// Reads frames from a video or still-image source.
///
/// Implementations handle codec and container details; callers only see
/// [`Frame`] and [`VideoMetadata`].
pub trait VideoReader: Send {
    /// Opens a video or image file and returns its metadata.
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, ReadError>;

    /// Returns an iterator over frames in decode order.
    fn frames(&mut self) -> Box<dyn Iterator<Item = Result<Frame, ReadError>> + '_>;

    /// Releases any resources held by the reader.
    fn close(&mut self);
}
