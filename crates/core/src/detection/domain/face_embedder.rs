use crate::shared::frame::Frame;

/// Domain interface for turning a frame into a face embedding.
///
/// Implementations must be shareable across threads: the detection
/// service runs one comparison per request on the blocking pool.
pub trait FaceEmbedder: Send + Sync {
    fn embed(&self, frame: &Frame) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>>;

    /// Length of every vector returned by [`FaceEmbedder::embed`].
    fn dimension(&self) -> usize;
}
