use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}

impl VideoMetadata {
    /// Images are represented as single-frame videos with `fps == 0`.
    pub fn is_still(&self) -> bool {
        self.total_frames == 1 && self.fps == 0.0
    }
}
