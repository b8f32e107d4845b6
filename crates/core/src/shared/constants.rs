pub const EMBEDDING_MODEL_NAME: &str = "facenet512.onnx";

/// Environment variable that may point at a download location for the
/// embedding model when it is not present in any cache.
pub const EMBEDDING_MODEL_URL_ENV: &str = "DEEPSHIELD_MODEL_URL";

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8877";
pub const DEFAULT_PORT: u16 = 8877;

/// Frames sampled from each video before embedding.
pub const DEFAULT_NUM_FRAMES: usize = 32;

/// Mean cosine similarity below which a pair is reported as a likely deepfake.
pub const DEEPFAKE_THRESHOLD: f64 = 0.7;

pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "webp", "tiff", "tif"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm", "m4v"];

/// Multipart field names expected by `POST /detect`.
pub const REAL_MEDIA_FIELD: &str = "realMedia";
pub const FAKE_MEDIA_FIELD: &str = "fakeMedia";
