//! Media classification and file-name hygiene shared by the upload client
//! and the detection service.
use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::shared::constants::{IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("Please upload only image or video files")]
    Unsupported,
    #[error("Files must be less than {limit}")]
    TooLarge { limit: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify by extension (case-insensitive). `None` for anything that is
    /// neither a known image nor a known video format.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    /// Classify by content type, accepting any `image/*` or `video/*`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            Some(MediaKind::Image)
        } else if mime.starts_with("video/") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    /// Server-side rule: anything with a video extension goes through the
    /// frame sampler, everything else is treated as a still image.
    pub fn for_upload(file_name: &str) -> Self {
        match MediaKind::from_path(Path::new(file_name)) {
            Some(MediaKind::Video) => MediaKind::Video,
            _ => MediaKind::Image,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// Content type sent with an uploaded file.
pub fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "bmp" => "image/bmp",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        "mp4" | "m4v" => "video/mp4",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",
        _ => "application/octet-stream",
    }
}

/// Client-side rule: every character outside `[A-Za-z0-9.-]` becomes `_`.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Server-side rule for names written to disk.
///
/// Only the last path component survives, whitespace collapses to `_`,
/// characters outside `[A-Za-z0-9_.-]` are dropped, and leading or trailing
/// dots and underscores are stripped. Never returns an empty string.
pub fn secure_filename(name: &str) -> String {
    let last = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let joined = last.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        "upload".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Human-readable upload limit: whole megabytes or kilobytes when exact,
/// plain bytes otherwise.
pub fn format_limit(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else if bytes >= KB && bytes % KB == 0 {
        format!("{}KB", bytes / KB)
    } else {
        format!("{bytes} bytes")
    }
}

/// Reject payloads above `limit` bytes.
pub fn check_size(len: u64, limit: u64) -> Result<(), MediaError> {
    if len > limit {
        Err(MediaError::TooLarge {
            limit: format_limit(limit),
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("face.jpg", Some(MediaKind::Image))]
    #[case("FACE.JPEG", Some(MediaKind::Image))]
    #[case("shot.png", Some(MediaKind::Image))]
    #[case("clip.mp4", Some(MediaKind::Video))]
    #[case("clip.MOV", Some(MediaKind::Video))]
    #[case("clip.avi", Some(MediaKind::Video))]
    #[case("notes.txt", None)]
    #[case("no_extension", None)]
    fn test_from_path(#[case] name: &str, #[case] expected: Option<MediaKind>) {
        assert_eq!(MediaKind::from_path(Path::new(name)), expected);
    }

    #[rstest]
    #[case("image/png", Some(MediaKind::Image))]
    #[case("video/mp4", Some(MediaKind::Video))]
    #[case("Video/QuickTime", Some(MediaKind::Video))]
    #[case("application/pdf", None)]
    #[case("", None)]
    fn test_from_mime(#[case] mime: &str, #[case] expected: Option<MediaKind>) {
        assert_eq!(MediaKind::from_mime(mime), expected);
    }

    #[test]
    fn test_for_upload_defaults_to_image() {
        assert_eq!(MediaKind::for_upload("a.mov"), MediaKind::Video);
        assert_eq!(MediaKind::for_upload("a.png"), MediaKind::Image);
        assert_eq!(MediaKind::for_upload("mystery.bin"), MediaKind::Image);
    }

    #[test]
    fn test_mime_type_known_and_unknown() {
        assert_eq!(mime_type(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(mime_type(Path::new("a.mov")), "video/quicktime");
        assert_eq!(mime_type(Path::new("a")), "application/octet-stream");
    }

    #[rstest]
    #[case("my photo (1).jpg", "my_photo__1_.jpg")]
    #[case("clip-final.mp4", "clip-final.mp4")]
    #[case("ünïcode.png", "_n_code.png")]
    fn test_sanitize_filename(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_filename(input), expected);
    }

    #[rstest]
    #[case("My cool movie.mov", "My_cool_movie.mov")]
    #[case("../../../etc/passwd", "passwd")]
    #[case("C:\\Users\\me\\face.png", "face.png")]
    #[case("..hidden.jpg", "hidden.jpg")]
    #[case("$$$.jpg", "jpg")]
    #[case("...", "upload")]
    #[case("", "upload")]
    fn test_secure_filename(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(secure_filename(input), expected);
    }

    #[test]
    fn test_check_size() {
        assert!(check_size(10, 10).is_ok());
        assert_eq!(
            check_size(10 * 1024 * 1024 + 1, 10 * 1024 * 1024),
            Err(MediaError::TooLarge {
                limit: "10MB".to_string()
            })
        );
        assert_eq!(
            check_size(2048, 1024).unwrap_err().to_string(),
            "Files must be less than 1KB"
        );
    }

    #[rstest]
    #[case(10 * 1024 * 1024, "10MB")]
    #[case(1024 * 1024, "1MB")]
    #[case(512 * 1024, "512KB")]
    #[case(1536 * 1024, "1536KB")]
    #[case(1000, "1000 bytes")]
    #[case(0, "0 bytes")]
    fn test_format_limit(#[case] bytes: u64, #[case] expected: &str) {
        assert_eq!(format_limit(bytes), expected);
    }
}
