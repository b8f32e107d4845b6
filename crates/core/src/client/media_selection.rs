//! State behind the two media boxes on the detect screen.
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::client::detect_response::DetectResult;
use crate::shared::media::{sanitize_filename, MediaError, MediaKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Please upload both real and fake media files.")]
    MissingMedia,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaSlot {
    Real,
    Fake,
}

impl MediaSlot {
    pub const ALL: [MediaSlot; 2] = [MediaSlot::Real, MediaSlot::Fake];

    pub fn title(self) -> &'static str {
        match self {
            MediaSlot::Real => "Real video/picture",
            MediaSlot::Fake => "Deep fake video/picture",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Image(PathBuf),
    Video(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedMedia {
    pub path: PathBuf,
    /// Name sent in the multipart upload.
    pub upload_name: String,
    pub kind: MediaKind,
    pub preview: Preview,
}

impl SelectedMedia {
    pub fn from_path(path: &Path) -> Result<Self, MediaError> {
        let kind = MediaKind::from_path(path).ok_or(MediaError::Unsupported)?;
        let original = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let preview = match kind {
            MediaKind::Image => Preview::Image(path.to_path_buf()),
            MediaKind::Video => Preview::Video(path.to_path_buf()),
        };
        Ok(Self {
            path: path.to_path_buf(),
            upload_name: sanitize_filename(&original),
            kind,
            preview,
        })
    }

    /// Display name for the placeholder shown instead of a video preview.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.upload_name.clone())
    }
}

/// Two slots, one error banner, one result card.
#[derive(Debug, Clone, Default)]
pub struct MediaSelection {
    real: Option<SelectedMedia>,
    fake: Option<SelectedMedia>,
    error: Option<String>,
    result: Option<DetectResult>,
    show_result: bool,
}

impl MediaSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `path` in `slot`. A rejected file leaves the slot as it was and
    /// raises the error banner.
    pub fn select(&mut self, slot: MediaSlot, path: &Path) -> Result<(), MediaError> {
        match SelectedMedia::from_path(path) {
            Ok(media) => {
                log::debug!("{:?} slot <- {} ({})", slot, path.display(), media.kind);
                *self.slot_mut(slot) = Some(media);
                self.error = None;
                self.show_result = false;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn get(&self, slot: MediaSlot) -> Option<&SelectedMedia> {
        match slot {
            MediaSlot::Real => self.real.as_ref(),
            MediaSlot::Fake => self.fake.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: MediaSlot) -> &mut Option<SelectedMedia> {
        match slot {
            MediaSlot::Real => &mut self.real,
            MediaSlot::Fake => &mut self.fake,
        }
    }

    /// Both files, or the banner message for a missing one.
    pub fn ready(&self) -> Result<(&SelectedMedia, &SelectedMedia), SelectionError> {
        match (&self.real, &self.fake) {
            (Some(real), Some(fake)) => Ok((real, fake)),
            _ => Err(SelectionError::MissingMedia),
        }
    }

    pub fn can_submit(&self, loading: bool) -> bool {
        !loading && self.real.is_some() && self.fake.is_some()
    }

    /// Clear the banner and hide the previous result before a request.
    pub fn begin_request(&mut self) {
        self.error = None;
        self.show_result = false;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_result(&mut self, result: DetectResult) {
        self.result = Some(result);
        self.show_result = true;
    }

    /// The result card, if it is currently shown.
    pub fn visible_result(&self) -> Option<&DetectResult> {
        if self.show_result {
            self.result.as_ref()
        } else {
            None
        }
    }

    pub fn close_result(&mut self) {
        self.show_result = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::detect_response::DetectResponse;
    use rstest::rstest;

    fn result(score: f64) -> DetectResult {
        DetectResult::from_response(DetectResponse {
            cosine_similarity: Some(Some(score)),
            is_likely_deepfake: Some(score < 0.7),
            ..Default::default()
        })
        .unwrap()
    }

    #[rstest]
    #[case("face.jpg", MediaKind::Image)]
    #[case("clip.MP4", MediaKind::Video)]
    #[case("shot.webp", MediaKind::Image)]
    fn test_select_accepts_media(#[case] name: &str, #[case] kind: MediaKind) {
        let mut sel = MediaSelection::new();
        sel.select(MediaSlot::Real, Path::new(name)).unwrap();
        assert_eq!(sel.get(MediaSlot::Real).unwrap().kind, kind);
        assert!(sel.get(MediaSlot::Fake).is_none());
    }

    #[test]
    fn test_select_rejects_other_files_and_keeps_slot() {
        let mut sel = MediaSelection::new();
        sel.select(MediaSlot::Fake, Path::new("a.png")).unwrap();
        let err = sel.select(MediaSlot::Fake, Path::new("notes.txt")).unwrap_err();
        assert_eq!(err, MediaError::Unsupported);
        assert_eq!(sel.error(), Some("Please upload only image or video files"));
        assert_eq!(sel.get(MediaSlot::Fake).unwrap().path, PathBuf::from("a.png"));
    }

    #[test]
    fn test_select_sanitizes_upload_name() {
        let media = SelectedMedia::from_path(Path::new("/tmp/my face (1).jpg")).unwrap();
        assert_eq!(media.upload_name, "my_face__1_.jpg");
        assert_eq!(media.display_name(), "my face (1).jpg");
        assert_eq!(
            media.preview,
            Preview::Image(PathBuf::from("/tmp/my face (1).jpg"))
        );
    }

    #[test]
    fn test_select_clears_error_and_hides_result() {
        let mut sel = MediaSelection::new();
        sel.set_error("boom");
        sel.set_result(result(0.9));
        assert!(sel.visible_result().is_some());

        sel.select(MediaSlot::Real, Path::new("a.mov")).unwrap();
        assert!(sel.error().is_none());
        assert!(sel.visible_result().is_none());
    }

    #[test]
    fn test_ready_requires_both() {
        let mut sel = MediaSelection::new();
        assert_eq!(sel.ready().unwrap_err(), SelectionError::MissingMedia);
        assert_eq!(
            SelectionError::MissingMedia.to_string(),
            "Please upload both real and fake media files."
        );

        sel.select(MediaSlot::Real, Path::new("a.jpg")).unwrap();
        assert!(sel.ready().is_err());
        sel.select(MediaSlot::Fake, Path::new("b.jpg")).unwrap();
        let (real, fake) = sel.ready().unwrap();
        assert_eq!(real.path, PathBuf::from("a.jpg"));
        assert_eq!(fake.path, PathBuf::from("b.jpg"));
    }

    #[rstest]
    #[case(false, false, false, false)]
    #[case(true, false, false, false)]
    #[case(true, true, false, true)]
    #[case(true, true, true, false)]
    fn test_can_submit(
        #[case] real: bool,
        #[case] fake: bool,
        #[case] loading: bool,
        #[case] expected: bool,
    ) {
        let mut sel = MediaSelection::new();
        if real {
            sel.select(MediaSlot::Real, Path::new("a.jpg")).unwrap();
        }
        if fake {
            sel.select(MediaSlot::Fake, Path::new("b.mp4")).unwrap();
        }
        assert_eq!(sel.can_submit(loading), expected);
    }

    #[test]
    fn test_close_result_keeps_last_result() {
        let mut sel = MediaSelection::new();
        sel.set_result(result(0.5));
        sel.close_result();
        assert!(sel.visible_result().is_none());
        sel.begin_request();
        assert!(sel.visible_result().is_none());
    }

    #[test]
    fn test_slot_titles() {
        assert_eq!(MediaSlot::Real.title(), "Real video/picture");
        assert_eq!(MediaSlot::Fake.title(), "Deep fake video/picture");
    }
}
