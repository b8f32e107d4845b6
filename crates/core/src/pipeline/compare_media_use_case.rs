use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use crate::detection::domain::face_embedder::FaceEmbedder;
use crate::detection::domain::similarity::{FeatureBatch, SimilarityError, SimilarityReport};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::frame::Frame;
use crate::shared::media::MediaKind;
use crate::video::domain::frame_sampler::{sample_indices, sampled_frames, SamplingError};
use crate::video::domain::media_opener::MediaOpener;
use crate::video::domain::video_reader::ReadError;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("could not read {path}: {source}")]
    Media {
        path: PathBuf,
        #[source]
        source: ReadError,
    },
    #[error(transparent)]
    Sampling(#[from] SamplingError),
    #[error("embedding failed: {0}")]
    Embedding(#[source] ReadError),
    #[error("no frames could be decoded from {0}")]
    NoFrames(PathBuf),
    #[error(transparent)]
    Similarity(#[from] SimilarityError),
}

impl CompareError {
    /// True when the inputs themselves cannot be compared, as opposed to
    /// an internal failure.
    pub fn is_incompatible_input(&self) -> bool {
        matches!(
            self,
            CompareError::Sampling(_)
                | CompareError::Similarity(SimilarityError::ShapeMismatch { .. })
        )
    }
}

/// Media comparison pipeline: decode → sample → embed → score.
///
/// Videos contribute `num_frames` evenly spaced frames, stills contribute
/// their single frame. The two feature batches must end up the same shape.
pub struct CompareMediaUseCase {
    opener: Box<dyn MediaOpener>,
    embedder: Arc<dyn FaceEmbedder>,
    num_frames: usize,
}

impl CompareMediaUseCase {
    pub fn new(
        opener: Box<dyn MediaOpener>,
        embedder: Arc<dyn FaceEmbedder>,
        num_frames: usize,
    ) -> Self {
        Self {
            opener,
            embedder,
            num_frames,
        }
    }

    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    /// Compare a real sample against a reference sample.
    pub fn execute(
        &self,
        real: &Path,
        fake: &Path,
        logger: &mut dyn PipelineLogger,
    ) -> Result<SimilarityReport, CompareError> {
        let real_features = self.extract_features(real, "real", logger)?;
        let fake_features = self.extract_features(fake, "fake", logger)?;

        let report = SimilarityReport::compute(&real_features, &fake_features)?;
        logger.info(&format!(
            "cosine {:.4}, euclidean {:.4}, likely deepfake: {}",
            report.cosine_similarity, report.euclidean_similarity, report.is_likely_deepfake
        ));
        logger.summary();
        Ok(report)
    }

    /// Decode, sample and embed one file.
    pub fn extract_features(
        &self,
        path: &Path,
        label: &str,
        logger: &mut dyn PipelineLogger,
    ) -> Result<FeatureBatch, CompareError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let kind = MediaKind::for_upload(&file_name);

        let start = Instant::now();
        let frames = self.decode(path, kind)?;
        logger.timing("decode", start.elapsed().as_secs_f64() * 1000.0);
        if frames.is_empty() {
            return Err(CompareError::NoFrames(path.to_path_buf()));
        }
        logger.info(&format!(
            "{label}: {} {} frame(s) from {}",
            frames.len(),
            kind,
            path.display()
        ));

        let total = frames.len();
        let mut rows = Vec::with_capacity(total);
        for (i, frame) in frames.iter().enumerate() {
            let start = Instant::now();
            let embedding = self.embedder.embed(frame).map_err(CompareError::Embedding)?;
            logger.timing("embed", start.elapsed().as_secs_f64() * 1000.0);
            logger.progress(label, i + 1, total);
            rows.push(embedding);
        }

        Ok(FeatureBatch::from_rows(rows)?)
    }

    fn decode(&self, path: &Path, kind: MediaKind) -> Result<Vec<Frame>, CompareError> {
        let media_err = |source| CompareError::Media {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = self.opener.reader_for(kind);
        let metadata = reader.open(path).map_err(media_err)?;

        let frames = match kind {
            MediaKind::Video => {
                let indices = sample_indices(metadata.total_frames, self.num_frames)?;
                log::debug!("Sampling frames {indices:?} from {}", path.display());
                sampled_frames(reader.frames(), &indices)
            }
            MediaKind::Image => match reader.frames().next() {
                Some(frame) => vec![frame.map_err(media_err)?],
                None => Vec::new(),
            },
        };
        reader.close();
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::pipeline_logger::{LogPipelineLogger, NullPipelineLogger};
    use crate::shared::video_metadata::VideoMetadata;
    use crate::video::domain::video_reader::VideoReader;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    // --- Stubs ---

    /// Serves in-memory frames keyed by file name. Each frame is 1x1 and its
    /// red channel encodes the "identity" seen by `StubEmbedder`.
    #[derive(Clone, Default)]
    struct StubOpener {
        media: HashMap<String, Vec<u8>>,
    }

    impl StubOpener {
        fn with(mut self, name: &str, reds: &[u8]) -> Self {
            self.media.insert(name.to_string(), reds.to_vec());
            self
        }
    }

    impl MediaOpener for StubOpener {
        fn reader_for(&self, _kind: MediaKind) -> Box<dyn VideoReader> {
            Box::new(StubReader {
                media: self.media.clone(),
                frames: Vec::new(),
            })
        }
    }

    struct StubReader {
        media: HashMap<String, Vec<u8>>,
        frames: Vec<Frame>,
    }

    impl VideoReader for StubReader {
        fn open(&mut self, path: &Path) -> Result<VideoMetadata, ReadError> {
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            let reds = self.media.get(&name).ok_or("no such file")?;
            self.frames = reds
                .iter()
                .enumerate()
                .map(|(i, &r)| Frame::new(vec![r, 0, 0], 1, 1, i))
                .collect();
            Ok(VideoMetadata {
                width: 1,
                height: 1,
                fps: if reds.len() == 1 { 0.0 } else { 25.0 },
                total_frames: reds.len(),
                codec: String::new(),
                source_path: Some(path.to_path_buf()),
            })
        }

        fn frames(&mut self) -> Box<dyn Iterator<Item = Result<Frame, ReadError>> + '_> {
            Box::new(std::mem::take(&mut self.frames).into_iter().map(Ok))
        }

        fn close(&mut self) {
            self.frames.clear();
        }
    }

    /// Maps red value `r` to the unit vector at angle `r` degrees.
    struct StubEmbedder;

    impl FaceEmbedder for StubEmbedder {
        fn embed(&self, frame: &Frame) -> Result<Vec<f32>, ReadError> {
            let r = frame.pixel(0, 0)[0];
            if r == 255 {
                return Err("model exploded".into());
            }
            let angle = (r as f32).to_radians();
            Ok(vec![angle.cos(), angle.sin()])
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    fn use_case(opener: StubOpener, num_frames: usize) -> CompareMediaUseCase {
        CompareMediaUseCase::new(Box::new(opener), Arc::new(StubEmbedder), num_frames)
    }

    // --- Tests ---

    #[test]
    fn test_identical_images_are_authentic() {
        let opener = StubOpener::default()
            .with("a.jpg", &[10])
            .with("b.png", &[10]);
        let report = use_case(opener, 32)
            .execute(Path::new("a.jpg"), Path::new("b.png"), &mut NullPipelineLogger)
            .unwrap();
        assert_relative_eq!(report.cosine_similarity, 1.0, epsilon = 1e-6);
        assert_relative_eq!(report.euclidean_similarity, 0.0, epsilon = 1e-6);
        assert!(!report.is_likely_deepfake);
    }

    #[test]
    fn test_orthogonal_images_are_deepfake() {
        let opener = StubOpener::default()
            .with("a.jpg", &[0])
            .with("b.jpg", &[90]);
        let report = use_case(opener, 32)
            .execute(Path::new("a.jpg"), Path::new("b.jpg"), &mut NullPipelineLogger)
            .unwrap();
        assert_relative_eq!(report.cosine_similarity, 0.0, epsilon = 1e-6);
        assert!(report.is_likely_deepfake);
    }

    #[test]
    fn test_videos_sample_requested_frames() {
        // Frames 0..10 with identities 0..90 in steps of 10; sampling 4 picks
        // indices 0, 3, 6, 9.
        let reds: Vec<u8> = (0..10).map(|i| i * 10).collect();
        let opener = StubOpener::default()
            .with("a.mp4", &reds)
            .with("b.mov", &reds);
        let uc = use_case(opener, 4);

        let batch = uc
            .extract_features(Path::new("a.mp4"), "real", &mut NullPipelineLogger)
            .unwrap();
        assert_eq!(batch.shape(), (4, 2));
        let expected = 30.0_f32.to_radians();
        assert_relative_eq!(batch.row(1)[0], expected.cos(), epsilon = 1e-6);

        let report = uc
            .execute(Path::new("a.mp4"), Path::new("b.mov"), &mut NullPipelineLogger)
            .unwrap();
        assert_relative_eq!(report.cosine_similarity, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_short_video_is_sampling_error() {
        let opener = StubOpener::default()
            .with("a.mp4", &[1, 2, 3])
            .with("b.mp4", &[1, 2, 3]);
        let err = use_case(opener, 32)
            .execute(Path::new("a.mp4"), Path::new("b.mp4"), &mut NullPipelineLogger)
            .unwrap_err();
        assert!(matches!(
            err,
            CompareError::Sampling(SamplingError::NotEnoughFrames {
                total: 3,
                requested: 32
            })
        ));
        assert!(err.is_incompatible_input());
    }

    #[test]
    fn test_video_against_image_is_shape_mismatch() {
        let opener = StubOpener::default()
            .with("a.mp4", &[1, 2, 3, 4])
            .with("b.jpg", &[1]);
        let err = use_case(opener, 2)
            .execute(Path::new("a.mp4"), Path::new("b.jpg"), &mut NullPipelineLogger)
            .unwrap_err();
        assert!(matches!(
            err,
            CompareError::Similarity(SimilarityError::ShapeMismatch { .. })
        ));
        assert!(err.is_incompatible_input());
    }

    #[test]
    fn test_unreadable_media_reports_path() {
        let opener = StubOpener::default().with("b.jpg", &[1]);
        let err = use_case(opener, 2)
            .execute(Path::new("missing.jpg"), Path::new("b.jpg"), &mut NullPipelineLogger)
            .unwrap_err();
        assert!(matches!(err, CompareError::Media { .. }));
        assert!(err.to_string().contains("missing.jpg"));
        assert!(!err.is_incompatible_input());
    }

    #[test]
    fn test_embedding_failure_propagates() {
        let opener = StubOpener::default()
            .with("a.jpg", &[255])
            .with("b.jpg", &[1]);
        let err = use_case(opener, 2)
            .execute(Path::new("a.jpg"), Path::new("b.jpg"), &mut NullPipelineLogger)
            .unwrap_err();
        assert!(matches!(err, CompareError::Embedding(_)));
        assert!(err.to_string().contains("model exploded"));
    }

    #[test]
    fn test_empty_image_is_no_frames() {
        let opener = StubOpener::default()
            .with("a.jpg", &[])
            .with("b.jpg", &[1]);
        let err = use_case(opener, 2)
            .execute(Path::new("a.jpg"), Path::new("b.jpg"), &mut NullPipelineLogger)
            .unwrap_err();
        assert!(matches!(err, CompareError::NoFrames(_)));
    }

    #[test]
    fn test_logger_records_stage_timings() {
        let opener = StubOpener::default()
            .with("a.jpg", &[5])
            .with("b.jpg", &[5]);
        let mut logger = LogPipelineLogger::new();
        use_case(opener, 2)
            .execute(Path::new("a.jpg"), Path::new("b.jpg"), &mut logger)
            .unwrap();
        assert_eq!(logger.timings_for("decode").unwrap().len(), 2);
        assert_eq!(logger.timings_for("embed").unwrap().len(), 2);
    }
}
