use std::{error::Error, sync::Arc};

use deepshield_core::{
    detection::infrastructure::{
        model_resolver::{self, ModelSource},
        onnx_facenet_embedder::OnnxFacenetEmbedder,
    },
    pipeline::compare_media_use_case::CompareMediaUseCase,
    shared::constants::EMBEDDING_MODEL_NAME,
    video::infrastructure::ffmpeg_media_opener::FfmpegMediaOpener,
};
use tracing::info;

use super::config::Config;

pub struct State {
    pub config: Config,
    pub comparer: Arc<CompareMediaUseCase>,
}

impl State {
    pub fn new(config: Config, comparer: CompareMediaUseCase) -> Arc<Self> {
        Arc::new(Self {
            config,
            comparer: Arc::new(comparer),
        })
    }

    /// Resolve the embedding model and build the ffmpeg-backed pipeline.
    /// Blocks on model download, so call it off the async runtime.
    pub fn load(config: Config) -> Result<Arc<Self>, Box<dyn Error + Send + Sync>> {
        let source = ModelSource {
            explicit: config.model_path.as_deref(),
            bundled_dir: None,
            url: config.model_url.as_deref(),
        };
        let progress: model_resolver::ProgressFn = Box::new(|done: u64, total: u64| {
            if total > 0 && done == total {
                info!("Model download complete ({total} bytes)");
            }
        });
        let model_path = model_resolver::resolve(EMBEDDING_MODEL_NAME, &source, Some(progress))?;
        info!("Using embedding model {}", model_path.display());

        let embedder = OnnxFacenetEmbedder::new(&model_path)?;
        let comparer = CompareMediaUseCase::new(
            Box::new(FfmpegMediaOpener),
            Arc::new(embedder),
            config.num_frames,
        );
        Ok(Self::new(config, comparer))
    }
}
