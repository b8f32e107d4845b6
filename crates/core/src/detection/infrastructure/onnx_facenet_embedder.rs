//! Facenet512 face embedder backed by ONNX Runtime.
//!
//! Takes the largest centred square of the frame (face detection is not
//! enforced), resizes it to 160x160 and standardises each image before
//! inference. The model expects NHWC input and returns a 512-d vector.
use std::path::Path;
use std::sync::Mutex;

use crate::detection::domain::face_embedder::FaceEmbedder;
use crate::detection::infrastructure::execution_provider;
use crate::detection::infrastructure::math;
use crate::shared::frame::Frame;

pub const INPUT_SIZE: usize = 160;
pub const EMBEDDING_DIM: usize = 512;

type EmbedError = Box<dyn std::error::Error + Send + Sync>;

pub struct OnnxFacenetEmbedder {
    session: Mutex<ort::session::Session>,
    dimension: usize,
}

impl OnnxFacenetEmbedder {
    pub fn new(model_path: &Path) -> Result<Self, EmbedError> {
        let intra_threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let session = ort::session::Session::builder()?
            .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)?
            .with_inter_threads(1)?
            .with_intra_threads(intra_threads)?
            .with_execution_providers(execution_provider::preferred_execution_providers())?
            .commit_from_file(model_path)?;
        log::info!(
            "Loaded embedding model {} ({})",
            model_path.display(),
            execution_provider::accelerator_name()
        );
        Ok(Self {
            session: Mutex::new(session),
            dimension: EMBEDDING_DIM,
        })
    }
}

impl FaceEmbedder for OnnxFacenetEmbedder {
    fn embed(&self, frame: &Frame) -> Result<Vec<f32>, EmbedError> {
        if frame.is_empty() {
            return Err("cannot embed an empty frame".into());
        }
        let tensor = preprocess(frame)?;
        let input_value = ort::value::Tensor::from_array(tensor)?;
        let mut session = self
            .session
            .lock()
            .map_err(|e| format!("Lock poisoned: {e}"))?;
        let outputs = session.run(ort::inputs![input_value])?;
        let embedding = outputs[0].try_extract_array::<f32>()?;
        let values: Vec<f32> = embedding.iter().copied().collect();
        if values.len() != self.dimension {
            return Err(format!(
                "embedding has {} values, expected {}",
                values.len(),
                self.dimension
            )
            .into());
        }
        Ok(values)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Centre-crop to a square, resize to 160x160, standardise, NHWC layout.
fn preprocess(frame: &Frame) -> Result<ndarray::Array4<f32>, EmbedError> {
    let region = frame.center_square();
    let side = region.side as usize;

    let mut pixels = Vec::with_capacity(INPUT_SIZE * INPUT_SIZE * 3);
    for y in 0..INPUT_SIZE {
        let src_y = region.y + math::nearest_source(y, side, INPUT_SIZE) as u32;
        for x in 0..INPUT_SIZE {
            let src_x = region.x + math::nearest_source(x, side, INPUT_SIZE) as u32;
            pixels.extend(frame.pixel(src_x, src_y).iter().map(|&v| v as f32));
        }
    }
    math::standardize(&mut pixels);

    Ok(ndarray::Array4::from_shape_vec(
        (1, INPUT_SIZE, INPUT_SIZE, 3),
        pixels,
    )?)
}
