pub mod execution_provider;
pub mod math;
pub mod model_resolver;
pub mod onnx_facenet_embedder;
