pub mod face_embedder;
pub mod similarity;
