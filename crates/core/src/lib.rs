//! Core library for DeepShield.
//!
//! Two halves share this crate: the client side (`client`) that validates a
//! pair of media files and submits them to a detection endpoint, and the
//! comparison side (`detection`, `video`, `pipeline`) that turns media into
//! face embeddings and scores how similar they are.

pub mod client;
pub mod detection;
pub mod pipeline;
pub mod shared;
pub mod video;
