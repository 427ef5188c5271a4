mod ort_engine;
mod ort_inference;
pub mod arg_max;
pub mod image_ops;

pub use ort_engine::*;
pub use ort_inference::*;
