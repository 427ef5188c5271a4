pub mod inference_process;
pub mod ort_classifier;

pub use inference_process::InferenceProcess;
pub use ort_classifier::*;
