mod bvr_image;
mod bvr_prediction;
mod classifier_session;
mod label_set;
mod model_config;

pub use bvr_image::*;
pub use bvr_prediction::*;
pub use classifier_session::*;
pub use label_set::*;
pub use model_config::*;
pub use crate::classification_runners::BvrOrtClassifier;
