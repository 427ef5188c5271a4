mod utils;
mod classifiers;
mod error;
pub mod data;
pub mod classification_runners;
pub mod common;

use std::path::Path;
use std::time::Instant;
use crate::classification_runners::InferenceProcess;
use crate::common::{BvrImage, BvrOrtClassifier, BvrPrediction, LabelSet, ModelConfig};
use crate::data::ConfigOrt;

pub use crate::classifiers::{classifier_loop, spawn_classifier};
pub use crate::error::ClassifyError;

pub fn init_classifier(model_details: &ModelConfig) -> anyhow::Result<BvrOrtClassifier> {
    model_details.validate()?;
    log::info!("Initializing classifier\n{}", model_details.to_string());

    let labels = match model_details.labels_path.as_str() {
        "" => None,
        path => Some(LabelSet::from_file(Path::new(path))?),
    };
    let ort_options = ConfigOrt::from(model_details)
        .with_model(&model_details.weights_path)?
        .with_ort_lib_path(&model_details.ort_lib_path)?
        .with_dry_run(1);

    log::info!("Initializing ORT session with (CPU) execution provider");
    BvrOrtClassifier::new(ort_options, labels)
}

pub fn run_classification(classifier: &mut BvrOrtClassifier, bvr_image: &BvrImage) -> anyhow::Result<BvrPrediction> {
    let now = Instant::now();

    let profile = classifier.profile();
    let prediction = classifier.forward(bvr_image, profile)?;

    log::info!("Processing time: {:?}", now.elapsed());
    if profile {
        log::info!("Average inference time over {} runs: {:?}", classifier.infer_time().runs(), classifier.infer_time().avg());
    }

    Ok(prediction)
}
