use anyhow::Result;
use crate::classification_runners::inference_process::InferenceProcess;
use crate::classification_runners::ort_classifier::OrtEngine;
use crate::common::{BvrImage, LabelSet};
use crate::data::{ConfigOrt, TensorBuffer, TimeCalc};

/// Image classifier backed by an ONNX Runtime session.
#[derive(Debug)]
pub struct BvrOrtClassifier {
    engine: OrtEngine,
    labels: LabelSet,
    profile: bool,
}

impl InferenceProcess for BvrOrtClassifier {
    fn input_size(&self) -> (u32, u32) {
        (self.engine.width(), self.engine.height())
    }

    fn labels(&self) -> &LabelSet {
        &self.labels
    }

    fn inference(&mut self, x: TensorBuffer) -> Result<Vec<f32>> {
        self.engine.run(x)
    }
}

impl BvrOrtClassifier {
    /// Maps the model region named by `options` and builds the session. Labels
    /// fall back to the model's embedded names, then to numbered placeholders.
    pub fn new(options: ConfigOrt, labels: Option<LabelSet>) -> Result<Self> {
        let asset = options.map_asset()?;
        let engine = OrtEngine::new(&options, &asset)?;

        let names = options.names.clone().or_else(|| engine.fetch_names());
        let labels = resolve_labels(labels, names, engine.num_classes())?;

        let mut classifier = Self {
            engine,
            labels,
            profile: options.profile,
        };

        for _ in 0..options.num_dry_run {
            let (w, h) = classifier.input_size();
            let blank = BvrImage::from(image::RgbaImage::new(w, h));
            let tensor = classifier.preprocess(&blank)?;
            classifier.inference(tensor)?;
        }
        if options.num_dry_run > 0 {
            classifier.engine.infer_time.clear();
        }

        Ok(classifier)
    }

    pub fn profile(&self) -> bool {
        self.profile
    }

    pub fn infer_time(&self) -> &TimeCalc {
        &self.engine.infer_time
    }
}

/// Picks the label source: the label file, then names embedded in the model,
/// then `# i` placeholders sized by the model's class count.
pub(crate) fn resolve_labels(
    labels: Option<LabelSet>,
    names: Option<Vec<String>>,
    num_classes: Option<usize>,
) -> Result<LabelSet> {
    let labels = match (labels, names, num_classes) {
        (Some(labels), _, _) => labels,
        (None, Some(names), _) if !names.is_empty() => LabelSet::from(names),
        (None, _, Some(nc)) => {
            log::warn!("No class names found, using {} numbered labels", nc);
            LabelSet::numbered(nc)
        }
        (None, _, None) => anyhow::bail!(
            "Unable to obtain class names. Provide a label file or use `options.with_names(&[&str])`."
        ),
    };

    if !class_count_matches(&labels, num_classes) {
        log::warn!("Model outputs {:?} classes but {} labels were loaded", num_classes, labels.len());
    }
    Ok(labels)
}

/// `true` unless the model declares a fixed class count that differs from the labels.
pub(crate) fn class_count_matches(labels: &LabelSet, num_classes: Option<usize>) -> bool {
    num_classes.map_or(true, |nc| nc == labels.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(xs: &[&str]) -> Option<Vec<String>> {
        Some(xs.iter().map(|x| x.to_string()).collect())
    }

    #[test]
    fn label_file_wins() {
        let labels = resolve_labels(Some(LabelSet::new(&["cat", "dog"])), names(&["a", "b"]), Some(2)).unwrap();
        assert_eq!(labels, LabelSet::new(&["cat", "dog"]));
    }

    #[test]
    fn metadata_names_next() {
        let labels = resolve_labels(None, names(&["a", "b", "c"]), Some(3)).unwrap();
        assert_eq!(labels, LabelSet::new(&["a", "b", "c"]));
    }

    #[test]
    fn numbered_when_nothing_named() {
        assert_eq!(resolve_labels(None, None, Some(2)).unwrap(), LabelSet::new(&["# 0", "# 1"]));
        assert_eq!(resolve_labels(None, names(&[]), Some(1)).unwrap(), LabelSet::new(&["# 0"]));
        assert!(resolve_labels(None, None, None).is_err());
        assert!(resolve_labels(None, names(&[]), None).is_err());
    }

    #[test]
    fn class_count_mismatch() {
        let labels = LabelSet::new(&["a", "b"]);
        assert!(class_count_matches(&labels, Some(2)));
        assert!(class_count_matches(&labels, None));
        assert!(!class_count_matches(&labels, Some(3)));

        // A mismatch is reported but the file's labels are still used.
        assert_eq!(resolve_labels(Some(labels.clone()), None, Some(3)).unwrap(), labels);
    }
}
