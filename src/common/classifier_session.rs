use crate::classification_runners::InferenceProcess;
use crate::common::{BvrImage, BvrPrediction};
use crate::error::ClassifyError;

/// Holds a loaded classifier together with the image the user picked last.
#[derive(Debug)]
pub struct ClassifierSession<P: InferenceProcess> {
    model: P,
    selected: Option<BvrImage>,
    profile: bool,
}

impl<P: InferenceProcess> ClassifierSession<P> {
    pub fn new(model: P) -> Self {
        Self {
            model,
            selected: None,
            profile: false,
        }
    }

    pub fn with_profile(mut self, profile: bool) -> Self {
        self.profile = profile;
        self
    }

    /// Replaces the current selection, e.g. after a gallery pick or camera capture.
    pub fn select_image(&mut self, image: impl Into<BvrImage>) {
        self.selected = Some(image.into());
    }

    pub fn selected_image(&self) -> Option<&BvrImage> {
        self.selected.as_ref()
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn model(&self) -> &P {
        &self.model
    }

    /// Classifies the selected image.
    pub fn predict(&mut self) -> anyhow::Result<BvrPrediction> {
        let image = self.selected.as_ref().ok_or(ClassifyError::NoImageSelected)?;
        self.model.forward(image, self.profile)
    }
}
