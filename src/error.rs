use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by preprocessing, postprocessing and resource loading.
///
/// Runtime-facing functions return `anyhow::Result`; the typed variant can be
/// recovered with `err.downcast_ref::<ClassifyError>()`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClassifyError {
    #[error("invalid image dimensions {width}x{height}")]
    InvalidImageDimensions { width: u32, height: u32 },

    #[error("class index {index} has no label (label set holds {len})")]
    LabelIndexOutOfRange { index: usize, len: usize },

    #[error("confidence vector is empty, no prediction")]
    EmptyConfidenceVector,

    #[error("none of the {len} scores is comparable (all NaN), no prediction")]
    NoComparableScore { len: usize },

    #[error("failed to load resource '{}': {reason}", path.display())]
    ResourceLoadFailure { path: PathBuf, reason: String },

    #[error("failed to decode image: {reason}")]
    ImageDecodeFailure { reason: String },

    #[error("no image selected")]
    NoImageSelected,

    #[error("tensor size mismatch: expected {expected} bytes, got {actual}")]
    TensorSizeMismatch { expected: usize, actual: usize },
}

impl ClassifyError {
    pub(crate) fn resource(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ClassifyError::ResourceLoadFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Text meant for the display layer.
    pub fn user_message(&self) -> String {
        match self {
            ClassifyError::ResourceLoadFailure { .. } => "Error loading model or labels.".to_string(),
            ClassifyError::ImageDecodeFailure { .. } => "Error loading image.".to_string(),
            ClassifyError::NoImageSelected => "Please select an image first.".to_string(),
            other => other.to_string(),
        }
    }
}
