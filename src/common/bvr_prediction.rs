use serde::{Deserialize, Serialize};

/// The top class picked from one model output.
#[derive(Default, Debug, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct BvrPrediction {
    pub class_id: usize,
    pub label: String,
    /// Raw score from the model. Not guaranteed to be a probability.
    pub confidence: f32,
    pub last_inference_time: u128,
}

impl BvrPrediction {
    pub fn new(class_id: usize, label: &str, confidence: f32) -> Self {
        Self {
            class_id,
            label: label.to_string(),
            confidence,
            last_inference_time: 0,
        }
    }

    /// Sets the time spent inside the inference runtime, in microseconds.
    pub fn with_inference_time(mut self, micros: u128) -> Self {
        self.last_inference_time = micros;
        self
    }

    /// Confidence scaled for display, e.g. `0.9` becomes `90.0`.
    pub fn confidence_percent(&self) -> f32 {
        self.confidence * 100.0
    }
}

impl std::fmt::Display for BvrPrediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Predicted: {}\nConfidence: {}%", self.label, self.confidence_percent())
    }
}
