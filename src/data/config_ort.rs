//! Options for building the classifier and its ONNX Runtime session.

use std::path::Path;
use anyhow::Result;
use crate::common::{ModelConfig, DEFAULT_MODEL_HEIGHT, DEFAULT_MODEL_WIDTH};
use crate::data::ModelAsset;
use crate::error::ClassifyError;

#[derive(Debug, Clone)]
pub struct ConfigOrt {
    pub onnx_path: String,
    pub ort_lib_path: String,
    pub asset_offset: u64,
    pub asset_length: Option<u64>,
    pub model_width: u32,
    pub model_height: u32,
    pub intra_threads: usize,
    pub profile: bool,
    pub num_dry_run: usize,
    pub names: Option<Vec<String>>,
}

impl Default for ConfigOrt {
    fn default() -> Self {
        Self {
            onnx_path: String::new(),
            ort_lib_path: String::new(),
            asset_offset: 0,
            asset_length: None,
            model_width: DEFAULT_MODEL_WIDTH,
            model_height: DEFAULT_MODEL_HEIGHT,
            intra_threads: 1,
            profile: false,
            num_dry_run: 1,
            names: None,
        }
    }
}

impl From<&ModelConfig> for ConfigOrt {
    fn from(config: &ModelConfig) -> Self {
        let mut options = Self::new()
            .with_asset_region(config.asset_offset, config.asset_length)
            .with_model_width(config.width)
            .with_model_height(config.height)
            .with_intra_threads(config.intra_threads)
            .with_profile(config.profile);
        options.onnx_path = config.weights_path.clone();
        options.ort_lib_path = config.ort_lib_path.clone();
        options
    }
}

impl ConfigOrt {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_model(mut self, onnx_path: &str) -> Result<Self> {
        if onnx_path.is_empty() {
            anyhow::bail!("Model path is empty");
        }
        self.onnx_path = onnx_path.to_string();
        Ok(self)
    }

    pub fn with_ort_lib_path(mut self, ort_lib_path: &str) -> Result<Self> {
        if ort_lib_path.is_empty() {
            anyhow::bail!("ONNX Runtime library path is empty");
        }
        self.ort_lib_path = ort_lib_path.to_string();
        Ok(self)
    }

    pub fn with_asset_region(mut self, offset: u64, length: Option<u64>) -> Self {
        self.asset_offset = offset;
        self.asset_length = length;
        self
    }

    /// Maps the configured region of the model file.
    pub fn map_asset(&self) -> Result<ModelAsset, ClassifyError> {
        ModelAsset::map(Path::new(&self.onnx_path), self.asset_offset, self.asset_length)
    }

    pub fn with_model_width(mut self, n: u32) -> Self {
        self.model_width = n;
        self
    }

    pub fn with_model_height(mut self, n: u32) -> Self {
        self.model_height = n;
        self
    }

    pub fn with_intra_threads(mut self, n: usize) -> Self {
        self.intra_threads = n.max(1);
        self
    }

    pub fn with_dry_run(mut self, n: usize) -> Self {
        self.num_dry_run = n;
        self
    }

    pub fn with_profile(mut self, profile: bool) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_names(mut self, names: &[&str]) -> Self {
        self.names = Some(names.iter().map(|x| x.to_string()).collect::<Vec<String>>());
        self
    }
}
