use std::path::Path;
use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL_WIDTH: u32 = 224;
pub const DEFAULT_MODEL_HEIGHT: u32 = 224;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub weights_path: String,
    pub ort_lib_path: String,
    /// Empty means class names come from the model metadata.
    pub labels_path: String,
    /// Start of the model inside the packaged asset file.
    pub asset_offset: u64,
    /// Length of the model region. `None` maps to the end of the file.
    pub asset_length: Option<u64>,
    pub width: u32,
    pub height: u32,
    pub intra_threads: usize,
    pub profile: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            weights_path: String::new(),
            ort_lib_path: String::new(),
            labels_path: String::new(),
            asset_offset: 0,
            asset_length: None,
            width: DEFAULT_MODEL_WIDTH,
            height: DEFAULT_MODEL_HEIGHT,
            intra_threads: 1,
            profile: false,
        }
    }
}

impl ModelConfig {
    pub fn new(weights_path: String, ort_lib_path: String, labels_path: String,
               width: u32, height: u32) -> Self {
        Self {
            weights_path,
            ort_lib_path,
            labels_path,
            width,
            height,
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: ModelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model config {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid model config {}", path.display()))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.width == 0 || self.height == 0 {
            anyhow::bail!("Model input resolution must be positive, got {}x{}", self.width, self.height);
        }
        if self.intra_threads == 0 {
            anyhow::bail!("intra_threads must be at least 1");
        }
        Ok(())
    }

    pub fn with_asset_region(mut self, offset: u64, length: Option<u64>) -> Self {
        self.asset_offset = offset;
        self.asset_length = length;
        self
    }

    pub fn to_string(&self) -> String {
        format!("Weights File Path: {}\n\
        Labels Path: {}\n\
        OnnxRuntime Lib Path: {}\n\
        Asset Region: offset {} length {:?}\n\
        Model Input Resolution: {}x{}\n\
        Intra-op Threads: {}",
                self.weights_path, self.labels_path, self.ort_lib_path,
                self.asset_offset, self.asset_length,
                self.width, self.height, self.intra_threads)
    }
}
