//! ONNX Runtime backend running on the CPU execution provider.

use std::time::Instant;
use anyhow::Result;
use half::f16;
use ort::{
    execution_providers::{CPUExecutionProvider, ExecutionProvider},
    session::builder::{GraphOptimizationLevel, SessionBuilder},
    session::Session,
    tensor::TensorElementType,
    value::{Tensor, ValueType},
};
use regex::Regex;
use crate::data::{ConfigOrt, ModelAsset, TimeCalc, TensorBuffer, CROSS_MARK, TENSOR_CHANNELS};

/// Name, element type and dimensions of one model input or output.
#[derive(Debug, Clone)]
pub struct OrtTensorAttr {
    pub name: String,
    pub dtype: TensorElementType,
    /// `-1` marks a dynamic dimension.
    pub dims: Vec<i64>,
}

impl OrtTensorAttr {
    fn from_value_type(name: &str, value_type: &ValueType) -> Result<Self> {
        match value_type {
            ValueType::Tensor { ty, dimensions, .. } => Ok(Self {
                name: name.to_string(),
                dtype: *ty,
                dims: dimensions.clone(),
            }),
            other => anyhow::bail!("{CROSS_MARK} '{}' is not a tensor: {:?}", name, other),
        }
    }

    fn fixed_dim(&self, i: usize) -> Option<usize> {
        self.dims.get(i).and_then(|&d| usize::try_from(d).ok()).filter(|&d| d > 0)
    }
}

#[derive(Debug)]
pub struct OrtEngine {
    session: Session,
    input: OrtTensorAttr,
    output: OrtTensorAttr,
    model_width: u32,
    model_height: u32,
    pub infer_time: TimeCalc,
}

impl OrtEngine {
    pub fn new(config: &ConfigOrt, asset: &ModelAsset) -> Result<Self> {
        match ort::init_from(&config.ort_lib_path).commit() {
            Ok(_) => {},
            Err(e) => {
                return Err(anyhow::anyhow!("Failed to commit ORT from {}: {:?}", config.ort_lib_path, e));
            }
        };

        let mut builder = Session::builder()?;
        Self::build_cpu(&mut builder)?;

        let session = builder
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(config.intra_threads)?
            .commit_from_memory(asset.as_bytes())?;

        let input = match session.inputs.first() {
            Some(x) => OrtTensorAttr::from_value_type(&x.name, &x.input_type)?,
            None => anyhow::bail!("{CROSS_MARK} Model has no inputs"),
        };
        let output = match session.outputs.first() {
            Some(x) => OrtTensorAttr::from_value_type(&x.name, &x.output_type)?,
            None => anyhow::bail!("{CROSS_MARK} Model has no outputs"),
        };

        let (model_width, model_height) = Self::resolve_input_size(&input, config.model_width, config.model_height)?;

        log::info!(
            "Backend: ONNXRuntime | Device: CPU | Input: {} {:?} {:?} | Output: {} {:?}",
            input.name, input.dtype, input.dims, output.name, output.dims,
        );

        Ok(Self {
            session,
            input,
            output,
            model_width,
            model_height,
            infer_time: TimeCalc::default(),
        })
    }

    fn build_cpu(builder: &mut SessionBuilder) -> Result<()> {
        let ep = CPUExecutionProvider::default();
        if ep.is_available()? {
            match ep.register(builder) {
                Ok(_) => { }
                Err(err) => { anyhow::bail!("{CROSS_MARK} CPU initialization failed: {:?}", err) }
            }
            Ok(())
        } else {
            anyhow::bail!("{CROSS_MARK} CPU execution provider not available")
        }
    }

    /// Checks the input is NHWC with 3 channels. Fixed height/width in the
    /// model win over the configured resolution.
    fn resolve_input_size(input: &OrtTensorAttr, width: u32, height: u32) -> Result<(u32, u32)> {
        if input.dims.len() != 4 {
            anyhow::bail!("{CROSS_MARK} Expected a 4D NHWC input, got dims {:?}", input.dims);
        }
        if let Some(c) = input.fixed_dim(3) {
            if c != TENSOR_CHANNELS {
                anyhow::bail!("{CROSS_MARK} Expected {} input channels, model wants {}", TENSOR_CHANNELS, c);
            }
        }

        let mut size = (width, height);
        if let Some(h) = input.fixed_dim(1) {
            size.1 = h as u32;
        }
        if let Some(w) = input.fixed_dim(2) {
            size.0 = w as u32;
        }
        if size != (width, height) {
            log::warn!("Configured input {}x{} differs from model input {}x{}, using the model's", width, height, size.0, size.1);
        }
        Ok(size)
    }

    pub fn run(&mut self, x: TensorBuffer) -> Result<Vec<f32>> {
        let t_pre = Instant::now();
        let array = x.into_array()?;
        let value = match self.input.dtype {
            TensorElementType::Float32 => Tensor::from_array(array)?.into_dyn(),
            TensorElementType::Float16 => Tensor::from_array(array.mapv(f16::from_f32))?.into_dyn(),
            other => anyhow::bail!("{CROSS_MARK} Unsupported input type {:?}", other),
        };
        self.infer_time.add_or_push(0, t_pre.elapsed());

        let t_run = Instant::now();
        let outputs = self.session.run(ort::inputs![self.input.name.as_str() => value]?)?;
        self.infer_time.add_or_push(1, t_run.elapsed());

        let t_post = Instant::now();
        let y = &outputs[self.output.name.as_str()];
        let ys: Vec<f32> = match self.output.dtype {
            TensorElementType::Float32 => y.try_extract_tensor::<f32>()?.iter().copied().collect(),
            TensorElementType::Float16 => y.try_extract_tensor::<f16>()?.iter().map(|v| v.to_f32()).collect(),
            other => anyhow::bail!("{CROSS_MARK} Unsupported output type {:?}", other),
        };
        self.infer_time.add_or_push(2, t_post.elapsed());
        self.infer_time.finish_run();

        Ok(ys)
    }

    pub fn width(&self) -> u32 {
        self.model_width
    }

    pub fn height(&self) -> u32 {
        self.model_height
    }

    /// Class count when the model output has a fixed last dimension.
    pub fn num_classes(&self) -> Option<usize> {
        self.output.dims.len().checked_sub(1).and_then(|i| self.output.fixed_dim(i))
    }

    pub fn try_fetch(&self, key: &str) -> Option<String> {
        match self.session.metadata() {
            Ok(metadata) => metadata.custom(key).ok().flatten(),
            Err(_) => None,
        }
    }

    /// Class names from the model metadata, stored as
    /// `{0: 'healthy', 1: 'ulcer', ...}`.
    pub fn fetch_names(&self) -> Option<Vec<String>> {
        self.try_fetch("names").map(|names| parse_names(&names))
    }
}

pub(crate) fn parse_names(names: &str) -> Vec<String> {
    let re = match Regex::new(r#"(['"])([-()\w '"]+)(['"])"#) {
        Ok(re) => re,
        Err(_) => return vec![],
    };
    re.captures_iter(names)
        .map(|x| x.extract())
        .map(|(_, [_, name, _])| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(dims: &[i64]) -> OrtTensorAttr {
        OrtTensorAttr {
            name: "input".to_string(),
            dtype: TensorElementType::Float32,
            dims: dims.to_vec(),
        }
    }

    #[test]
    fn input_size_from_model() {
        assert_eq!(OrtEngine::resolve_input_size(&attr(&[1, 224, 224, 3]), 100, 100).unwrap(), (224, 224));
        assert_eq!(OrtEngine::resolve_input_size(&attr(&[-1, -1, -1, 3]), 96, 64).unwrap(), (96, 64));
        assert_eq!(OrtEngine::resolve_input_size(&attr(&[1, 120, 160, 3]), 224, 224).unwrap(), (160, 120));
    }

    #[test]
    fn input_layout_rejected() {
        assert!(OrtEngine::resolve_input_size(&attr(&[1, 3, 224, 224]), 224, 224).is_err());
        assert!(OrtEngine::resolve_input_size(&attr(&[224, 224, 3]), 224, 224).is_err());
    }

    #[test]
    fn names_from_metadata() {
        let names = parse_names("{0: 'healthy', 1: 'ulcer', 2: \"yellow_lady's_slipper\"}");
        assert_eq!(names, vec!["healthy", "ulcer", "yellow_lady's_slipper"]);
    }
}
