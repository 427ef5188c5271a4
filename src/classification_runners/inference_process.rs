use std::time::Instant;
use crate::classification_runners::ort_classifier::{arg_max, image_ops};
use crate::common::{BvrImage, BvrPrediction, LabelSet};
use crate::data::TensorBuffer;
use crate::utils;

pub trait InferenceProcess {
    /// Model input resolution as `(width, height)`.
    fn input_size(&self) -> (u32, u32);

    fn labels(&self) -> &LabelSet;

    /// Pre-process the input image.
    fn preprocess(&self, x: &BvrImage) -> anyhow::Result<TensorBuffer> {
        let (width, height) = self.input_size();
        Ok(image_ops::preprocess(x, width, height)?)
    }

    /// Executes the model on the preprocessed data.
    fn inference(&mut self, x: TensorBuffer) -> anyhow::Result<Vec<f32>>;

    /// Post-process the model's output.
    fn postprocess(&self, ys: &[f32]) -> anyhow::Result<BvrPrediction> {
        Ok(arg_max::select_prediction(ys, self.labels())?)
    }

    /// Executes the full pipeline.
    fn run(&mut self, x: &BvrImage) -> anyhow::Result<BvrPrediction> {
        let ys = self.preprocess(x)?;
        let ys = self.inference(ys)?;
        self.postprocess(&ys)
    }

    /// Executes the full pipeline, timing each stage.
    fn forward(&mut self, x: &BvrImage, profile: bool) -> anyhow::Result<BvrPrediction> {
        let start = Instant::now();

        let t_pre = Instant::now();
        let ys = self.preprocess(x)?;
        let t_pre = t_pre.elapsed();

        let mut _elapsed = start.elapsed();
        _elapsed = utils::trace(false, "TIME", "Preprocessing input", start, _elapsed);

        let t_exe = Instant::now();
        let ys = self.inference(ys)?;
        let t_exe = t_exe.elapsed();

        _elapsed = utils::trace(false, "TIME", "Classification run", start, _elapsed);

        let t_post = Instant::now();
        let y = self.postprocess(&ys)?;
        let t_post = t_post.elapsed();

        utils::trace(false, "TIME", "Postprocessing", start, _elapsed);

        if profile {
            log::info!("> Preprocess: {t_pre:?} | Inference: {t_exe:?} | Postprocess: {t_post:?}");
        }

        Ok(y.with_inference_time(t_exe.as_micros()))
    }
}
