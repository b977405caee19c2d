use std::time::Instant;
use crate::data::X;
use crate::error::DetectError;
use crate::utils;

/// Anything that turns one input tensor into the flat raw output tensor.
pub trait InferenceBackend: Send {
    fn infer(&mut self, input: &X) -> anyhow::Result<Vec<f32>>;
}

impl<F> InferenceBackend for F
where
    F: FnMut(&X) -> anyhow::Result<Vec<f32>> + Send,
{
    fn infer(&mut self, input: &X) -> anyhow::Result<Vec<f32>> {
        self(input)
    }
}

pub trait InferenceProcess: Sized {
    type Input;
    type Prepared;
    type Output;

    /// Pre-process the input data.
    fn preprocess(&self, x: &Self::Input) -> Result<Self::Prepared, DetectError>;

    /// Executes the model on the preprocessed data.
    fn inference(&mut self, x: &mut Self::Prepared) -> Result<Vec<f32>, DetectError>;

    /// Post-process the model's output.
    fn postprocess(&self, raw: Vec<f32>, x: Self::Prepared) -> Result<Self::Output, DetectError>;

    /// Executes the full pipeline.
    fn run(&mut self, x: &Self::Input) -> Result<Self::Output, DetectError> {
        let mut prepared = self.preprocess(x)?;
        let raw = self.inference(&mut prepared)?;
        self.postprocess(raw, prepared)
    }

    /// Executes the full pipeline, tracing each stage.
    fn forward(&mut self, x: &Self::Input, profile: bool) -> Result<Self::Output, DetectError> {
        let detect_time = Instant::now();
        let mut _detect_elapsed = detect_time.elapsed();

        let mut prepared = self.preprocess(x)?;
        _detect_elapsed = utils::trace(profile, "TIME", "Preprocessing input", detect_time, _detect_elapsed);

        let raw = self.inference(&mut prepared)?;
        _detect_elapsed = utils::trace(profile, "TIME", "Detection run", detect_time, _detect_elapsed);

        let ys = self.postprocess(raw, prepared)?;
        utils::trace(profile, "TIME", "Postprocessing", detect_time, _detect_elapsed);

        Ok(ys)
    }
}
