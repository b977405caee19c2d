mod utils;
mod detectors;
mod error;
mod roi_publisher;
mod visualizer;
pub mod common;
pub mod data;
pub mod detection_processing;
pub mod detection_runners;

use std::time::Instant;
use crate::common::{ModelConfig, RmImage};
use crate::data::SharedParams;
use crate::detection_runners::{FrameOutput, InferenceBackend, InferenceProcess, OrtEngine, YoloX};

pub use crate::detectors::detector_loop;
pub use crate::error::DetectError;
pub use crate::roi_publisher::RoiPublisher;
pub use crate::visualizer::draw_objects;

pub type Result<T, E = DetectError> = std::result::Result<T, E>;

/// Builds the detector on ONNX Runtime from a validated config.
pub fn init_detector(model_details: &ModelConfig, params: SharedParams) -> anyhow::Result<YoloX> {
    model_details.validate()?;
    log::info!("Initializing ORT session with ({}) execution provider", model_details.inference_device.str());
    let engine = OrtEngine::new(model_details)?;
    log::info!("ORT session ready on {}", engine.device());
    Ok(init_detector_with_backend(model_details, Box::new(engine), params)?)
}

/// Builds the detector around any backend, e.g. a synthetic one in tests.
pub fn init_detector_with_backend(
    model_details: &ModelConfig,
    backend: Box<dyn InferenceBackend>,
    params: SharedParams,
) -> Result<YoloX> {
    YoloX::new(model_details, backend, params)
}

pub fn run_detection(yolo: &mut YoloX, rm_image: &RmImage) -> Result<FrameOutput> {
    let now = Instant::now();

    let output = yolo.run(rm_image)?;

    log::debug!("Processing time: {:?}", now.elapsed());

    Ok(output)
}
