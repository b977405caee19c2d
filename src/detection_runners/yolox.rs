use image::RgbImage;
use crate::common::{ModelConfig, RmDetection, RmImage};
use crate::data::{SharedParams, X};
use crate::detection_processing::{generate_grids_and_strides, process_predictions, FrameGeometry, GridAnchor};
use crate::detection_runners::image_ops::{blob_from_image, letterbox, Letterbox};
use crate::detection_runners::inference_process::{InferenceBackend, InferenceProcess};
use crate::detection_runners::inference_worker::InferenceWorker;
use crate::error::DetectError;
use crate::visualizer::draw_objects;

/// Output of [`YoloX::preprocess`].
#[derive(Debug, Clone)]
pub struct Prepared {
    pub letterbox: Letterbox,
    pub input: X,
}

/// Everything one frame produced.
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub detections: Vec<RmDetection>,
    /// Letterboxed frame with the boxes drawn, only when display is on.
    pub annotated: Option<RgbImage>,
}

/// Anchor-free single-class detector: letterbox, infer, decode.
#[derive(Debug)]
pub struct YoloX {
    worker: InferenceWorker,
    anchors: Vec<GridAnchor>,
    num_classes: usize,
    input_width: u32,
    input_height: u32,
    swap_rb: bool,
    params: SharedParams,
}

impl YoloX {
    pub fn new(config: &ModelConfig, backend: Box<dyn InferenceBackend>, params: SharedParams) -> Result<Self, DetectError> {
        config.validate()?;

        let anchors = generate_grids_and_strides(config.input_width, config.input_height, &config.strides);
        log::info!(
            "YOLOX head: {} anchors over strides {:?} | {} classes",
            anchors.len(), config.strides, config.num_classes
        );

        let worker = InferenceWorker::spawn(backend, config.inference_timeout())?;

        Ok(Self {
            worker,
            anchors,
            num_classes: config.num_classes,
            input_width: config.input_width,
            input_height: config.input_height,
            swap_rb: config.swap_rb,
            params,
        })
    }
}

impl InferenceProcess for YoloX {
    type Input = RmImage;
    type Prepared = Prepared;
    type Output = FrameOutput;

    fn preprocess(&self, x: &RmImage) -> Result<Prepared, DetectError> {
        let letterbox = letterbox(x.image.to_rgb8(), self.input_width, self.input_height)?;
        let input = blob_from_image(&letterbox.image, self.swap_rb)?;
        Ok(Prepared { letterbox, input })
    }

    fn inference(&mut self, x: &mut Prepared) -> Result<Vec<f32>, DetectError> {
        self.worker.infer(std::mem::take(&mut x.input))
    }

    fn postprocess(&self, raw: Vec<f32>, x: Prepared) -> Result<FrameOutput, DetectError> {
        let params = self.params.snapshot();
        let geometry = FrameGeometry {
            scale: x.letterbox.scale,
            image_width: x.letterbox.resized_width,
            image_height: x.letterbox.resized_height,
        };

        let detections = process_predictions(&self.anchors, &raw, self.num_classes, geometry, &params)?;

        let annotated = if params.display {
            let mut image = x.letterbox.image;
            draw_objects(&mut image, &detections);
            Some(image)
        } else {
            None
        };

        Ok(FrameOutput { detections, annotated })
    }
}
