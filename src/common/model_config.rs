use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::common::{CameraModel, InferenceDevice};
use crate::data::RuntimeParams;
use crate::error::DetectError;

/// What to do with detections beyond the number of ROI output channels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Publish the highest-confidence detections, drop the rest with a warning.
    #[default] Truncate,
    /// Fail the frame without publishing anything.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub weights_path: PathBuf,
    pub ort_lib_path: Option<PathBuf>,
    pub inference_device: InferenceDevice,
    pub input_width: u32,
    pub input_height: u32,
    pub num_classes: usize,
    pub strides: Vec<u32>,
    pub swap_rb: bool,
    pub camera_matrix: Vec<f32>,
    pub distortion_coefficients: Vec<f32>,
    pub roi_channel_names: Vec<String>,
    pub camera_pub_name: String,
    pub conf_threshold: f32,
    pub nms_threshold: f32,
    pub turn_on_image: bool,
    pub inference_timeout_ms: u64,
    pub overflow_policy: OverflowPolicy,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            weights_path: PathBuf::new(),
            ort_lib_path: None,
            inference_device: InferenceDevice::CPU,
            input_width: 416,
            input_height: 416,
            num_classes: 1,
            strides: vec![8, 16, 32],
            swap_rb: true,
            camera_matrix: Vec::new(),
            distortion_coefficients: Vec::new(),
            roi_channel_names: vec![
                "roi_data1".to_string(),
                "roi_data2".to_string(),
                "roi_data3".to_string(),
            ],
            camera_pub_name: "detector_image".to_string(),
            conf_threshold: 0.1,
            nms_threshold: 0.1,
            turn_on_image: true,
            inference_timeout_ms: 1000,
            overflow_policy: OverflowPolicy::Truncate,
        }
    }
}

impl ModelConfig {
    /// Reads a JSON config and validates everything except the model path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DetectError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| DetectError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config: ModelConfig = serde_json::from_str(&text)
            .map_err(|e| DetectError::Config(format!("cannot parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DetectError> {
        self.camera_model()?;
        if self.input_width == 0 || self.input_height == 0 {
            return Err(DetectError::Config("input size must be non-zero".to_string()));
        }
        if self.strides.is_empty() {
            return Err(DetectError::Config("at least one stride is required".to_string()));
        }
        for &stride in &self.strides {
            if stride == 0 || self.input_width % stride != 0 || self.input_height % stride != 0 {
                return Err(DetectError::Config(format!(
                    "stride {stride} does not divide input {}x{}",
                    self.input_width, self.input_height
                )));
            }
        }
        if self.num_classes == 0 {
            return Err(DetectError::Config("num_classes must be at least 1".to_string()));
        }
        if self.roi_channel_names.is_empty() {
            return Err(DetectError::Config("no roi output channels configured".to_string()));
        }
        self.runtime_params().validate()?;
        if self.inference_timeout_ms == 0 {
            return Err(DetectError::Config("inference_timeout_ms must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Fails if the configured weights file does not exist.
    pub fn check_weights(&self) -> Result<(), DetectError> {
        if !self.weights_path.is_file() {
            return Err(DetectError::ModelNotFound(self.weights_path.clone()));
        }
        Ok(())
    }

    pub fn camera_model(&self) -> Result<CameraModel, DetectError> {
        CameraModel::new(&self.camera_matrix, &self.distortion_coefficients)
    }

    pub fn runtime_params(&self) -> RuntimeParams {
        RuntimeParams {
            conf_threshold: self.conf_threshold,
            iou_threshold: self.nms_threshold,
            display: self.turn_on_image,
        }
    }

    pub fn inference_timeout(&self) -> Duration {
        Duration::from_millis(self.inference_timeout_ms)
    }

    /// Length of the raw output tensor for this configuration.
    pub fn output_len(&self) -> usize {
        let anchors: usize = self
            .strides
            .iter()
            .map(|&s| ((self.input_width / s) * (self.input_height / s)) as usize)
            .sum();
        anchors * (self.num_classes + 5)
    }
}

impl fmt::Display for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Weights File Path: {}\n\
        Inference Device: {}\n\
        Model Input Resolution: {}x{}\n\
        Classes: {} | Strides: {:?}\n\
        Detection Threshold: {} | NMS Threshold: {}\n\
        ROI Channels: {:?} ({:?} on overflow)",
               self.weights_path.display(), self.inference_device,
               self.input_width, self.input_height,
               self.num_classes, self.strides,
               self.conf_threshold, self.nms_threshold,
               self.roi_channel_names, self.overflow_policy)
    }
}
