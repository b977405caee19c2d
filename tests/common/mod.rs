#![allow(dead_code)]

use std::path::PathBuf;
use image::DynamicImage;
use rm_detect::common::{ModelConfig, Proposal, RmBox, RmImage};
use rm_detect::detection_processing::GridAnchor;

pub const IDENTITY_K: [f32; 9] = [1., 0., 0., 0., 1., 0., 0., 0., 1.];

/// Deployment defaults with an identity camera, so published points equal
/// the rescaled pixel corners.
pub fn test_config() -> ModelConfig {
    ModelConfig {
        weights_path: PathBuf::from("does/not/exist.onnx"),
        camera_matrix: IDENTITY_K.to_vec(),
        distortion_coefficients: vec![0.; 5],
        ..ModelConfig::default()
    }
}

pub fn frame(width: u32, height: u32, frame_id: u64) -> RmImage {
    RmImage::new(DynamicImage::new_rgb8(width, height), frame_id)
}

pub fn anchor_index(anchors: &[GridAnchor], grid_x: u32, grid_y: u32, stride: u32) -> usize {
    anchors
        .iter()
        .position(|a| *a == GridAnchor { grid_x, grid_y, stride })
        .expect("anchor not in table")
}

/// Values written into one anchor row of a raw tensor.
#[derive(Debug, Clone, Copy)]
pub struct Row {
    pub tx: f32,
    pub ty: f32,
    pub tw: f32,
    pub th: f32,
    pub objectness: f32,
    pub class_score: f32,
}

impl Row {
    pub fn centered(size_log: f32, objectness: f32) -> Self {
        Self { tx: 0.5, ty: 0.5, tw: size_log, th: size_log, objectness, class_score: 1. }
    }
}

/// Builds a zeroed single-class tensor and fills the given rows.
pub fn tensor(num_anchors: usize, rows: &[(usize, Row)]) -> Vec<f32> {
    let mut feat = vec![0f32; num_anchors * 6];
    for &(i, r) in rows {
        feat[i * 6..i * 6 + 6].copy_from_slice(&[r.tx, r.ty, r.tw, r.th, r.objectness, r.class_score]);
    }
    feat
}

pub fn proposal(x: f32, y: f32, w: f32, h: f32, confidence: f32) -> Proposal {
    Proposal::new(RmBox::new(x, y, w, h), 0, confidence)
}
