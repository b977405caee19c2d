use image::RgbImage;
use crate::common::{RmDetection, RmImage};

/// Detector side of the frame / result channels.
#[derive(Debug)]
pub struct DetectionState {
    pub opt_rx: crossbeam_channel::Receiver<Box<RmImage>>,
    pub det_tx: crossbeam_channel::Sender<Box<Vec<RmDetection>>>,
    pub img_tx: Option<crossbeam_channel::Sender<Box<RgbImage>>>,
}

/// Caller side of the frame / result channels.
#[derive(Debug)]
pub struct SendState {
    pub opt_tx: crossbeam_channel::Sender<Box<RmImage>>,
    pub det_rx: crossbeam_channel::Receiver<Box<Vec<RmDetection>>>,
    pub img_rx: crossbeam_channel::Receiver<Box<RgbImage>>,
}

/// Creates a connected pair. Frames are bounded to one in flight so a slow
/// detector drops nothing silently; the sender blocks instead.
pub fn detection_channels() -> (SendState, DetectionState) {
    let (opt_tx, opt_rx) = crossbeam_channel::bounded(1);
    let (det_tx, det_rx) = crossbeam_channel::unbounded();
    let (img_tx, img_rx) = crossbeam_channel::unbounded();
    (
        SendState { opt_tx, det_rx, img_rx },
        DetectionState { opt_rx, det_tx, img_tx: Some(img_tx) },
    )
}
