use serde::{Deserialize, Serialize};
use crate::common::RmBox;

/// A candidate box decoded from one anchor and one class.
///
/// `confidence` is `objectness * class_score`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub bbox: RmBox,
    pub class_id: usize,
    pub confidence: f32,
}

impl Proposal {
    pub fn new(bbox: RmBox, class_id: usize, confidence: f32) -> Self {
        Self { bbox, class_id, confidence }
    }

    pub fn with_x1y1_wh(mut self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.bbox = RmBox::default().with_x1y1_wh(x, y, w, h);
        self
    }

    pub fn with_confidence(mut self, conf: f32) -> Self {
        self.confidence = conf;
        self
    }

    pub fn with_class_id(mut self, class_id: usize) -> Self {
        self.class_id = class_id;
        self
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A proposal that survived suppression.
///
/// `bbox` is clipped in network-input space; `corners` are its top-left and
/// bottom-right points mapped back to the source frame, ready for
/// undistortion.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RmDetection {
    pub bbox: RmBox,
    pub class_id: usize,
    pub confidence: f32,
    pub corners: [Point2; 2],
}

impl RmDetection {
    pub fn print_detection(&self) {
        println!(
            "Detection: Class: {}, BBox: {:?}, Confidence: {:.2}",
            self.class_id, self.bbox, self.confidence
        );
    }
}

/// One published region: the two undistorted, normalized corners as
/// `[x0, y0, x1, y1]`.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiData {
    pub channel: String,
    pub data: [f32; 4],
}
