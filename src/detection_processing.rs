//! Post-processing of the raw head output: anchors, decoding, ordering,
//! suppression and mapping back to the source frame.

mod decode;
mod finalize;
mod grid;
mod nms;
mod sort;

pub use decode::{generate_proposals, BOX_FIELDS};
pub use finalize::finalize_detections;
pub use grid::{generate_grids_and_strides, GridAnchor, DEFAULT_STRIDES};
pub use nms::{nms_sorted_bboxes, Nms};
pub use sort::{qsort_descent_inplace, PARALLEL_CUTOFF};

use crate::common::RmDetection;
use crate::data::RuntimeParams;
use crate::error::DetectError;

/// Where the letterboxed content sits, as needed to map boxes back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGeometry {
    pub scale: f32,
    pub image_width: u32,
    pub image_height: u32,
}

/// Runs decode, sort, suppression and finalization on one output tensor.
///
/// `params` is the snapshot taken for this frame; both thresholds are read
/// from it exactly once. Frames without a proposal above threshold return
/// an empty list.
pub fn process_predictions(
    anchors: &[GridAnchor],
    feat: &[f32],
    num_classes: usize,
    geometry: FrameGeometry,
    params: &RuntimeParams,
) -> Result<Vec<RmDetection>, DetectError> {
    let conf_threshold = params.conf_threshold;
    let iou_threshold = params.iou_threshold;

    let mut proposals = generate_proposals(anchors, feat, num_classes, conf_threshold)?;
    if proposals.is_empty() {
        return Ok(Vec::new());
    }
    qsort_descent_inplace(&mut proposals);

    let picked = nms_sorted_bboxes(&proposals, iou_threshold);

    Ok(finalize_detections(
        &proposals,
        &picked,
        geometry.image_width,
        geometry.image_height,
        geometry.scale,
    ))
}
