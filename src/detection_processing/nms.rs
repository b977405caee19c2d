use crate::common::{Proposal, RmBox};

pub trait Nms {
    fn bbox(&self) -> &RmBox;
    fn confidence(&self) -> f32;
}

impl Nms for Proposal {
    fn bbox(&self) -> &RmBox {
        &self.bbox
    }

    fn confidence(&self) -> f32 {
        self.confidence
    }
}

/// Intersection over union from precomputed areas.
///
/// A non-positive union (two zero-area boxes) counts as no overlap.
fn iou(a: &RmBox, area_a: f32, b: &RmBox, area_b: f32) -> f32 {
    let inter_area = a.intersect(b);
    let union_area = area_a + area_b - inter_area;
    if union_area > 0. {
        inter_area / union_area
    } else {
        0.
    }
}

/// Greedy suppression over boxes already sorted by descending confidence.
///
/// Returns the indices of the kept boxes in input order. A candidate is
/// dropped when its IoU with any kept box is strictly above `nms_threshold`.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn nms_sorted_bboxes<T: Nms>(objects: &[T], nms_threshold: f32) -> Vec<usize> {
    let areas: Vec<f32> = objects.iter().map(|o| o.bbox().area()).collect();
    let mut picked: Vec<usize> = Vec::new();

    for (i, a) in objects.iter().enumerate() {
        // written as `!(x > t)` so a NaN IoU keeps the candidate
        let keep = picked
            .iter()
            .all(|&j| !(iou(a.bbox(), areas[i], objects[j].bbox(), areas[j]) > nms_threshold));

        if keep {
            picked.push(i);
        }
    }

    picked
}
