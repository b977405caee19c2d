use crate::common::Proposal;
use crate::detection_processing::GridAnchor;
use crate::error::DetectError;

/// Number of values per anchor ahead of the class scores:
/// `tx, ty, tw, th, objectness`.
pub const BOX_FIELDS: usize = 5;

/// Decodes the raw head output into proposals above `prob_threshold`.
///
/// `feat` is anchor-major: anchor `i` owns
/// `feat[i * (num_classes + 5)..(i + 1) * (num_classes + 5)]`. Boxes are
/// `x = (tx + grid_x) * stride`, `w = exp(tw) * stride`, stored by top-left
/// corner. The comparison is strict, so a score equal to the threshold is
/// dropped. Output order is anchor order, then class order.
pub fn generate_proposals(
    anchors: &[GridAnchor],
    feat: &[f32],
    num_classes: usize,
    prob_threshold: f32,
) -> Result<Vec<Proposal>, DetectError> {
    if anchors.is_empty() {
        return Ok(Vec::new());
    }
    let step = num_classes + BOX_FIELDS;
    let expected = anchors.len() * step;
    if feat.len() != expected {
        return Err(DetectError::TensorShape { expected, actual: feat.len() });
    }

    let mut proposals = Vec::new();
    for (anchor, row) in anchors.iter().zip(feat.chunks_exact(step)) {
        let stride = anchor.stride as f32;
        let box_objectness = row[4];

        let mut bbox = None;
        for (class_id, &box_cls_score) in row[BOX_FIELDS..].iter().enumerate() {
            let box_prob = box_objectness * box_cls_score;
            if box_prob > prob_threshold {
                let (x0, y0, w, h) = *bbox.get_or_insert_with(|| {
                    let x_center = (row[0] + anchor.grid_x as f32) * stride;
                    let y_center = (row[1] + anchor.grid_y as f32) * stride;
                    let w = row[2].exp() * stride;
                    let h = row[3].exp() * stride;
                    (x_center - w * 0.5, y_center - h * 0.5, w, h)
                });
                proposals.push(
                    Proposal::default()
                        .with_x1y1_wh(x0, y0, w, h)
                        .with_class_id(class_id)
                        .with_confidence(box_prob),
                );
            }
        }
    }

    Ok(proposals)
}
