use crate::common::{Point2, Proposal, RmDetection};

/// Turns the kept proposals into detections, preserving `picked` order.
///
/// Every corner is clipped to `[0, image_width - 1] x [0, image_height - 1]`
/// and the size recomputed from the clipped corners, so it is never negative.
/// The corners are then moved back to source-frame pixels: the vertical
/// letterbox offset `|image_width - image_height| / 2` (integer division) is
/// subtracted from y and both coordinates are divided by `scale`.
pub fn finalize_detections(
    proposals: &[Proposal],
    picked: &[usize],
    image_width: u32,
    image_height: u32,
    scale: f32,
) -> Vec<RmDetection> {
    let max_x = image_width.saturating_sub(1) as f32;
    let max_y = image_height.saturating_sub(1) as f32;
    let vertical_offset = (image_width.abs_diff(image_height) / 2) as f32;

    picked
        .iter()
        .filter_map(|&i| proposals.get(i))
        .map(|obj| {
            let bbox = obj.bbox.clipped(max_x, max_y);
            let (x0, y0, x1, y1) = bbox.xy1_xy2();
            let corners = [
                Point2::new(x0 / scale, (y0 - vertical_offset) / scale),
                Point2::new(x1 / scale, (y1 - vertical_offset) / scale),
            ];
            RmDetection {
                bbox,
                class_id: obj.class_id,
                confidence: obj.confidence,
                corners,
            }
        })
        .collect()
}
