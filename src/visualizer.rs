use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use crate::common::RmDetection;

pub const BOX_COLOUR: Rgb<u8> = Rgb([0, 0, 255]);
const BOX_THICKNESS: i32 = 2;

/// Draws each detection box onto `image`, which must be in network-input
/// space (the letterboxed frame).
pub fn draw_objects(image: &mut RgbImage, detections: &[RmDetection]) {
    for det in detections {
        let (x, y, w, h) = det.bbox.as_xy_wh_i32();
        for t in 0..BOX_THICKNESS {
            let (rw, rh) = (w - 2 * t, h - 2 * t);
            if rw <= 0 || rh <= 0 {
                break;
            }
            let rect = Rect::at(x + t, y + t).of_size(rw as u32, rh as u32);
            draw_hollow_rect_mut(image, rect, BOX_COLOUR);
        }
    }
}
