//! Letterbox resize and input tensor layout.

use fast_image_resize::{images::Image as FirImage, pixels::PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::{Rgb, RgbImage};
use crate::detection_runners::input_wrapper::X;
use crate::error::DetectError;

/// Fill value of the canvas outside the resized frame.
pub const PAD_VALUE: u8 = 114;
/// Fill value of the border added above and below the frame before resizing.
pub const BORDER_VALUE: u8 = 122;

/// A frame resized into the network input.
#[derive(Debug, Clone)]
pub struct Letterbox {
    /// `target_w x target_h` canvas; the resized frame sits at its top-left.
    pub image: RgbImage,
    /// `min(target_w / src_w, target_h / src_h)`
    pub scale: f32,
    /// `trunc(src_w * scale)`
    pub resized_width: u32,
    /// `trunc(src_h * scale)`
    pub resized_height: u32,
}

fn to_fir_image<'a>(image: RgbImage) -> Result<FirImage<'a>, DetectError> {
    let (width, height) = image.dimensions();
    FirImage::from_vec_u8(width, height, image.into_raw(), PixelType::U8x3)
        .map_err(|e| DetectError::Image(format!("cannot wrap frame: {e}")))
}

/// Borders the frame, resizes it by the aspect ratio and pads to the
/// target size.
///
/// `|src_w - src_h| / 2` rows of [`BORDER_VALUE`] are added above and below
/// the frame first; the bordered frame is then resized to
/// `(trunc(src_w * scale), trunc(src_h * scale))` and copied to the top-left
/// of a [`PAD_VALUE`] canvas. The finalizer removes the same
/// `|w - h| / 2` offset from every y coordinate.
pub fn letterbox(img: RgbImage, target_w: u32, target_h: u32) -> Result<Letterbox, DetectError> {
    let (w0, h0) = img.dimensions();
    if w0 == 0 || h0 == 0 {
        return Err(DetectError::Image(format!("empty frame {w0}x{h0}")));
    }
    // f64 keeps `trunc(src * scale)` exact on the limiting side
    let scale = (target_w as f64 / w0 as f64).min(target_h as f64 / h0 as f64);
    let new_w = ((w0 as f64 * scale) as u32).clamp(1, target_w);
    let new_h = ((h0 as f64 * scale) as u32).clamp(1, target_h);

    let border = w0.abs_diff(h0) / 2;
    let mut bordered = RgbImage::from_pixel(w0, h0 + 2 * border, Rgb([BORDER_VALUE; 3]));
    image::imageops::replace(&mut bordered, &img, 0, border as i64);

    let src = to_fir_image(bordered)?;
    let mut dst = FirImage::new(new_w, new_h, PixelType::U8x3);
    let options = ResizeOptions::new().resize_alg(ResizeAlg::Nearest);
    Resizer::new()
        .resize(&src, &mut dst, &options)
        .map_err(|e| DetectError::Image(format!("resize failed: {e}")))?;
    let resized = RgbImage::from_raw(new_w, new_h, dst.into_vec())
        .ok_or_else(|| DetectError::Image("resized buffer size mismatch".to_string()))?;

    let mut canvas = RgbImage::from_pixel(target_w, target_h, Rgb([PAD_VALUE; 3]));
    image::imageops::replace(&mut canvas, &resized, 0, 0);

    Ok(Letterbox {
        image: canvas,
        scale: scale as f32,
        resized_width: new_w,
        resized_height: new_h,
    })
}

/// Lays an RGB image out as a `1x3xHxW` tensor of raw `0..=255` values.
/// With `swap_rb` the channel order is BGR.
pub fn blob_from_image(img: &RgbImage, swap_rb: bool) -> Result<X, DetectError> {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let buf = img.as_raw();
    let hw = w * h;

    let mut out = vec![0.0f32; buf.len()];
    let (c0, c2) = if swap_rb { (2, 0) } else { (0, 2) };
    for i in 0..hw {
        out[i] = buf[3 * i + c0] as f32;
        out[i + hw] = buf[3 * i + 1] as f32;
        out[i + 2 * hw] = buf[3 * i + c2] as f32;
    }

    X::from_shape_vec(&[1, 3, h, w], out)
}
