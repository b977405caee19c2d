use image::DynamicImage;

/// One camera frame as it enters the detector.
#[derive(Debug, Clone)]
pub struct RmImage {
    pub image: DynamicImage,
    pub frame_id: u64,
}

impl RmImage {
    pub fn new(image: DynamicImage, frame_id: u64) -> Self {
        Self { image, frame_id }
    }
}
