mod camera;
mod inference_device;
mod model_config;
mod rm_box;
mod rm_detection;
mod rm_image;

pub use camera::*;
pub use inference_device::*;
pub use model_config::*;
pub use rm_box::*;
pub use rm_detection::*;
pub use rm_image::*;
