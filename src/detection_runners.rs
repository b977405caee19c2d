pub mod inference_process;
pub mod inference_worker;
pub mod ort_detector;
mod yolox;

pub use inference_process::{InferenceBackend, InferenceProcess};
pub use inference_worker::InferenceWorker;
pub use ort_detector::*;
pub use yolox::*;
