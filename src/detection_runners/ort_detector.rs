mod ort_engine;
pub mod image_ops;
pub mod input_wrapper;

pub use ort_engine::*;
