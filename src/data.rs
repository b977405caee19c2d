mod runtime_params;
mod send_channels;
mod time_calc;

pub use runtime_params::{RuntimeParams, SharedParams};
pub use send_channels::{detection_channels, DetectionState, SendState};
pub use time_calc::TimeCalc;

pub use crate::detection_runners::ort_detector::input_wrapper::X;
