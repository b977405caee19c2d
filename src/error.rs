use std::path::PathBuf;
use std::time::Duration;

/// Failure classes of the detector.
///
/// `Config`, `ModelNotFound` and `Inference` are fatal at startup or for the
/// running loop; an empty frame is never an error and is reported as zero
/// detections instead.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("model file not found: {0}")]
    ModelNotFound(PathBuf),

    #[error("inference backend failed: {0}")]
    Inference(#[source] anyhow::Error),

    #[error("inference did not finish within {0:?}")]
    InferenceTimeout(Duration),

    #[error("output tensor has {actual} values, expected {expected}")]
    TensorShape { expected: usize, actual: usize },

    #[error("{detections} detections but only {channels} output channels")]
    Capacity { detections: usize, channels: usize },

    #[error("image error: {0}")]
    Image(String),

    #[error("{0} channel closed")]
    ChannelClosed(&'static str),
}
