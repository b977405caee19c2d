use std::fmt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InferenceDevice {
    #[default] CPU,
    CUDA(usize),
}

// Hardcoded device names. Storing the "proper" spelling and the lowercase version.
const CPU: [&str; 2] = ["CPU", "cpu"];
const CUDA: [&str; 2] = ["CUDA", "cuda"];

impl InferenceDevice {
    /// Parses `cpu`, `cuda` or `cuda:<id>` (case-insensitive).
    pub fn from_str(device: &str) -> Option<Self> {
        let device = device.to_lowercase();
        let (name, id) = match device.split_once(':') {
            Some((name, id)) => (name, id.parse::<usize>().ok()?),
            None => (device.as_str(), 0),
        };
        match name {
            "cpu" => Some(InferenceDevice::CPU),
            "cuda" => Some(InferenceDevice::CUDA(id)),
            _ => None,
        }
    }

    pub fn str(&self) -> &'static str {
        match self {
            InferenceDevice::CPU => CPU[0],
            InferenceDevice::CUDA(_) => CUDA[0],
        }
    }

    pub fn str_lowercase(&self) -> &'static str {
        match self {
            InferenceDevice::CPU => CPU[1],
            InferenceDevice::CUDA(_) => CUDA[1],
        }
    }
}

impl fmt::Display for InferenceDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferenceDevice::CPU => write!(f, "{}", self.str_lowercase()),
            InferenceDevice::CUDA(id) => write!(f, "{}:{}", self.str_lowercase(), id),
        }
    }
}

impl Serialize for InferenceDevice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for InferenceDevice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        InferenceDevice::from_str(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown inference device `{s}`")))
    }
}
