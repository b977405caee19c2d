use ndarray::{Array, IxDyn};
use crate::error::DetectError;

/// Model input, wrapper over [`Array<f32, IxDyn>`]
#[derive(Debug, Clone, Default)]
pub struct X(pub Array<f32, IxDyn>);

impl From<Array<f32, IxDyn>> for X {
    fn from(x: Array<f32, IxDyn>) -> Self {
        Self(x)
    }
}

impl std::ops::Deref for X {
    type Target = Array<f32, IxDyn>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl X {
    pub fn from_shape_vec(shape: &[usize], xs: Vec<f32>) -> Result<Self, DetectError> {
        Array::from_shape_vec(shape, xs)
            .map(Self::from)
            .map_err(|e| DetectError::Image(format!("bad input tensor shape {shape:?}: {e}")))
    }
}
