use std::sync::Arc;
use std::thread::JoinHandle;
use crossbeam_channel::Receiver;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use crate::error::DetectError;

/// Values that may change while the detector runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuntimeParams {
    pub conf_threshold: f32,
    pub iou_threshold: f32,
    pub display: bool,
}

impl Default for RuntimeParams {
    fn default() -> Self {
        Self {
            conf_threshold: 0.1,
            iou_threshold: 0.1,
            display: true,
        }
    }
}

impl RuntimeParams {
    pub fn validate(&self) -> Result<(), DetectError> {
        for (name, v) in [("conf_threshold", self.conf_threshold), ("iou_threshold", self.iou_threshold)] {
            if !(0.0..=1.0).contains(&v) {
                return Err(DetectError::Config(format!("{name} must be in [0, 1], got {v}")));
            }
        }
        Ok(())
    }
}

/// Shared handle to the current [`RuntimeParams`].
///
/// Updates replace the whole value; readers take one snapshot per frame and
/// never observe a half-applied change.
#[derive(Debug, Clone, Default)]
pub struct SharedParams {
    inner: Arc<RwLock<Arc<RuntimeParams>>>,
}

impl SharedParams {
    pub fn new(params: RuntimeParams) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(params))),
        }
    }

    pub fn snapshot(&self) -> Arc<RuntimeParams> {
        self.inner.read().clone()
    }

    /// Replaces the current parameters. Invalid values are refused and the
    /// previous ones stay in effect.
    pub fn update(&self, params: RuntimeParams) -> Result<(), DetectError> {
        params.validate()?;
        *self.inner.write() = Arc::new(params);
        log::info!(
            "Changes have been set: conf={} iou={} display={}",
            params.conf_threshold, params.iou_threshold, params.display
        );
        Ok(())
    }

    /// Applies every update received on `rx` until the sender side is dropped.
    pub fn spawn_reconfigure_listener(&self, rx: Receiver<RuntimeParams>) -> JoinHandle<()> {
        let shared = self.clone();
        std::thread::spawn(move || {
            for params in rx.iter() {
                if let Err(e) = shared.update(params) {
                    log::warn!("Ignoring reconfiguration: {e}");
                }
            }
        })
    }
}
