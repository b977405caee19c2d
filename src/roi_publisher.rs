use crossbeam_channel::{Receiver, Sender};
use crate::common::{CameraModel, OverflowPolicy, RmDetection, RoiData};
use crate::error::DetectError;

/// Sends one [`RoiData`] per detection, detection `i` on channel `i`.
#[derive(Debug)]
pub struct RoiPublisher {
    camera: CameraModel,
    channels: Vec<(String, Sender<RoiData>)>,
    policy: OverflowPolicy,
}

impl RoiPublisher {
    pub fn new(camera: CameraModel, channels: Vec<(String, Sender<RoiData>)>, policy: OverflowPolicy) -> Self {
        Self { camera, channels, policy }
    }

    /// Creates one unbounded channel per name and returns the receivers in
    /// the same order.
    pub fn with_names(camera: CameraModel, names: &[String], policy: OverflowPolicy) -> (Self, Vec<Receiver<RoiData>>) {
        let (channels, receivers): (Vec<_>, Vec<_>) = names
            .iter()
            .map(|name| {
                let (tx, rx) = crossbeam_channel::unbounded();
                ((name.clone(), tx), rx)
            })
            .unzip();
        (Self::new(camera, channels, policy), receivers)
    }

    pub fn capacity(&self) -> usize {
        self.channels.len()
    }

    pub fn to_roi(&self, channel: &str, det: &RmDetection) -> RoiData {
        let [l, r] = self.camera.undistort_points(det.corners);
        RoiData {
            channel: channel.to_string(),
            data: [l.x, l.y, r.x, r.y],
        }
    }

    /// Publishes `detections` (highest confidence first) and returns how many
    /// messages were sent.
    pub fn publish(&self, detections: &[RmDetection]) -> Result<usize, DetectError> {
        let capacity = self.capacity();
        if detections.len() > capacity {
            match self.policy {
                OverflowPolicy::Reject => {
                    return Err(DetectError::Capacity { detections: detections.len(), channels: capacity });
                }
                OverflowPolicy::Truncate => {
                    log::warn!(
                        "{} detections but only {} roi channels, dropping the lowest {}",
                        detections.len(), capacity, detections.len() - capacity
                    );
                }
            }
        }

        let mut sent = 0;
        for (det, (name, tx)) in detections.iter().zip(&self.channels) {
            tx.send(self.to_roi(name, det))
                .map_err(|_| DetectError::ChannelClosed("roi"))?;
            sent += 1;
        }
        Ok(sent)
    }
}
