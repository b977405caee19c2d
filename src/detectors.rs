use std::time::Instant;
use crate::data::DetectionState;
use crate::detection_runners::{InferenceProcess, YoloX};
use crate::error::DetectError;
use crate::roi_publisher::RoiPublisher;
use crate::utils;

/// Frame loop: one frame is handled end to end before the next is taken.
///
/// Returns `Ok(())` once the frame sender is dropped. Inference failures,
/// timeouts and rejected overflows end the loop with the error.
pub fn detector_loop(is_test: bool, detection_state: DetectionState, yolo: &mut YoloX, publisher: &RoiPublisher) -> Result<(), DetectError> {
    loop {
        // MESSAGE LOOP STARTS HERE
        let rm_image = match detection_state.opt_rx.recv() {
            Ok(msg) => msg,
            Err(_) => {
                // every sender dropped: normal shutdown
                log::info!("rm_detect: frame channel closed, stopping detector loop");
                break;
            }
        };
        let detect_time = Instant::now();
        let mut _detect_elapsed = detect_time.elapsed();

        let output = yolo.forward(&rm_image, is_test)?;
        _detect_elapsed = utils::trace(is_test, "TIME", "Pipeline", detect_time, _detect_elapsed);

        let sent = publisher.publish(&output.detections)?;
        log::trace!("frame {}: {} detections, {} roi messages", rm_image.frame_id, output.detections.len(), sent);

        if let (Some(img_tx), Some(image)) = (&detection_state.img_tx, output.annotated) {
            if img_tx.send(Box::new(image)).is_err() {
                log::error!("rm_detect: annotated image receiver dropped");
            }
        }

        detection_state
            .det_tx
            .send(Box::new(output.detections))
            .map_err(|_| DetectError::ChannelClosed("detection"))?;

        utils::trace(is_test, "TIME", "Publishing", detect_time, _detect_elapsed);
    }

    Ok(())
}
