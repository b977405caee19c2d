use std::thread::JoinHandle;
use std::time::Duration;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use crate::data::X;
use crate::detection_runners::InferenceBackend;
use crate::error::DetectError;

type Reply = anyhow::Result<Vec<f32>>;

/// Runs a backend on its own thread so a call can be abandoned after a
/// timeout instead of blocking the frame loop forever.
///
/// After a timeout the worker counts as stalled: the late reply would belong
/// to an old frame, so every later call fails with the same error.
#[derive(Debug)]
pub struct InferenceWorker {
    req_tx: Option<Sender<X>>,
    res_rx: Receiver<Reply>,
    timeout: Duration,
    stalled: bool,
    handle: Option<JoinHandle<()>>,
}

impl InferenceWorker {
    pub fn spawn(mut backend: Box<dyn InferenceBackend>, timeout: Duration) -> Result<Self, DetectError> {
        let (req_tx, req_rx) = crossbeam_channel::bounded::<X>(1);
        let (res_tx, res_rx) = crossbeam_channel::bounded::<Reply>(1);

        let handle = std::thread::Builder::new()
            .name("rm-inference".to_string())
            .spawn(move || {
                for input in req_rx.iter() {
                    if res_tx.send(backend.infer(&input)).is_err() {
                        break;
                    }
                }
            })
            .map_err(|e| DetectError::Inference(anyhow::anyhow!("cannot spawn inference thread: {e}")))?;

        Ok(Self {
            req_tx: Some(req_tx),
            res_rx,
            timeout,
            stalled: false,
            handle: Some(handle),
        })
    }

    pub fn infer(&mut self, input: X) -> Result<Vec<f32>, DetectError> {
        if self.stalled {
            return Err(DetectError::InferenceTimeout(self.timeout));
        }
        let req_tx = self.req_tx.as_ref().ok_or(DetectError::ChannelClosed("inference request"))?;
        req_tx
            .send(input)
            .map_err(|_| DetectError::ChannelClosed("inference request"))?;

        match self.res_rx.recv_timeout(self.timeout) {
            Ok(reply) => reply.map_err(DetectError::Inference),
            Err(RecvTimeoutError::Timeout) => {
                log::error!("Inference backend did not answer within {:?}", self.timeout);
                self.stalled = true;
                Err(DetectError::InferenceTimeout(self.timeout))
            }
            Err(RecvTimeoutError::Disconnected) => Err(DetectError::ChannelClosed("inference result")),
        }
    }
}

impl Drop for InferenceWorker {
    fn drop(&mut self) {
        // closing the request channel ends the thread once the backend returns
        self.req_tx.take();
        if !self.stalled {
            if let Some(handle) = self.handle.take() {
                let _ = handle.join();
            }
        }
    }
}
