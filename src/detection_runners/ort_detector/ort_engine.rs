//! ONNX Runtime implementation of the inference backend.

use std::time::Instant;
use anyhow::Result;
use ort::{
    execution_providers::{CPUExecutionProvider, CUDAExecutionProvider, ExecutionProvider},
    session::{builder::GraphOptimizationLevel, Session},
};
use crate::common::{InferenceDevice, ModelConfig};
use crate::data::{TimeCalc, X};
use crate::detection_runners::InferenceBackend;

/// ONNXRuntime Backend
#[derive(Debug)]
pub struct OrtEngine {
    session: Session,
    device: InferenceDevice,
    input_name: String,
    output_name: String,
    pub infer_time: TimeCalc,
}

impl OrtEngine {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        config.check_weights()?;

        if let Some(lib_path) = &config.ort_lib_path {
            ort::init_from(lib_path.to_string_lossy().to_string())
                .commit()
                .map_err(|e| anyhow::anyhow!("Failed to commit ORT: {e:?}"))?;
        }

        let mut builder = Session::builder()?;
        let mut device = config.inference_device;
        match device {
            InferenceDevice::CUDA(device_id) => {
                let cuda = CUDAExecutionProvider::default().with_device_id(device_id as i32);
                match cuda.is_available() {
                    Ok(true) => {
                        builder = builder.with_execution_providers([cuda.build()])?;
                        log::info!("CUDA device {device_id} successfully registered");
                    }
                    _ => {
                        log::warn!("CUDA execution provider unavailable, Using cpu");
                        device = InferenceDevice::CPU;
                    }
                }
            }
            InferenceDevice::CPU => {}
        }
        if device == InferenceDevice::CPU {
            builder = builder.with_execution_providers([CPUExecutionProvider::default().build()])?;
        }

        let session = builder
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_file(&config.weights_path)?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .ok_or_else(|| anyhow::anyhow!("model has no inputs"))?;
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| anyhow::anyhow!("model has no outputs"))?;

        log::info!(
            "Backend: ONNXRuntime | Device: {} | Input: {} | Output: {}",
            device, input_name, output_name,
        );

        Ok(Self {
            session,
            device,
            input_name,
            output_name,
            infer_time: TimeCalc::default(),
        })
    }

    pub fn device(&self) -> InferenceDevice {
        self.device
    }
}

impl InferenceBackend for OrtEngine {
    fn infer(&mut self, input: &X) -> Result<Vec<f32>> {
        let t = Instant::now();
        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => input.view()]?)?;
        let output = outputs[self.output_name.as_str()].try_extract_tensor::<f32>()?;
        let raw: Vec<f32> = output.iter().copied().collect();
        self.infer_time.add_or_push(0, t.elapsed());
        log::trace!("ORT run {:?} | avg {:?}", t.elapsed(), self.infer_time.avg());
        Ok(raw)
    }
}
