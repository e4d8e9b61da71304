//! Primary classifier adapter around an ONNX image model.
//!
//! The predictor's label space is foreign to the species catalog, so its
//! output never indexes the catalog; the lifecycle manager only uses this
//! path's availability before handing species selection to the heuristic
//! scorer.

use crate::constants::{APP_NAME, MODEL_INPUT_SIZE};
use crate::error::{Error, Result};
use crate::imaging::PixelBuffer;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::Tensor;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

/// Raw output of one forward pass.
#[derive(Debug, Clone, Copy)]
pub struct RawPrediction {
    /// Arg-max output unit.
    pub class_index: usize,
    /// Value of the arg-max unit.
    pub probability: f32,
}

/// A loaded predictive model that can score one image.
///
/// The trait is the seam between model acquisition and request routing, so
/// the lifecycle manager can be exercised without model files on disk.
pub trait Predictor: Send + Sync {
    /// Run a forward pass over the image.
    fn predict(&self, image: &PixelBuffer) -> Result<RawPrediction>;
}

/// ONNX Runtime implementation of [`Predictor`].
pub struct OnnxPredictor {
    session: Mutex<Session>,
    input_size: u32,
}

impl OnnxPredictor {
    /// Load a session from an ONNX model file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ModelFileNotFound {
                path: path.to_path_buf(),
            });
        }

        ort::init()
            .with_name(APP_NAME)
            .commit()
            .map_err(|e| Error::RuntimeInitialization {
                reason: e.to_string(),
            })?;

        let session = Session::builder()
            .and_then(|builder| builder.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|builder| builder.commit_from_file(path))
            .map_err(|e| Error::ModelLoad {
                reason: e.to_string(),
            })?;

        info!("Loaded model: {}", path.display());

        Ok(Self {
            session: Mutex::new(session),
            input_size: MODEL_INPUT_SIZE,
        })
    }
}

impl Predictor for OnnxPredictor {
    fn predict(&self, image: &PixelBuffer) -> Result<RawPrediction> {
        if image.is_empty() {
            return Err(Error::Inference {
                reason: "empty pixel buffer".to_string(),
            });
        }

        let pixels = preprocess(image, self.input_size);
        let size = i64::from(self.input_size);
        let input =
            Tensor::from_array(([1, size, size, 3], pixels)).map_err(|e| Error::Inference {
                reason: e.to_string(),
            })?;

        let mut session = self.session.lock().map_err(|_| Error::Inference {
            reason: "model session lock poisoned".to_string(),
        })?;

        let outputs = session
            .run(ort::inputs![input])
            .map_err(|e| Error::Inference {
                reason: e.to_string(),
            })?;

        let (_, values) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::Inference {
                reason: e.to_string(),
            })?;

        if values.is_empty() {
            return Err(Error::Inference {
                reason: "model produced an empty output tensor".to_string(),
            });
        }

        let (class_index, probability) = values
            .iter()
            .copied()
            .enumerate()
            .fold((0_usize, f32::NEG_INFINITY), |best, (index, value)| {
                if value > best.1 { (index, value) } else { best }
            });

        debug!("Forward pass: class {class_index} at {probability:.4}");

        Ok(RawPrediction {
            class_index,
            probability,
        })
    }
}

/// Resample the buffer to the model's square input resolution and normalize
/// channels to `[0, 1]`, NHWC layout.
fn preprocess(image: &PixelBuffer, size: u32) -> Vec<f32> {
    let mut data = Vec::with_capacity(size as usize * size as usize * 3);

    for y in 0..size {
        #[allow(clippy::cast_possible_truncation)]
        let src_y = (u64::from(y) * u64::from(image.height()) / u64::from(size)) as u32;
        for x in 0..size {
            #[allow(clippy::cast_possible_truncation)]
            let src_x = (u64::from(x) * u64::from(image.width()) / u64::from(size)) as u32;
            let [r, g, b] = image.pixel(src_x, src_y);
            data.push(f32::from(r) / 255.0);
            data.push(f32::from(g) / 255.0);
            data.push(f32::from(b) / 255.0);
        }
    }

    data
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_output_shape() {
        let buffer = PixelBuffer::new(2, 2, vec![255; 12]).unwrap();
        let data = preprocess(&buffer, 4);
        assert_eq!(data.len(), 4 * 4 * 3);
    }

    #[test]
    fn test_preprocess_normalizes_channels() {
        let buffer = PixelBuffer::new(1, 1, vec![0, 128, 255]).unwrap();
        let data = preprocess(&buffer, 2);

        assert_eq!(data[0], 0.0);
        assert!((data[1] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(data[2], 1.0);
    }

    #[test]
    fn test_preprocess_nearest_neighbor_downsample() {
        // 4x4 image with distinct quadrant colors downsampled to 2x2 keeps one
        // sample per quadrant.
        let mut data = Vec::new();
        for _row in 0..4 {
            for x in 0..4_u8 {
                let value = if x < 2 { 10 } else { 200 };
                data.extend_from_slice(&[value, value, value]);
            }
        }
        let buffer = PixelBuffer::new(4, 4, data).unwrap();

        let resampled = preprocess(&buffer, 2);
        assert!((resampled[0] - 10.0 / 255.0).abs() < 1e-6);
        assert!((resampled[3] - 200.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_load_missing_model_file_errors() {
        let result = OnnxPredictor::load(Path::new("/nonexistent/model.onnx"));
        assert!(matches!(result, Err(Error::ModelFileNotFound { .. })));
    }
}
