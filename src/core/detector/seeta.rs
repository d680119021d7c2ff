//! Face detector backed by the `rustface` crate (SeetaFace engine).

use super::{DetectorConfig, FaceDetector, FaceRegion};
use crate::error::DetectorError;
use std::path::Path;

/// Score threshold the engine uses at the default `min_neighbors` of 5.
const BASE_SCORE_THRESH: f64 = 1.0;
const SCORE_PER_NEIGHBOR: f64 = 0.2;

/// Face detector backed by the SeetaFace frontal-face cascade.
///
/// The model is read from disk exactly once, when the detector is
/// constructed; a missing or corrupt model file is a fatal configuration
/// error surfaced before any image is processed.
pub struct SeetaDetector {
    model: rustface::Model,
    config: DetectorConfig,
}

impl SeetaDetector {
    /// Load the SeetaFace model from `path` with the given tuning.
    pub fn from_file(path: &Path, config: DetectorConfig) -> Result<Self, DetectorError> {
        let model_data = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DetectorError::ModelNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                DetectorError::ModelRead {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        })?;

        let model = rustface::read_model(std::io::Cursor::new(model_data)).map_err(|e| {
            DetectorError::ModelRead {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self { model, config })
    }

    /// SeetaFace walks the pyramid downward, so the classic `scaleFactor`
    /// (>1) maps onto its reciprocal, clamped to the engine's valid range.
    fn pyramid_scale(&self) -> f32 {
        (1.0 / self.config.scale_factor.max(1.01)).clamp(0.1, 0.99)
    }

    /// SeetaFace has no neighbor-voting stage; `min_neighbors` maps onto
    /// its score threshold instead (default 5 lands on the engine's
    /// stock threshold of 2.0).
    fn score_thresh(&self) -> f64 {
        BASE_SCORE_THRESH + SCORE_PER_NEIGHBOR * f64::from(self.config.min_neighbors)
    }
}

impl FaceDetector for SeetaDetector {
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<FaceRegion> {
        // The rustface detector mutates internal scratch state, so a fresh
        // one is built per call from the shared model.
        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(self.config.min_size);
        detector.set_score_thresh(self.score_thresh());
        detector.set_pyramid_scale_factor(self.pyramid_scale());
        detector.set_slide_window_step(4, 4);

        let faces = detector.detect(&rustface::ImageData::new(gray, width, height));

        faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceRegion {
                    // The engine can report slightly negative corners at
                    // image borders
                    x: bbox.x().max(0) as u32,
                    y: bbox.y().max(0) as u32,
                    width: bbox.width(),
                    height: bbox.height(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_model_file_is_model_not_found() {
        let result = SeetaDetector::from_file(
            Path::new("/nonexistent/seeta_fd_frontal_v1.0.bin"),
            DetectorConfig::default(),
        );

        assert!(matches!(result, Err(DetectorError::ModelNotFound { .. })));
    }

    #[test]
    fn garbage_model_file_is_model_read_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"this is not a seetaface model").unwrap();

        let result = SeetaDetector::from_file(file.path(), DetectorConfig::default());

        assert!(matches!(result, Err(DetectorError::ModelRead { .. })));
    }
}
