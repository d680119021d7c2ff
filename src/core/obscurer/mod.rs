//! # Obscurer Module
//!
//! Processes one image end to end: decode, detect faces, obscure each
//! face region, encode to the output path.
//!
//! The detector is loaded once per run and shared; the obscurer never
//! re-acquires it. Per-image failures (unreadable files, unsupported
//! formats) are returned to the caller so a directory batch can skip the
//! file and keep going.

use crate::core::detector::{FaceDetector, FaceRegion};
use crate::core::resolver::ImageJob;
use crate::core::transform::FaceTransform;
use crate::error::ProcessError;
use crate::events::{Event, EventSender, ObscureEvent};
use image::{imageops, RgbImage};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Result of obscuring one image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObscureOutcome {
    /// The source image
    pub input: PathBuf,
    /// Where the obscured image was written
    pub output: PathBuf,
    /// Number of faces obscured
    pub faces: usize,
}

/// Obscures faces in single images
pub struct Obscurer {
    detector: Arc<dyn FaceDetector>,
    transform: Box<dyn FaceTransform>,
}

impl Obscurer {
    /// Create an obscurer from a loaded detector and a transform strategy.
    pub fn new(detector: Arc<dyn FaceDetector>, transform: Box<dyn FaceTransform>) -> Self {
        Self {
            detector,
            transform,
        }
    }

    /// Process one image job.
    ///
    /// An image with zero detected faces is still written, unmodified,
    /// to the output path.
    pub fn process(
        &self,
        job: &ImageJob,
        events: &EventSender,
    ) -> Result<ObscureOutcome, ProcessError> {
        events.send(Event::Obscure(ObscureEvent::Started {
            path: job.input.clone(),
        }));

        let decoded = image::open(&job.input).map_err(|e| ProcessError::Decode {
            path: job.input.clone(),
            reason: e.to_string(),
        })?;

        // The color buffer is what gets mutated and saved; the grayscale
        // view exists only for detection
        let mut buffer = decoded.into_rgb8();
        let gray = imageops::grayscale(&buffer);
        let (width, height) = buffer.dimensions();

        let faces = self.detector.detect(gray.as_raw(), width, height);

        events.send(Event::Obscure(ObscureEvent::FacesDetected {
            path: job.input.clone(),
            count: faces.len(),
        }));
        tracing::debug!(
            "detected {} face(s) in {}",
            faces.len(),
            job.input.display()
        );

        // Regions are applied in detection order; on overlap the last
        // write wins
        for face in &faces {
            let Some(region) = clamp_region(*face, width, height) else {
                continue;
            };

            let sub = imageops::crop_imm(&buffer, region.x, region.y, region.width, region.height)
                .to_image();
            let obscured = self.transform.apply(&sub);
            debug_assert_eq!(obscured.dimensions(), (region.width, region.height));

            imageops::replace(&mut buffer, &obscured, i64::from(region.x), i64::from(region.y));
        }

        save_buffer(&buffer, &job.output)?;

        events.send(Event::Obscure(ObscureEvent::Saved {
            path: job.output.clone(),
            faces: faces.len(),
        }));

        Ok(ObscureOutcome {
            input: job.input.clone(),
            output: job.output.clone(),
            faces: faces.len(),
        })
    }
}

/// Clamp a detected region to the image bounds.
///
/// Detectors can report boxes that spill a few pixels past the border.
/// Returns `None` for regions entirely outside the image or with zero
/// area after clamping.
fn clamp_region(region: FaceRegion, image_width: u32, image_height: u32) -> Option<FaceRegion> {
    if region.x >= image_width || region.y >= image_height {
        return None;
    }

    let width = region.width.min(image_width - region.x);
    let height = region.height.min(image_height - region.y);

    if width == 0 || height == 0 {
        return None;
    }

    Some(FaceRegion {
        x: region.x,
        y: region.y,
        width,
        height,
    })
}

fn save_buffer(buffer: &RgbImage, path: &PathBuf) -> Result<(), ProcessError> {
    // Format is inferred from the output extension
    buffer.save(path).map_err(|e| ProcessError::Encode {
        path: path.clone(),
        reason: e.to_string(),
    })
}
