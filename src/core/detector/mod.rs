//! # Detector Module
//!
//! Face detection behind a capability interface.
//!
//! The pipeline only ever sees the [`FaceDetector`] trait, so the
//! concrete engine can be swapped (or stubbed in tests) without touching
//! the obscuring logic. The built-in backend is [`SeetaDetector`], a
//! pure-Rust SeetaFace cascade from the `rustface` crate.

mod seeta;

pub use seeta::SeetaDetector;

use serde::{Deserialize, Serialize};

/// Bounding box of a detected face, in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceRegion {
    /// X coordinate of the top-left corner
    pub x: u32,
    /// Y coordinate of the top-left corner
    pub y: u32,
    /// Width of the bounding box
    pub width: u32,
    /// Height of the bounding box
    pub height: u32,
}

/// Detection tuning parameters
///
/// These are the canonical cascade-detector knobs; how a backend maps
/// them onto its engine is its own business.
#[derive(Debug, Clone, Copy)]
pub struct DetectorConfig {
    /// Scan-step granularity between image pyramid levels
    pub scale_factor: f32,
    /// Detection sensitivity threshold (higher = fewer false positives)
    pub min_neighbors: u32,
    /// Smallest detectable face, in pixels (square floor)
    pub min_size: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            scale_factor: 1.1,
            min_neighbors: 5,
            min_size: 30,
        }
    }
}

/// Pluggable face detection backend
///
/// Implement this trait to provide a custom detector (ONNX, dlib, a
/// test stub) and pass it to the pipeline builder.
pub trait FaceDetector: Send + Sync {
    /// Detect faces in a row-major grayscale buffer of `width` x `height` bytes.
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<FaceRegion>;
}
