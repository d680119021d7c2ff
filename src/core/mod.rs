//! # Core Module
//!
//! The GUI-agnostic face obscuring engine.
//!
//! ## Modules
//! - `resolver` - Turns an input/output path pair into per-image jobs
//! - `detector` - Face detection trait and the SeetaFace backend
//! - `transform` - Blur and pixelate strategies for face regions
//! - `obscurer` - Processes one image: decode, detect, transform, encode
//! - `pipeline` - Orchestrates the full workflow

pub mod detector;
pub mod obscurer;
pub mod pipeline;
pub mod resolver;
pub mod transform;

// Re-export commonly used types
pub use detector::{DetectorConfig, FaceDetector, FaceRegion};
pub use obscurer::{ObscureOutcome, Obscurer};
pub use pipeline::{BatchResult, Pipeline, PipelineBuilder};
pub use resolver::ImageJob;
pub use transform::{FaceTransform, GaussianBlur, Pixelate, TransformKind};
