//! # Error Module
//!
//! User-friendly error types for the face anonymizer.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Isolate per-image failures** - a broken file is reported, not fatal
//! - **Fail fast on configuration** - detector problems abort before any image

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum ObscureError {
    #[error("Path resolution error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Face detector error: {0}")]
    Detector(#[from] DetectorError),

    #[error("Image processing error: {0}")]
    Process(#[from] ProcessError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur while resolving input and output paths
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Input path not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Failed to create output directory {path}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while loading the face detector
///
/// These are configuration errors: fatal, reported once, and checked
/// before any image is processed.
#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Detector model not found: {path}. Pass --model or set FACE_MODEL.")]
    ModelNotFound { path: PathBuf },

    #[error("Failed to load detector model {path}: {reason}")]
    ModelRead { path: PathBuf, reason: String },
}

/// Errors that occur while processing a single image
///
/// In directory mode these are reported per file and the batch continues.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Failed to encode image {path}: {reason}")]
    Encode { path: PathBuf, reason: String },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, ObscureError>;
