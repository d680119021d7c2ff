//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the anonymizer pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Path resolution events
    Resolve(ResolveEvent),
    /// Per-image obscuring events
    Obscure(ObscureEvent),
    /// Pipeline-level events
    Pipeline(PipelineEvent),
}

/// Events while resolving input paths into jobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ResolveEvent {
    /// Resolution has started
    Started { input: PathBuf, output: PathBuf },
    /// An image job was discovered
    JobFound { input: PathBuf },
    /// Resolution completed
    Completed { total_jobs: usize },
}

/// Events while obscuring a single image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ObscureEvent {
    /// Processing of one image has started
    Started { path: PathBuf },
    /// The detector returned its face rectangles for one image
    FacesDetected { path: PathBuf, count: usize },
    /// The obscured image was written
    Saved { path: PathBuf, faces: usize },
    /// An error occurred but the batch continues
    Error { path: PathBuf, message: String },
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// Pipeline has started
    Started,
    /// Pipeline completed
    Completed { summary: BatchSummary },
    /// Pipeline encountered a fatal error
    Error { message: String },
}

/// Summary of a completed batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of images successfully written
    pub processed: usize,
    /// Number of images skipped due to per-image errors
    pub skipped: usize,
    /// Total faces obscured across the batch
    pub total_faces: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}
