//! # Pipeline Module
//!
//! Orchestrates the full obscuring workflow.
//!
//! ## Pipeline Stages
//! 1. **Resolve** - Turn the input/output pair into per-image jobs
//! 2. **Obscure** - Decode, detect, transform, and encode each image
//!
//! ## Failure Policy
//! Per-image failures are isolated: in directory mode a broken file is
//! reported and skipped, never aborting its siblings. Single-file mode
//! propagates its one failure. Detector loading happens in `build()`,
//! before any image is touched.
//!
//! ## Parallelism
//! Directory batches can optionally run over rayon; images are
//! independent, so no ordering dependency exists between them.

mod executor;

pub use executor::{BatchResult, Pipeline, PipelineBuilder};
