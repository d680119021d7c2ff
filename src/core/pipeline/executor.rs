//! Pipeline execution implementation.

use crate::core::detector::{DetectorConfig, FaceDetector, SeetaDetector};
use crate::core::obscurer::{ObscureOutcome, Obscurer};
use crate::core::resolver;
use crate::core::transform::{GaussianBlur, Pixelate, TransformKind};
use crate::error::{ObscureError, ProcessError};
use crate::events::{
    null_sender, BatchSummary, Event, EventSender, ObscureEvent, PipelineEvent,
};
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Result of pipeline execution
#[derive(Debug)]
pub struct BatchResult {
    /// Per-image outcomes for successfully written images
    pub outcomes: Vec<ObscureOutcome>,
    /// Number of images successfully written
    pub processed: usize,
    /// Number of images skipped due to per-image errors
    pub skipped: usize,
    /// Total faces obscured across the batch
    pub total_faces: usize,
    /// Errors encountered (non-fatal in directory mode)
    pub errors: Vec<String>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Configuration for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Input target: a single image file or a directory of images
    pub input: PathBuf,
    /// Output target: a file path or a directory, matching the input kind
    pub output: PathBuf,
    /// Which obscuring strategy to apply
    pub kind: TransformKind,
    /// Gaussian kernel size for the blur strategy
    pub blur_strength: u32,
    /// Intermediate grid size for the pixelate strategy
    pub pixel_size: u32,
    /// Detector tuning parameters
    pub detector_config: DetectorConfig,
    /// Process directory batches over rayon
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::new(),
            kind: TransformKind::Blur,
            blur_strength: GaussianBlur::DEFAULT_KERNEL,
            pixel_size: Pixelate::DEFAULT_GRID,
            detector_config: DetectorConfig::default(),
            parallel: false,
        }
    }
}

/// Builder for pipeline configuration
pub struct PipelineBuilder {
    config: PipelineConfig,
    detector: Option<Arc<dyn FaceDetector>>,
    model_path: Option<PathBuf>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            detector: None,
            model_path: None,
        }
    }

    /// Set the input target (file or directory)
    pub fn input(mut self, input: PathBuf) -> Self {
        self.config.input = input;
        self
    }

    /// Set the output target
    pub fn output(mut self, output: PathBuf) -> Self {
        self.config.output = output;
        self
    }

    /// Select the obscuring strategy
    pub fn transform(mut self, kind: TransformKind) -> Self {
        self.config.kind = kind;
        self
    }

    /// Set the Gaussian kernel size (normalized to odd at build time)
    pub fn blur_strength(mut self, kernel: u32) -> Self {
        self.config.blur_strength = kernel;
        self
    }

    /// Set the pixelation grid size
    pub fn pixel_size(mut self, grid: u32) -> Self {
        self.config.pixel_size = grid;
        self
    }

    /// Set detector tuning parameters
    pub fn detector_config(mut self, config: DetectorConfig) -> Self {
        self.config.detector_config = config;
        self
    }

    /// Provide an already-loaded detector (used by tests and embedders)
    pub fn detector(mut self, detector: Arc<dyn FaceDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Load the SeetaFace model from this path at build time
    pub fn model(mut self, path: PathBuf) -> Self {
        self.model_path = Some(path);
        self
    }

    /// Enable rayon for directory batches
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Build the pipeline, loading the detector model if one was not
    /// injected.
    ///
    /// This is the single configuration checkpoint: a missing or corrupt
    /// model fails here, before any image is processed.
    pub fn build(self) -> Result<Pipeline, ObscureError> {
        let detector: Arc<dyn FaceDetector> = match self.detector {
            Some(detector) => detector,
            None => {
                let path = self.model_path.ok_or_else(|| {
                    ObscureError::Config(
                        "no face detector configured: pass a model path or a detector".to_string(),
                    )
                })?;
                Arc::new(SeetaDetector::from_file(&path, self.config.detector_config)?)
            }
        };

        Ok(Pipeline {
            config: self.config,
            detector,
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The face obscuring pipeline
pub struct Pipeline {
    config: PipelineConfig,
    detector: Arc<dyn FaceDetector>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Run the pipeline without events
    pub fn run(&self) -> Result<BatchResult, ObscureError> {
        self.run_with_events(&null_sender())
    }

    /// Run the pipeline with event reporting
    pub fn run_with_events(&self, events: &EventSender) -> Result<BatchResult, ObscureError> {
        let start_time = Instant::now();

        events.send(Event::Pipeline(PipelineEvent::Started));

        let single_file = self.config.input.is_file();
        let jobs = resolver::resolve_with_events(&self.config.input, &self.config.output, events)?;

        if jobs.is_empty() {
            let duration_ms = start_time.elapsed().as_millis() as u64;
            events.send(Event::Pipeline(PipelineEvent::Completed {
                summary: BatchSummary {
                    processed: 0,
                    skipped: 0,
                    total_faces: 0,
                    duration_ms,
                },
            }));

            return Ok(BatchResult {
                outcomes: Vec::new(),
                processed: 0,
                skipped: 0,
                total_faces: 0,
                errors: Vec::new(),
                duration_ms,
            });
        }

        let obscurer = Obscurer::new(
            self.detector.clone(),
            self.config
                .kind
                .build(self.config.blur_strength, self.config.pixel_size),
        );

        let results: Vec<Result<ObscureOutcome, ProcessError>> = if self.config.parallel {
            jobs.par_iter()
                .map(|job| obscurer.process(job, events))
                .collect()
        } else {
            jobs.iter().map(|job| obscurer.process(job, events)).collect()
        };

        let mut outcomes = Vec::new();
        let mut errors = Vec::new();

        for (job, result) in jobs.iter().zip(results) {
            match result {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    // Fatal when there is no batch to keep alive
                    if single_file {
                        events.send(Event::Pipeline(PipelineEvent::Error {
                            message: e.to_string(),
                        }));
                        return Err(e.into());
                    }

                    events.send(Event::Obscure(ObscureEvent::Error {
                        path: job.input.clone(),
                        message: e.to_string(),
                    }));
                    tracing::warn!("skipping {}: {}", job.input.display(), e);
                    errors.push(e.to_string());
                }
            }
        }

        let duration_ms = start_time.elapsed().as_millis() as u64;
        let summary = BatchSummary {
            processed: outcomes.len(),
            skipped: errors.len(),
            total_faces: outcomes.iter().map(|o| o.faces).sum(),
            duration_ms,
        };

        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: summary.clone(),
        }));

        Ok(BatchResult {
            processed: summary.processed,
            skipped: summary.skipped,
            total_faces: summary.total_faces,
            outcomes,
            errors,
            duration_ms,
        })
    }
}
