//! # CLI Module
//!
//! Command-line interface for the face anonymizer.
//!
//! ## Usage
//! ```bash
//! # Blur faces in a single photo
//! photo-anon photo.jpg blurred.jpg
//!
//! # Pixelate instead
//! photo-anon photo.jpg mosaic.jpg pixelate
//!
//! # Whole directory, JSON summary
//! photo-anon ./in ./out blur --output json
//!
//! # Stronger blur
//! photo-anon photo.jpg blurred.jpg blur --blur-strength 99
//! ```

use clap::{Parser, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use photo_anonymizer::core::pipeline::{BatchResult, Pipeline};
use photo_anonymizer::core::transform::{GaussianBlur, Pixelate, TransformKind};
use photo_anonymizer::error::Result;
use photo_anonymizer::events::{Event, EventChannel, ObscureEvent, PipelineEvent, ResolveEvent};
use std::path::PathBuf;
use std::thread;

/// Photo Anonymizer - blur or pixelate faces before sharing
#[derive(Parser, Debug)]
#[command(name = "photo-anon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input image file or directory of images
    input: PathBuf,

    /// Output image file or directory (created if absent)
    output: PathBuf,

    /// Obscuring mode
    #[arg(default_value = "blur")]
    mode: Mode,

    /// Gaussian kernel size for blur mode (even values rounded up to odd)
    #[arg(long, default_value_t = GaussianBlur::DEFAULT_KERNEL)]
    blur_strength: u32,

    /// Intermediate grid size for pixelate mode (smaller = stronger)
    #[arg(long, default_value_t = Pixelate::DEFAULT_GRID)]
    pixel_size: u32,

    /// Path to the SeetaFace detector model
    #[arg(long, env = "FACE_MODEL", default_value = "seeta_fd_frontal_v1.0.bin")]
    model: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "pretty")]
    output_format: OutputFormat,

    /// Process directory batches in parallel
    #[arg(long)]
    parallel: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Gaussian blur (default)
    Blur,
    /// Blocky mosaic
    Pixelate,
}

impl From<Mode> for TransformKind {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Blur => TransformKind::Blur,
            Mode::Pixelate => TransformKind::Pixelate,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (written paths only)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let term = Term::stderr();

    // Print header
    if matches!(cli.output_format, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Photo Anonymizer").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    // Build pipeline; the detector model is loaded here, before any
    // image is touched
    let pipeline = Pipeline::builder()
        .input(cli.input.clone())
        .output(cli.output.clone())
        .transform(cli.mode.into())
        .blur_strength(cli.blur_strength)
        .pixel_size(cli.pixel_size)
        .model(cli.model.clone())
        .parallel(cli.parallel)
        .build()?;

    // Set up event handling
    let (sender, receiver) = EventChannel::new();

    // Progress bar for pretty output
    let progress = if matches!(cli.output_format, OutputFormat::Pretty) {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let verbose = cli.verbose;

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            match event {
                Event::Resolve(ResolveEvent::Completed { total_jobs }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_length(total_jobs as u64);
                    }
                }
                Event::Obscure(ObscureEvent::FacesDetected { path, count }) => {
                    if let Some(ref pb) = progress_clone {
                        if verbose {
                            pb.println(format!(
                                "Detected {} face(s) in {}",
                                count,
                                path.display()
                            ));
                        }
                    }
                }
                Event::Obscure(ObscureEvent::Saved { path, .. }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.inc(1);
                        pb.set_message(
                            path.file_name().unwrap_or_default().to_string_lossy().to_string(),
                        );
                    }
                }
                Event::Obscure(ObscureEvent::Error { path, message }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.inc(1);
                        pb.println(format!(
                            "{} {}: {}",
                            style("skipped").yellow(),
                            path.display(),
                            message
                        ));
                    }
                }
                Event::Pipeline(PipelineEvent::Completed { .. }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.finish_and_clear();
                    }
                }
                _ => {}
            }
        }
    });

    // Run the pipeline
    let result = pipeline.run_with_events(&sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    let result = result?;

    // Output results
    match cli.output_format {
        OutputFormat::Pretty => print_pretty_results(&term, &cli, &result),
        OutputFormat::Json => print_json_results(&result),
        OutputFormat::Minimal => print_minimal_results(&result),
    }

    Ok(())
}

fn print_pretty_results(term: &Term, cli: &Cli, result: &BatchResult) {
    if result.processed == 0 && result.skipped == 0 {
        term.write_line(&format!(
            "{} No supported image files ({{jpg, jpeg, png, bmp}}) found in {}",
            style("!").yellow().bold(),
            cli.input.display()
        ))
        .ok();
        return;
    }

    term.write_line(&format!("{} Done", style("✓").green().bold())).ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} image(s) written in {:.1}s",
        style(result.processed).cyan(),
        result.duration_ms as f64 / 1000.0
    ))
    .ok();

    term.write_line(&format!(
        "  {} face(s) obscured ({})",
        style(result.total_faces).cyan(),
        TransformKind::from(cli.mode)
    ))
    .ok();

    if result.skipped > 0 {
        term.write_line(&format!(
            "  {} file(s) skipped",
            style(result.skipped).yellow()
        ))
        .ok();
    }

    if cli.verbose {
        term.write_line("").ok();
        for outcome in &result.outcomes {
            term.write_line(&format!(
                "  {} {} ({} face(s))",
                style("→").dim(),
                outcome.output.display(),
                outcome.faces
            ))
            .ok();
        }
    }
}

fn print_json_results(result: &BatchResult) {
    let output = serde_json::json!({
        "processed": result.processed,
        "skipped": result.skipped,
        "total_faces": result.total_faces,
        "duration_ms": result.duration_ms,
        "errors": result.errors,
        "images": result.outcomes,
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

fn print_minimal_results(result: &BatchResult) {
    for outcome in &result.outcomes {
        println!("{}", outcome.output.display());
    }
}
