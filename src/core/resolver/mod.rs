//! # Resolver Module
//!
//! Turns the input/output path pair from the command line into the list
//! of per-image jobs the pipeline will process.
//!
//! ## Modes
//! - **Single file**: the input path is a regular file; exactly one job,
//!   both paths passed through unchanged.
//! - **Directory**: the input path is a directory; the output directory
//!   is created if absent and every direct entry with a supported image
//!   extension becomes one job, keeping its filename.
//!
//! ## Supported Extensions
//! `.jpg`, `.jpeg`, `.png`, `.bmp` - matched case-insensitively, while
//! output filenames preserve the original case.

mod filter;

pub use filter::ImageFilter;

use crate::error::ResolveError;
use crate::events::{Event, EventSender, ResolveEvent};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One image to process: where to read it and where to write the result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageJob {
    /// Path to the source image
    pub input: PathBuf,
    /// Path the obscured image will be written to
    pub output: PathBuf,
}

/// Resolve an input/output target pair into image jobs
///
/// Directory listing order is whatever the platform returns; it is not
/// guaranteed stable. A directory with zero matching files resolves to
/// an empty job list, which callers treat as a warning, not an error.
pub fn resolve(input: &Path, output: &Path) -> Result<Vec<ImageJob>, ResolveError> {
    resolve_with_events(input, output, &crate::events::null_sender())
}

/// Resolve with progress reporting via events
pub fn resolve_with_events(
    input: &Path,
    output: &Path,
    events: &EventSender,
) -> Result<Vec<ImageJob>, ResolveError> {
    events.send(Event::Resolve(ResolveEvent::Started {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
    }));

    if !input.exists() {
        return Err(ResolveError::InputNotFound {
            path: input.to_path_buf(),
        });
    }

    let jobs = if input.is_dir() {
        resolve_directory(input, output, events)?
    } else {
        vec![ImageJob {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
        }]
    };

    events.send(Event::Resolve(ResolveEvent::Completed {
        total_jobs: jobs.len(),
    }));

    Ok(jobs)
}

fn resolve_directory(
    input_dir: &Path,
    output_dir: &Path,
    events: &EventSender,
) -> Result<Vec<ImageJob>, ResolveError> {
    fs::create_dir_all(output_dir).map_err(|source| ResolveError::CreateOutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let filter = ImageFilter::new();
    let mut jobs = Vec::new();

    // Direct entries only; nested directories are not descended into
    for entry_result in WalkDir::new(input_dir).min_depth(1).max_depth(1) {
        let entry = entry_result.map_err(|e| ResolveError::ReadDirectory {
            path: input_dir.to_path_buf(),
            source: e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
        })?;

        let path = entry.path();
        if !entry.file_type().is_file() || !filter.should_include(path) {
            continue;
        }

        // Filename case is preserved on the output side
        let file_name = match path.file_name() {
            Some(name) => name,
            None => continue,
        };

        events.send(Event::Resolve(ResolveEvent::JobFound {
            input: path.to_path_buf(),
        }));

        jobs.push(ImageJob {
            input: path.to_path_buf(),
            output: output_dir.join(file_name),
        });
    }

    if jobs.is_empty() {
        tracing::warn!(
            "no supported image files ({{jpg, jpeg, png, bmp}}) in {}",
            input_dir.display()
        );
    }

    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        File::create(&path).unwrap();
        path
    }

    #[test]
    fn single_file_yields_one_unchanged_pair() {
        let temp_dir = TempDir::new().unwrap();
        let input = touch(&temp_dir, "photo.jpg");
        let output = temp_dir.path().join("out.jpg");

        let jobs = resolve(&input, &output).unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].input, input);
        assert_eq!(jobs[0].output, output);
    }

    #[test]
    fn missing_input_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let result = resolve(
            &temp_dir.path().join("missing.jpg"),
            &temp_dir.path().join("out.jpg"),
        );

        assert!(matches!(
            result,
            Err(ResolveError::InputNotFound { .. })
        ));
    }

    #[test]
    fn directory_discovers_only_supported_extensions() {
        let in_dir = TempDir::new().unwrap();
        touch(&in_dir, "a.jpg");
        touch(&in_dir, "b.PNG");
        touch(&in_dir, "c.txt");
        touch(&in_dir, "d.bmp");

        let out_dir = TempDir::new().unwrap();
        let mut jobs = resolve(in_dir.path(), out_dir.path()).unwrap();
        jobs.sort_by(|a, b| a.input.cmp(&b.input));

        let names: Vec<_> = jobs
            .iter()
            .map(|j| j.input.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.PNG", "d.bmp"]);
    }

    #[test]
    fn directory_preserves_filename_case_on_output() {
        let in_dir = TempDir::new().unwrap();
        touch(&in_dir, "Holiday.JPEG");

        let out_dir = TempDir::new().unwrap();
        let jobs = resolve(in_dir.path(), out_dir.path()).unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].output, out_dir.path().join("Holiday.JPEG"));
    }

    #[test]
    fn directory_creates_missing_output_dir() {
        let in_dir = TempDir::new().unwrap();
        touch(&in_dir, "a.jpg");

        let base = TempDir::new().unwrap();
        let out_dir = base.path().join("nested").join("out");
        assert!(!out_dir.exists());

        let jobs = resolve(in_dir.path(), &out_dir).unwrap();

        assert!(out_dir.is_dir());
        assert_eq!(jobs[0].output, out_dir.join("a.jpg"));
    }

    #[test]
    fn empty_directory_resolves_to_zero_jobs() {
        let in_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();

        let jobs = resolve(in_dir.path(), out_dir.path()).unwrap();
        assert!(jobs.is_empty());
    }

    #[test]
    fn nested_directories_are_not_descended() {
        let in_dir = TempDir::new().unwrap();
        touch(&in_dir, "top.jpg");
        let sub = in_dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        File::create(sub.join("nested.jpg")).unwrap();

        let out_dir = TempDir::new().unwrap();
        let jobs = resolve(in_dir.path(), out_dir.path()).unwrap();

        assert_eq!(jobs.len(), 1);
        assert!(jobs[0].input.ends_with("top.jpg"));
    }
}
