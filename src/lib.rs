//! # Photo Anonymizer
//!
//! A face anonymizer that blurs or pixelates detected faces in photos.
//!
//! ## Core Philosophy
//! - **Never alter dimensions** - An obscured photo is the same photo, minus the face detail
//! - **Never abort a batch** - One broken file must not stop its siblings
//! - **Fail loudly on configuration** - A missing detector model is caught before any work
//!
//! ## Architecture
//! The library is split into a core engine (GUI-agnostic) and presentation layers:
//! - `core` - Face detection and obscuring pipeline
//! - `events` - Event-driven progress reporting (GUI-ready)
//! - `error` - User-friendly error types
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{ObscureError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or GUI).
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
