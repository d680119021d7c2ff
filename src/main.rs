//! # photo-anon CLI
//!
//! Command-line interface for the face anonymizer.
//!
//! ## Usage
//! ```bash
//! photo-anon photo.jpg blurred.jpg
//! photo-anon ./in ./out pixelate --pixel-size 6
//! ```

mod cli;

use photo_anonymizer::Result;

fn main() -> Result<()> {
    photo_anonymizer::init_tracing();
    cli::run()
}
