//! # phash CLI
//!
//! Command-line interface for the perceptual hashing engine.
//!
//! ## Usage
//! ```bash
//! phash hash ~/Photos/cat.jpg
//! phash duplicates ~/Photos --threshold 8 --output json
//! ```

mod cli;

use phash_engine::Result;

fn main() -> Result<()> {
    phash_engine::init_tracing();
    cli::run()
}
