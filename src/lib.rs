//! # pHash Engine
//!
//! A perceptual image hashing engine producing stable 64-bit fingerprints.
//!
//! ## Core Contract
//! - **Deterministic** - the same pixels always give the same fingerprint
//! - **Stable text form** - 16 lowercase hex digits, MSB first
//! - **Comparable** - Hamming distance, only between fingerprints of one algorithm
//!
//! ## Architecture
//! The library is split into a pure engine and the tooling around it:
//! - `core` - Pixels, hashing, decoding, scanning, batching, comparison
//! - `error` - Typed error enums
//!
//! ## Example
//! ```rust,ignore
//! use phash_engine::core::{FastDecoder, HashEngine};
//!
//! let pixels = FastDecoder::decode_path("photo.jpg".as_ref())?;
//! let fingerprint = HashEngine::new().compute(&pixels)?;
//! println!("{fingerprint}");
//! ```

pub mod core;
pub mod error;

// Re-export commonly used types at the crate root
pub use error::{PhashError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point. Logs go to stderr
/// so stdout stays clean for fingerprints; filter with `RUST_LOG`.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
