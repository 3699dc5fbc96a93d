//! # Pipeline Module
//!
//! Hashes many files at once.
//!
//! ## Pipeline Stages
//! 1. **Decode** - Read and decode each file into pixels
//! 2. **Hash** - Compute the fingerprint with a shared engine
//!
//! ## Parallelism
//! Uses rayon for parallel hashing across multiple CPU cores. The engine is
//! stateless, so every worker shares the same instance.

mod executor;

pub use executor::{BatchHasher, BatchProgress, BatchResult};
