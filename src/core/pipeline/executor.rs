//! Batch execution implementation.

use crate::core::decode::FastDecoder;
use crate::core::hasher::{HashEngine, ImageHashValue};
use crate::error::PhashError;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Progress of a running batch
#[derive(Debug, Clone)]
pub struct BatchProgress {
    /// Files finished so far, successful or not
    pub completed: usize,
    /// Files in the batch
    pub total: usize,
    /// File that just finished
    pub current_path: PathBuf,
}

/// Result of batch execution
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Successfully hashed files, in input order
    pub hashes: Vec<(PathBuf, ImageHashValue)>,
    /// Files that could not be hashed (non-fatal), in input order
    pub errors: Vec<(PathBuf, PhashError)>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Decodes and hashes files in parallel with one shared engine
#[derive(Debug, Clone, Default)]
pub struct BatchHasher {
    engine: HashEngine,
}

impl BatchHasher {
    pub fn new(engine: HashEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &HashEngine {
        &self.engine
    }

    /// Decode and hash a single file
    pub fn hash_file(&self, path: &Path) -> Result<ImageHashValue, PhashError> {
        let pixels = FastDecoder::decode_path(path)?;
        Ok(self.engine.compute_value(&pixels)?)
    }

    /// Hash every file, reporting progress as each one finishes.
    ///
    /// The callback may be invoked from several worker threads at once.
    pub fn hash_files(
        &self,
        paths: &[PathBuf],
        progress: Option<&(dyn Fn(BatchProgress) + Sync)>,
    ) -> BatchResult {
        let start_time = Instant::now();
        let total = paths.len();
        let completed = AtomicUsize::new(0);

        tracing::debug!(total, algorithm = %self.engine.algorithm(), "hashing batch");

        let outcomes: Vec<(PathBuf, Result<ImageHashValue, PhashError>)> = paths
            .par_iter()
            .map(|path| {
                let outcome = self.hash_file(path);

                if let Err(ref e) = outcome {
                    tracing::warn!(path = %path.display(), error = %e, "failed to hash");
                }

                let current_completed = completed.fetch_add(1, Ordering::SeqCst) + 1;
                if let Some(report) = progress {
                    report(BatchProgress {
                        completed: current_completed,
                        total,
                        current_path: path.clone(),
                    });
                }

                (path.clone(), outcome)
            })
            .collect();

        let mut result = BatchResult::default();
        for (path, outcome) in outcomes {
            match outcome {
                Ok(hash) => result.hashes.push((path, hash)),
                Err(e) => result.errors.push((path, e)),
            }
        }
        result.duration_ms = start_time.elapsed().as_millis() as u64;

        tracing::debug!(
            hashed = result.hashes.len(),
            failed = result.errors.len(),
            duration_ms = result.duration_ms,
            "batch finished"
        );

        result
    }
}
