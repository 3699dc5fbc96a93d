//! Directory walking implementation using walkdir.

use super::{filter::ImageFilter, ImageFile, ScanResult};
use crate::error::ScanError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Configuration for the directory scanner
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to include hidden files and directories
    pub include_hidden: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
    /// Custom extensions to include (None = use defaults)
    pub extensions: Option<Vec<String>>,
}

/// Scanner implementation using the walkdir crate
pub struct WalkDirScanner {
    config: ScanConfig,
    filter: ImageFilter,
}

impl WalkDirScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let mut filter = ImageFilter::new().with_hidden(config.include_hidden);

        if let Some(ref extensions) = config.extensions {
            filter = filter.with_extensions(extensions.clone());
        }

        Self { config, filter }
    }

    /// Scan directories (and explicitly named files) for images.
    ///
    /// Problems with individual roots or entries are collected in
    /// [`ScanResult::errors`] rather than aborting the scan.
    pub fn scan(&self, paths: &[PathBuf]) -> ScanResult {
        let mut result = ScanResult::default();

        for root in paths {
            self.scan_root(root, &mut result);
        }

        result.files.sort_by(|a, b| a.path.cmp(&b.path));
        result.files.dedup_by(|a, b| a.path == b.path);

        tracing::debug!(
            files = result.files.len(),
            errors = result.errors.len(),
            "scan finished"
        );

        result
    }

    fn scan_root(&self, root: &Path, result: &mut ScanResult) {
        if !root.exists() {
            result.errors.push(ScanError::NotFound {
                path: root.to_path_buf(),
            });
            return;
        }

        let mut walker = WalkDir::new(root).follow_links(self.config.follow_symlinks);

        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        let include_hidden = self.config.include_hidden;
        let entries = walker.into_iter().filter_entry(|entry| {
            // Never prune the root itself
            entry.depth() == 0 || include_hidden || !ImageFilter::is_hidden(entry.path())
        });

        for entry_result in entries {
            match entry_result {
                Ok(entry) => {
                    if !entry.file_type().is_file() && !entry.path().is_file() {
                        continue;
                    }

                    // A file named directly as a root is accepted when supported
                    if !self.filter.should_include(entry.path()) {
                        continue;
                    }

                    let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
                    result.files.push(ImageFile {
                        path: entry.path().to_path_buf(),
                        size,
                    });
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map(|p| p.to_path_buf())
                        .unwrap_or_else(|| root.to_path_buf());
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                    result.errors.push(ScanError::ReadEntry { path, source: e });
                }
            }
        }
    }
}

impl Default for WalkDirScanner {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}
