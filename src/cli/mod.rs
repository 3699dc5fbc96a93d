//! # CLI Module
//!
//! Command-line interface for the perceptual hashing engine.
//!
//! ## Usage
//! ```bash
//! # Fingerprint files or whole directories
//! phash hash ~/Photos/cat.jpg ~/Photos/holiday
//!
//! # Fingerprint a base64 blob (or `-` to read it from stdin)
//! phash encoded "data:image/png;base64,iVBORw0..."
//!
//! # Compare two images, or two fingerprints
//! phash compare a.jpg b.jpg
//! phash distance c3a1f0e4b2d89060 c3a1f0e4b2d89062
//!
//! # Find near-duplicates
//! phash duplicates ~/Photos --threshold 8 --output json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use phash_engine::core::comparator::{
    find_duplicate_pairs, ComparisonStrategy, MatchResult, ThresholdStrategy,
};
use phash_engine::core::decode::FastDecoder;
use phash_engine::core::hasher::{
    Fingerprint, HashAlgorithmKind, HashEngine, HasherConfig, ImageHashValue, PerceptualHash,
    ThresholdMethod,
};
use phash_engine::core::pipeline::{BatchHasher, BatchProgress, BatchResult};
use phash_engine::core::scanner::{ScanConfig, WalkDirScanner};
use phash_engine::error::{DecodeError, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

/// phash - Perceptual image fingerprints
#[derive(Parser, Debug)]
#[command(name = "phash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Hash algorithm to use
    #[arg(short, long, global = true, default_value = "perceptual")]
    algorithm: Algorithm,

    /// How each image's threshold is derived (ignored by dHash)
    #[arg(long, global = true, default_value = "mean")]
    threshold_method: Threshold,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    output: OutputFormat,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fingerprint image files (directories are scanned)
    Hash {
        /// Files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Include hidden files
        #[arg(long)]
        include_hidden: bool,
    },

    /// Fingerprint a base64-encoded image
    Encoded {
        /// Base64 data, optionally a `data:` URL; `-` reads stdin
        input: String,
    },

    /// Compare two image files
    Compare { a: PathBuf, b: PathBuf },

    /// Hamming distance between two hex fingerprints
    Distance { a: String, b: String },

    /// Find near-duplicate images
    Duplicates {
        /// Directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Maximum distance reported as a duplicate (0-64)
        #[arg(
            short,
            long,
            default_value = "10",
            value_parser = clap::value_parser!(u32).range(0..=64)
        )]
        threshold: u32,

        /// Include hidden files
        #[arg(long)]
        include_hidden: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    /// Average Hash - Fast, good for exact duplicates
    Average,
    /// Difference Hash - Horizontal gradients
    Difference,
    /// Perceptual Hash - Most robust to edits (default)
    Perceptual,
}

impl From<Algorithm> for HashAlgorithmKind {
    fn from(algo: Algorithm) -> Self {
        match algo {
            Algorithm::Average => HashAlgorithmKind::Average,
            Algorithm::Difference => HashAlgorithmKind::Difference,
            Algorithm::Perceptual => HashAlgorithmKind::Perceptual,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Threshold {
    /// Mean of the image's own signals (default)
    Mean,
    /// Median of the image's own signals
    Median,
}

impl From<Threshold> for ThresholdMethod {
    fn from(threshold: Threshold) -> Self {
        match threshold {
            Threshold::Mean => ThresholdMethod::Mean,
            Threshold::Median => ThresholdMethod::Median,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (fingerprints or paths only)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let engine = HasherConfig::new()
        .algorithm(cli.algorithm.into())
        .threshold(cli.threshold_method.into())
        .build();
    let output = cli.output;

    match cli.command {
        Commands::Hash {
            paths,
            include_hidden,
        } => run_hash(engine, &paths, include_hidden, output),
        Commands::Encoded { input } => run_encoded(&engine, &input, output),
        Commands::Compare { a, b } => run_compare(engine, &a, &b, output),
        Commands::Distance { a, b } => run_distance(&a, &b, output),
        Commands::Duplicates {
            paths,
            threshold,
            include_hidden,
        } => run_duplicates(engine, &paths, threshold, include_hidden, output),
    }
}

fn run_hash(
    engine: HashEngine,
    paths: &[PathBuf],
    include_hidden: bool,
    output: OutputFormat,
) -> Result<()> {
    let algorithm = engine.algorithm();
    // dHash ignores the method
    let threshold_method = (algorithm != HashAlgorithmKind::Difference)
        .then(|| engine.threshold_method().to_string());
    let result = scan_and_hash(engine, paths, include_hidden, output);

    match output {
        OutputFormat::Pretty => {
            let term = Term::stdout();
            for (path, hash) in &result.hashes {
                term.write_line(&format!(
                    "{}  {}",
                    style(hash.fingerprint()).cyan(),
                    path.display()
                ))
                .ok();
            }
            print_failures(&result);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "algorithm": algorithm.to_string(),
                "threshold_method": threshold_method,
                "duration_ms": result.duration_ms,
                "hashes": result.hashes.iter().map(|(path, hash)| hash_json(path, hash)).collect::<Vec<_>>(),
                "errors": result.errors.iter().map(|(path, e)| {
                    serde_json::json!({ "path": path, "error": e.to_string() })
                }).collect::<Vec<_>>(),
            });
            println!("{:#}", output);
        }
        OutputFormat::Minimal => {
            for (path, hash) in &result.hashes {
                println!("{} {}", hash.fingerprint(), path.display());
            }
        }
    }

    Ok(())
}

fn run_encoded(engine: &HashEngine, input: &str, output: OutputFormat) -> Result<()> {
    let encoded = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| DecodeError::Io {
                path: PathBuf::from("<stdin>"),
                source: e,
            })?;
        buffer
    } else {
        input.to_string()
    };

    let pixels = FastDecoder::decode_base64(&encoded)?;
    let hash = engine.compute_value(&pixels)?;

    match output {
        OutputFormat::Pretty => {
            Term::stdout()
                .write_line(&format!(
                    "{} {}",
                    style(hash.algorithm()).dim(),
                    style(hash.fingerprint()).cyan().bold()
                ))
                .ok();
        }
        OutputFormat::Json => println!("{:#}", hash_json(Path::new("-"), &hash)),
        OutputFormat::Minimal => println!("{}", hash.fingerprint()),
    }

    Ok(())
}

fn run_compare(engine: HashEngine, a: &Path, b: &Path, output: OutputFormat) -> Result<()> {
    let hasher = BatchHasher::new(engine);
    let hash_a = hasher.hash_file(a)?;
    let hash_b = hasher.hash_file(b)?;

    let distance = hash_a.try_distance(&hash_b)?;
    let result = MatchResult {
        image_a: a.to_path_buf(),
        image_b: b.to_path_buf(),
        distance,
        similarity_percent: hash_a.fingerprint().similarity(&hash_b.fingerprint()),
        match_type: ThresholdStrategy::default().classify(distance),
    };

    match output {
        OutputFormat::Pretty => {
            let term = Term::stdout();
            term.write_line(&format!("  {}  {}", style(hash_a.fingerprint()).cyan(), a.display()))
                .ok();
            term.write_line(&format!("  {}  {}", style(hash_b.fingerprint()).cyan(), b.display()))
                .ok();
            term.write_line("").ok();
            print_match(&term, &result);
        }
        OutputFormat::Json => println!("{:#}", match_json(&result)),
        OutputFormat::Minimal => println!("{}", result.distance),
    }

    Ok(())
}

fn run_distance(a: &str, b: &str, output: OutputFormat) -> Result<()> {
    let a = Fingerprint::parse(a)?;
    let b = Fingerprint::parse(b)?;
    let distance = a.distance(&b);

    match output {
        OutputFormat::Pretty => {
            Term::stdout()
                .write_line(&format!(
                    "{} bits differ ({:.1}% similar)",
                    style(distance).cyan().bold(),
                    a.similarity(&b)
                ))
                .ok();
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "a": a,
                "b": b,
                "distance": distance,
                "similarity_percent": a.similarity(&b),
            });
            println!("{:#}", output);
        }
        OutputFormat::Minimal => println!("{}", distance),
    }

    Ok(())
}

fn run_duplicates(
    engine: HashEngine,
    paths: &[PathBuf],
    threshold: u32,
    include_hidden: bool,
    output: OutputFormat,
) -> Result<()> {
    let strategy = ThresholdStrategy::new(threshold)?;
    let algorithm = engine.algorithm();
    let result = scan_and_hash(engine, paths, include_hidden, output);
    let matches = find_duplicate_pairs(&result.hashes, &strategy);

    match output {
        OutputFormat::Pretty => {
            let term = Term::stdout();
            term.write_line(&format!(
                "{} {} images hashed in {:.1}s, {} similar pairs",
                style("✓").green().bold(),
                style(result.hashes.len()).cyan(),
                result.duration_ms as f64 / 1000.0,
                style(matches.len()).cyan()
            ))
            .ok();
            term.write_line(&format!("  {}", style(algorithm.description()).dim()))
                .ok();
            term.write_line(&format!("  {}", style(strategy.description()).dim()))
                .ok();
            term.write_line("").ok();

            if matches.is_empty() {
                term.write_line("  No duplicates found").ok();
            }
            for pair in &matches {
                print_match(&term, pair);
                term.write_line("").ok();
            }
            print_failures(&result);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "total_images": result.hashes.len(),
                "threshold": strategy.threshold(),
                "duration_ms": result.duration_ms,
                "pairs": matches.iter().map(match_json).collect::<Vec<_>>(),
                "errors": result.errors.iter().map(|(path, e)| {
                    serde_json::json!({ "path": path, "error": e.to_string() })
                }).collect::<Vec<_>>(),
            });
            println!("{:#}", output);
        }
        OutputFormat::Minimal => {
            for pair in &matches {
                println!(
                    "{}\t{}\t{}",
                    pair.distance,
                    pair.image_a.display(),
                    pair.image_b.display()
                );
            }
        }
    }

    Ok(())
}

/// Scan inputs, then hash everything found with a progress bar in pretty mode
fn scan_and_hash(
    engine: HashEngine,
    paths: &[PathBuf],
    include_hidden: bool,
    output: OutputFormat,
) -> BatchResult {
    let scanner = WalkDirScanner::new(ScanConfig {
        include_hidden,
        ..Default::default()
    });
    let scan = scanner.scan(paths);
    for error in &scan.errors {
        tracing::warn!("{}", error);
    }

    let files = scan.paths();

    let progress = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let report = |p: BatchProgress| {
        if let Some(ref pb) = progress {
            pb.set_position(p.completed as u64);
            pb.set_message(
                p.current_path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .into_owned(),
            );
        }
    };

    let result = BatchHasher::new(engine).hash_files(&files, Some(&report));

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    result
}

fn print_match(term: &Term, result: &MatchResult) {
    term.write_line(&format!(
        "  {} distance {} ({:.1}% similar)",
        style(result.match_type).yellow().bold(),
        style(result.distance).cyan(),
        result.similarity_percent
    ))
    .ok();
    term.write_line(&format!("    {} {}", style("○").dim(), result.image_a.display()))
        .ok();
    term.write_line(&format!("    {} {}", style("○").dim(), result.image_b.display()))
        .ok();
}

fn print_failures(result: &BatchResult) {
    if result.errors.is_empty() {
        return;
    }

    let term = Term::stderr();
    term.write_line("").ok();
    term.write_line(&format!(
        "{} {} file(s) could not be hashed",
        style("!").red().bold(),
        result.errors.len()
    ))
    .ok();
    for (path, error) in &result.errors {
        term.write_line(&format!("    {} {}", path.display(), style(error).dim()))
            .ok();
    }
}

fn hash_json(path: &Path, hash: &ImageHashValue) -> serde_json::Value {
    serde_json::json!({
        "path": path,
        "fingerprint": hash.fingerprint(),
        "algorithm": hash.algorithm().to_string(),
        "threshold_method": hash.threshold_method().map(|method| method.to_string()),
    })
}

fn match_json(result: &MatchResult) -> serde_json::Value {
    serde_json::json!({
        "a": result.image_a,
        "b": result.image_b,
        "distance": result.distance,
        "similarity_percent": result.similarity_percent,
        "match_type": result.match_type.to_string(),
    })
}
