//! Integration tests for scanning, batch hashing and duplicate detection.

use image::{DynamicImage, GrayImage, Luma};
use phash_engine::core::comparator::{find_duplicate_pairs, MatchType, ThresholdStrategy};
use phash_engine::core::hasher::{HashAlgorithmKind, HasherConfig};
use phash_engine::core::pipeline::BatchHasher;
use phash_engine::core::scanner::{ScanConfig, WalkDirScanner};
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn waves(width: u32, height: u32, fx: f64, fy: f64) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let v = 128.0 + 60.0 * (fx * x as f64).sin() + 40.0 * (fy * y as f64 + 0.3).cos();
        Luma([v.round().clamp(0.0, 255.0) as u8])
    })
}

fn save(image: &GrayImage, path: &Path) {
    image.save(path).unwrap();
}

#[test]
fn scan_hash_and_compare_directory() {
    let temp_dir = TempDir::new().unwrap();
    let album = temp_dir.path().join("album");
    fs::create_dir(&album).unwrap();

    let original = waves(120, 90, 0.07, 0.05);
    save(&original, &temp_dir.path().join("original.png"));
    // Same scene at half resolution
    let smaller = DynamicImage::ImageLuma8(original.clone())
        .resize_exact(60, 45, image::imageops::FilterType::Triangle)
        .to_luma8();
    save(&smaller, &album.join("smaller.png"));
    save(&waves(120, 90, 0.23, 0.01), &album.join("other.png"));
    fs::write(temp_dir.path().join("notes.txt"), "not an image").unwrap();

    let scan = WalkDirScanner::new(ScanConfig::default()).scan(&[temp_dir.path().to_path_buf()]);
    assert_eq!(scan.files.len(), 3);
    assert!(scan.errors.is_empty());

    let batch = BatchHasher::default().hash_files(&scan.paths(), None);
    assert_eq!(batch.hashes.len(), 3);
    assert!(batch.errors.is_empty());

    let pairs = find_duplicate_pairs(&batch.hashes, &ThresholdStrategy::default());

    assert_eq!(pairs.len(), 1, "{pairs:?}");
    let names = [
        pairs[0].image_a.file_name().unwrap(),
        pairs[0].image_b.file_name().unwrap(),
    ];
    assert!(names.contains(&OsStr::new("original.png")));
    assert!(names.contains(&OsStr::new("smaller.png")));
    assert!(pairs[0].match_type.is_duplicate());
}

#[test]
fn copies_are_exact_matches() {
    let temp_dir = TempDir::new().unwrap();
    let image = waves(64, 64, 0.11, 0.09);
    save(&image, &temp_dir.path().join("a.png"));
    save(&image, &temp_dir.path().join("b.png"));

    let scan = WalkDirScanner::default().scan(&[temp_dir.path().to_path_buf()]);
    let engine = HasherConfig::new()
        .algorithm(HashAlgorithmKind::Difference)
        .build();
    let batch = BatchHasher::new(engine).hash_files(&scan.paths(), None);

    let pairs = find_duplicate_pairs(&batch.hashes, &ThresholdStrategy::new(0).unwrap());
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].match_type, MatchType::Exact);
}

#[test]
fn unreadable_files_do_not_stop_the_batch() {
    let temp_dir = TempDir::new().unwrap();
    save(&waves(32, 32, 0.2, 0.2), &temp_dir.path().join("good.png"));
    fs::write(temp_dir.path().join("broken.jpg"), [0xFF, 0xD8, 0xFF, 0x00]).unwrap();

    let scan = WalkDirScanner::default().scan(&[
        temp_dir.path().to_path_buf(),
        temp_dir.path().join("missing"),
    ]);
    assert_eq!(scan.files.len(), 2);
    assert_eq!(scan.errors.len(), 1);

    let batch = BatchHasher::default().hash_files(&scan.paths(), None);
    assert_eq!(batch.hashes.len(), 1);
    assert_eq!(batch.errors.len(), 1);
    assert!(batch.errors[0].0.ends_with("broken.jpg"));
}
