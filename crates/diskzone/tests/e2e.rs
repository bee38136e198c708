mod common;

use std::io::Cursor;

use common::synthetic_plate::plate_with_zones;
use diskzone::{
    store, Analyzer, Category, LocateConfig, Locator, PixelGrid, PromptedNames, ZoneConfig,
};

/// 100 px / 60 mm reference: a 34 px chord is 20.4 mm.
fn test_config() -> ZoneConfig {
    let mut config = ZoneConfig::default();
    config.locate.calibration.reference_pixel_diameter = 100.0;
    config.locate.calibration.reference_mm_diameter = 60.0;
    config
}

#[test]
fn locate_then_classify_through_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("plate.png");
    let zones_path = dir.path().join("zones.txt");

    plate_with_zones(400, 400, &[[60.0, 60.0], [320.0, 60.0], [60.0, 320.0]], 30.0)
        .save(&image_path)
        .unwrap();

    // Stage 1: locate and persist.
    let config = test_config();
    let grid = PixelGrid::open(&image_path).unwrap();
    let disks = Locator::new(config.locate.clone()).locate(&grid).unwrap();
    assert_eq!(disks.len(), 3);
    let centers: Vec<[u32; 2]> = disks.iter().map(|d| d.center()).collect();
    assert_eq!(centers, vec![[45, 35], [305, 35], [45, 295]]);
    store::write_measurements(&zones_path, &disks.measurements()).unwrap();
    assert_eq!(
        std::fs::read_to_string(&zones_path).unwrap(),
        "20.40\n20.40\n20.40\n"
    );

    // Stage 2: read back and classify with typed operator answers.
    let measurements = store::read_measurements(&zones_path).unwrap();
    let analyzer = Analyzer::new(config).unwrap();
    let input = Cursor::new("Tetracycline\nCefotaxime\nPenicillin\n");
    let mut names = PromptedNames::new(input, Vec::new());
    let report = analyzer.classify(&measurements, &mut names).unwrap();

    let (_, transcript) = names.into_inner();
    let transcript = String::from_utf8(transcript).unwrap();
    assert_eq!(
        transcript,
        "Enter antibiotic name for zone #1 (20.40 mm): \
         Enter antibiotic name for zone #2 (20.40 mm): \
         Enter antibiotic name for zone #3 (20.40 mm): \
         Antibiotic 'Penicillin' not found in database, skipping.\n"
    );

    let cats: Vec<Category> = report.iter().map(|r| r.category()).collect();
    assert_eq!(
        cats,
        vec![
            Category::Susceptible,
            Category::Resistant,
            Category::Unresolved
        ]
    );
    assert_eq!(
        report.to_string(),
        "=== Final Results ===\n\
         Tetracycline                   : Susceptible (Zone = 20.4 mm)\n\
         Cefotaxime                     : Resistant (Zone = 20.4 mm)\n\
         Zone #3: Skipped\n"
    );
}

#[test]
fn overlapping_zones_yield_one_disk() {
    let img = plate_with_zones(200, 120, &[[50.0, 50.0], [100.0, 50.0]], 20.0);
    let grid = PixelGrid::from_gray(img);
    let disks = Locator::new(LocateConfig::default()).locate(&grid).unwrap();
    assert_eq!(disks.len(), 1);
}

#[test]
fn malformed_store_is_fatal_for_classification() {
    let dir = tempfile::tempdir().unwrap();
    let zones_path = dir.path().join("zones.txt");
    std::fs::write(&zones_path, "12.00\n1x.5\n").unwrap();
    let err = store::read_measurements(&zones_path).unwrap_err();
    assert!(err.to_string().contains(":2:"), "{err}");
}

#[test]
fn unreadable_image_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("plate.png");
    std::fs::write(&bogus, b"not an image").unwrap();
    let err = PixelGrid::open(&bogus).unwrap_err();
    assert!(err.to_string().contains("plate.png"));
}
