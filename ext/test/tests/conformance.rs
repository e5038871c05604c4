//! Conformance tests that run YAML fixtures against urltrie
//!
//! Run with: cargo test -p urltrie-test --test conformance --features urltrie-test/fixtures
//!
//! Note: This test file requires the `fixtures` feature to be enabled.

#![cfg(feature = "fixtures")]

use std::fs;
use std::path::{Path, PathBuf};
use urltrie_test::fixture::Fixture;

/// Get the fixtures directory relative to the workspace root
fn fixtures_dir() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let ext_test = Path::new(manifest_dir);

    // Go up: ext/test -> ext -> workspace root
    let root = ext_test
        .parent() // ext
        .and_then(|p| p.parent()) // root
        .expect("Could not find workspace root");

    root.join("fixtures")
}

/// Load and run the fixtures of one file
fn run_fixture_file(name: &str) {
    let path = fixtures_dir().join(name);
    println!("Running fixture file: {}", path.display());

    let yaml = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));

    // Parse potentially multiple fixtures (separated by ---)
    let fixtures = Fixture::from_yaml_multi(&yaml).unwrap_or_else(|e| {
        panic!("Failed to parse {}: {}", path.display(), e);
    });
    assert!(!fixtures.is_empty(), "{} has no fixtures", path.display());

    for fixture in fixtures {
        println!("  Running: {}", fixture.name);
        fixture.run_and_assert();
    }
}

#[test]
fn test_registration() {
    run_fixture_file("01_registration.yaml");
}

#[test]
fn test_components() {
    run_fixture_file("02_components.yaml");
}

#[test]
fn test_resolution() {
    run_fixture_file("03_resolution.yaml");
}

#[test]
fn test_every_fixture_file_parses() {
    for entry in fs::read_dir(fixtures_dir()).expect("read dir") {
        let path = entry.expect("dir entry").path();
        if path
            .extension()
            .is_some_and(|e| e == "yaml" || e == "yml")
            && path.file_name().is_some_and(|n| n != "catalog.yaml")
        {
            let yaml = fs::read_to_string(&path).expect("read yaml");
            Fixture::from_yaml_multi(&yaml)
                .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e));
        }
    }
}
