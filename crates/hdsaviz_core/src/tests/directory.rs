//! Tests for scanning a results directory
//!
//! These tests verify:
//! - Identifier derivation from file names
//! - Block splitting row counts
//! - Configurable exclusions
//! - Whole-scan failure on any bad file

use std::fs;
use std::path::Path;

use tempfile::{TempDir, tempdir};

use crate::config::ScanConfig;
use crate::error::{ParseError, ReadError};
use crate::sensitivity::read_sensitivity_dir;

const CO: &str = "\
Parameter S1 S1_conf ST ST_conf
rxn1 0.31 0.02 0.45 0.03
rxn2 -0.004 0.01 0.02 0.01
rxn3 0.12 0.02 0.20 0.02

Parameter_1 Parameter_2 S2 S2_conf
rxn1 rxn2 0.03 0.01
rxn1 rxn3 -0.002 0.01
";

const H2O: &str = "\
Parameter S1 S1_conf ST ST_conf
rxn1 0.05 0.01 0.07 0.01
rxn2 0.60 0.04 0.72 0.05
";

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn dataset() -> TempDir {
    let dir = tempdir().unwrap();
    write(dir.path(), "analysis_CO.txt", CO);
    write(dir.path(), "analysis_H2O.txt", H2O);
    write(dir.path(), "input_parameters.csv", "k1,k2\n1,2\n");
    write(dir.path(), "results.csv", "CO,H2O\n1,2\n");
    dir
}

/// Header + 3 rows, blank, header + 2 rows
#[test]
fn test_analysis_file_example() {
    let dir = dataset();

    let results = read_sensitivity_dir(dir.path(), &ScanConfig::default()).unwrap();
    let co = results.get("CO").unwrap();

    assert_eq!(co.first_order.len(), 3);
    assert_eq!(co.second_order.as_ref().unwrap().len(), 2);
}

#[test]
fn test_file_without_blank_line_has_no_second_order() {
    let dir = dataset();

    let results = read_sensitivity_dir(dir.path(), &ScanConfig::default()).unwrap();
    let h2o = results.get("H2O").unwrap();

    assert_eq!(h2o.first_order.len(), 2);
    assert!(h2o.second_order.is_none());
}

#[test]
fn test_one_entry_per_qualifying_file() {
    let dir = dataset();
    fs::create_dir(dir.path().join("analysis_dir.txt")).unwrap();
    write(dir.path(), "archive.txt", "not an analysis file");

    let results = read_sensitivity_dir(dir.path(), &ScanConfig::default()).unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results.names().collect::<Vec<_>>(), ["CO", "H2O"]);
}

#[test]
fn test_exclusions_are_skipped() {
    let dir = dataset();
    write(dir.path(), "analysis_light_aromatic-C-C.txt", "garbage\n\n\nmore");
    write(dir.path(), "analysis_light_aromatic-methoxyl.txt", "garbage");

    let config = ScanConfig::default().with_exclusions([
        "analysis_light_aromatic-C-C.txt",
        "analysis_light_aromatic-methoxyl.txt",
    ]);
    let results = read_sensitivity_dir(dir.path(), &config).unwrap();

    assert_eq!(results.len(), 2);
    assert!(!results.contains("light_aromatic-C-C"));
}

#[test]
fn test_exclusion_of_absent_file_is_not_an_error() {
    let dir = dataset();
    let config = ScanConfig::default().with_exclusions(["analysis_missing.txt"]);

    let results = read_sensitivity_dir(dir.path(), &config).unwrap();

    assert_eq!(results.len(), 2);
}

#[test]
fn test_cleanup_applied_on_load() {
    let dir = dataset();

    let results = read_sensitivity_dir(dir.path(), &ScanConfig::default()).unwrap();
    let co = results.get("CO").unwrap();

    let names: Vec<_> = co.first_order.parameters().collect();
    assert_eq!(names, ["k1", "k2", "k3"]);
    assert_eq!(co.first_order.rows()[1].s1, 0.0);
    assert_eq!(co.second_order.as_ref().unwrap().rows()[1].s2, 0.0);
}

#[test]
fn test_custom_prefix_and_extension() {
    let dir = tempdir().unwrap();
    write(dir.path(), "sobol-CO.dat", H2O);
    write(dir.path(), "analysis_CO.txt", H2O);

    let config = ScanConfig {
        prefix: "sobol-".into(),
        extension: ".dat".into(),
        ..Default::default()
    };
    let results = read_sensitivity_dir(dir.path(), &config).unwrap();

    assert_eq!(results.names().collect::<Vec<_>>(), ["CO"]);
}

#[test]
fn test_missing_directory_fails() {
    let dir = tempdir().unwrap();

    let err = read_sensitivity_dir(&dir.path().join("nope"), &ScanConfig::default()).unwrap_err();

    assert!(matches!(err, ReadError::Io { .. }));
}

#[test]
fn test_one_bad_file_aborts_scan() {
    let dir = dataset();
    write(
        dir.path(),
        "analysis_bad.txt",
        "Parameter S1\nk1 0.1\n\nParameter_1 Parameter_2 S2\nk1 k2 0.1\n\nParameter S1\n",
    );

    let err = read_sensitivity_dir(dir.path(), &ScanConfig::default()).unwrap_err();

    match err {
        ReadError::Parse { path, source } => {
            assert!(path.ends_with("analysis_bad.txt"));
            assert!(matches!(source, ParseError::MultipleBlankLines { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_identifier_fails() {
    let dir = dataset();
    write(dir.path(), "analysis_.txt", H2O);

    let err = read_sensitivity_dir(dir.path(), &ScanConfig::default()).unwrap_err();

    assert!(matches!(err, ReadError::EmptyIdentifier { .. }));
}

#[test]
fn test_missing_s1_column_fails() {
    let dir = tempdir().unwrap();
    write(dir.path(), "analysis_CO.txt", "Parameter ST\nk1 0.1\n");

    let err = read_sensitivity_dir(dir.path(), &ScanConfig::default()).unwrap_err();

    assert!(matches!(
        err,
        ReadError::Parse {
            source: ParseError::MissingColumn { .. },
            ..
        }
    ));
}
