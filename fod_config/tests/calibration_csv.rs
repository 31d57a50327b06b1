use std::fs::File;
use std::io::Write;

use fod_config::{CalibrationRow, load_calibration_csv, parse_calibration_csv};
use rstest::rstest;
use tempfile::tempdir;

#[rstest]
fn csv_round_trips_rows_in_file_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("table.csv");

    let mut f = File::create(&path).unwrap();
    writeln!(f, "brightness,alpha").unwrap();
    writeln!(f, "0,255").unwrap();
    writeln!(f, "45, 204").unwrap();
    writeln!(f, "70,190").unwrap();

    let rows = load_calibration_csv(&path).unwrap();
    assert_eq!(
        rows,
        vec![
            CalibrationRow {
                brightness: 0,
                alpha: 255
            },
            CalibrationRow {
                brightness: 45,
                alpha: 204
            },
            CalibrationRow {
                brightness: 70,
                alpha: 190
            },
        ]
    );
}

#[rstest]
fn csv_with_wrong_header_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad_headers.csv");

    let mut f = File::create(&path).unwrap();
    writeln!(f, "level,alpha").unwrap();
    writeln!(f, "0,255").unwrap();

    let err = load_calibration_csv(&path).expect_err("should error on bad headers");
    assert!(format!("{err}").contains("headers 'brightness,alpha'"));
}

#[rstest]
fn csv_with_non_numeric_reports_line() {
    let data = b"brightness,alpha\n0,255\nten,228\n";
    let err = parse_calibration_csv(data).expect_err("should error on non-numeric");
    let msg = format!("{err}");
    assert!(msg.contains("invalid CSV row 3"), "got: {msg}");
}

#[rstest]
fn csv_with_only_header_errors() {
    let err = parse_calibration_csv(b"brightness,alpha\n").expect_err("no rows");
    assert!(format!("{err}").contains("no rows"));
}

#[rstest]
fn missing_file_errors_with_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    let err = load_calibration_csv(&path).expect_err("missing file");
    assert!(format!("{err}").contains("open calibration CSV"));
}
