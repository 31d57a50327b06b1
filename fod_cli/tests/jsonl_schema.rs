use assert_cmd::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn write_valid_config(dir: &tempfile::TempDir) -> PathBuf {
    let root = dir.path().display();
    let toml = format!(
        r#"
[paths]
hbm_enable = "{root}/hbm"
dim_alpha = "{root}/dim_alpha"
hall_calibration = "{root}/hall_data_calib"
hall_persist = "{root}/tri_state_hall_data"

[logging]
level = "debug"
"#
    );
    let path = dir.path().join("cfg.toml");
    fs::write(&path, toml).unwrap();
    path
}

fn run_json(dir: &tempfile::TempDir, args: &[&str]) -> serde_json::Value {
    let cfg = write_valid_config(dir);
    let mut cmd = Command::cargo_bin("fodctl").unwrap();
    cmd.arg("--json")
        .arg("--log-level")
        .arg("error")
        .arg("--config")
        .arg(&cfg)
        .args(args);

    let out = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8_lossy(&out);
    let line = stdout.lines().next().unwrap_or("").to_string();
    assert!(!line.is_empty(), "no JSON line; stdout was: {stdout}");
    serde_json::from_str(&line).expect("valid JSON")
}

/// Dim amount reports the variant and an integer amount.
#[rstest]
fn dim_amount_schema() {
    let dir = tempdir().unwrap();
    let v = run_json(
        &dir,
        &[
            "--prop",
            "ro.product.device=OnePlus7",
            "--prop",
            "persist.vendor.sys.fod.icon.dim=100",
            "dim-amount",
            "--brightness",
            "100",
        ],
    );
    assert_eq!(v["variant"], "TableDriven");
    assert_eq!(v["brightness"], 100);
    assert_eq!(v["dim_amount"].as_i64(), Some(112));
}

/// Press reports every vendor call in order with op-codes.
#[rstest]
fn press_traffic_schema() {
    let dir = tempdir().unwrap();
    let v = run_json(&dir, &["press"]);

    assert_eq!(v["op"], "press");
    assert_eq!(v["state"], "Pressed");
    assert_eq!(v["hbm"].as_i64(), Some(1));

    let calls = v["display"].as_array().expect("display array");
    let seq: Vec<(i64, i64)> = calls
        .iter()
        .map(|c| (c["code"].as_i64().unwrap(), c["value"].as_i64().unwrap()))
        .collect();
    assert_eq!(seq, vec![(8, 2), (10, 1), (9, 1)]);
    for c in calls {
        assert!(c.get("mode").and_then(|m| m.as_str()).is_some());
    }
    assert!(v["fingerprint"].as_array().unwrap().is_empty());
}

#[rstest]
fn enroll_traffic_schema() {
    let dir = tempdir().unwrap();
    let v = run_json(&dir, &["enroll"]);
    let codes: Vec<i64> = v["fingerprint"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["code"].as_i64().unwrap())
        .collect();
    assert_eq!(codes, vec![4, 8, 10]);
    assert_eq!(v["state"], "Idle");
}

#[rstest]
fn table_is_a_json_array() {
    let dir = tempdir().unwrap();
    let v = run_json(&dir, &["table"]);
    let rows = v.as_array().expect("array");
    assert_eq!(rows.len(), 21);
    assert_eq!(rows[0]["brightness"], 0);
    assert_eq!(rows[0]["alpha"], 255);
    assert_eq!(rows[20]["brightness"], 2000);
}

/// Errors in JSON mode are a single object on stderr with a stable reason.
#[rstest]
fn error_schema() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("bad.toml");
    fs::write(&cfg, "[dim]\nbrightness_scale = 0.0\n").unwrap();

    let mut cmd = Command::cargo_bin("fodctl").unwrap();
    cmd.arg("--json").arg("--config").arg(&cfg).arg("geometry");
    let out = cmd.assert().code(2).get_output().stderr.clone();
    let stderr = String::from_utf8_lossy(&out);
    let line = stderr
        .lines()
        .find(|l| l.contains("\"reason\""))
        .unwrap_or("")
        .to_string();
    let v: serde_json::Value = serde_json::from_str(&line).expect("valid JSON");
    assert_eq!(v["reason"], "Config");
    assert_eq!(v["exit_code"], 2);
    assert!(v["message"].as_str().unwrap().contains("brightness_scale"));
}
