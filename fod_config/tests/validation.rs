use fod_config::{Config, load_file, load_toml};
use rstest::rstest;

#[test]
fn empty_document_yields_stock_defaults() {
    let cfg = load_toml("").expect("parse TOML");
    cfg.validate().expect("defaults are valid");
    assert_eq!(cfg.device.model_property, "ro.product.device");
    assert_eq!(cfg.device.table_models, vec!["OnePlus7".to_string()]);
    assert_eq!(cfg.sensor.position_x, 444);
    assert_eq!(cfg.sensor.position_y, 1966);
    assert_eq!(cfg.sensor.size, 190);
    assert!((cfg.dim.brightness_scale - 4.011_765).abs() < 1e-9);
    assert_eq!(cfg.dim.icon_dim_default, "90");
    assert!(
        cfg.paths
            .hbm_enable
            .ends_with("card0-DSI-1/op_friginer_print_hbm")
    );
    assert!(cfg.calibration.csv.is_none());
}

#[test]
fn partial_sections_keep_other_defaults() {
    let toml = r#"
[sensor]
position_x = 520

[paths]
dim_alpha = "/tmp/dim_alpha"
"#;
    let cfg = load_toml(toml).expect("parse TOML");
    cfg.validate().expect("valid");
    assert_eq!(cfg.sensor.position_x, 520);
    assert_eq!(cfg.sensor.size, 190);
    assert_eq!(cfg.paths.dim_alpha.to_str(), Some("/tmp/dim_alpha"));
    assert!(cfg.paths.hall_persist.ends_with("tri_state_hall_data"));
}

#[rstest]
#[case("[dim]\nbrightness_scale = 0.0\n", "brightness_scale")]
#[case("[dim]\nbrightness_scale = -1.5\n", "brightness_scale")]
#[case("[dim]\nicon_dim_default = \"dim\"\n", "icon_dim_default")]
#[case("[dim]\nicon_dim_property = \" \"\n", "icon_dim_property")]
#[case("[device]\nmodel_property = \"\"\n", "model_property")]
#[case("[device]\ntable_models = [\"OnePlus7\", \"\"]\n", "table_models")]
#[case("[sensor]\nsize = -1\n", "sensor.size")]
#[case("[paths]\nhbm_enable = \"\"\n", "paths.hbm_enable")]
#[case("[logging]\nrotation = \"weekly\"\n", "logging.rotation")]
fn rejects_invalid_values(#[case] toml: &str, #[case] needle: &str) {
    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should be rejected");
    let msg = format!("{err}");
    assert!(msg.contains(needle), "expected {needle:?} in {msg:?}");
}

#[test]
fn unknown_types_fail_to_parse() {
    assert!(load_toml("[sensor]\nsize = \"big\"\n").is_err());
}

#[test]
fn load_file_parses_and_validates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fod.toml");
    std::fs::write(&path, "[device]\ntable_models = [\"OnePlus7\", \"OnePlus7T\"]\n").unwrap();
    let cfg: Config = load_file(&path).expect("load");
    assert_eq!(cfg.device.table_models.len(), 2);

    std::fs::write(&path, "[dim]\nbrightness_scale = 0\n").unwrap();
    assert!(load_file(&path).is_err());
}
