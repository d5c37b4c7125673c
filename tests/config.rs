//! 설정 파일 저장/로드 테스트.

use imaging_design_toolbox::{
    config::{self, Config, UnitSystem},
    units::{AngleUnit, LengthUnit},
};
use std::fs;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("imaging_design_toolbox_{}_{name}.toml", std::process::id()))
}

#[test]
fn missing_file_creates_default() {
    let path = temp_path("default");
    let _ = fs::remove_file(&path);
    let cfg = config::load_from(&path).unwrap();
    assert_eq!(cfg, Config::default());
    assert!(path.exists());
    let _ = fs::remove_file(&path);
}

#[test]
fn save_and_reload_round_trip() {
    let path = temp_path("round_trip");
    let mut cfg = Config::default();
    cfg.language = "ko".into();
    cfg.apply_unit_system(UnitSystem::Metric);
    cfg.solver.tolerance = 1e-8;
    cfg.save_to(&path).unwrap();

    let loaded = config::load_from(&path).unwrap();
    assert_eq!(loaded, cfg);
    assert_eq!(loaded.default_units.length, LengthUnit::Meter);
    assert_eq!(loaded.default_units.angle, AngleUnit::Milliradian);
    let _ = fs::remove_file(&path);
}

#[test]
fn partial_file_fills_defaults() {
    let path = temp_path("partial");
    fs::write(&path, "language = \"en\"\n").unwrap();
    let cfg = config::load_from(&path).unwrap();
    assert_eq!(cfg.language, "en");
    assert_eq!(cfg.unit_system, UnitSystem::Imperial);
    assert_eq!(cfg.solver.tolerance, 1e-9);
    let _ = fs::remove_file(&path);
}

#[test]
fn malformed_file_is_a_parse_error() {
    let path = temp_path("malformed");
    fs::write(&path, "unit_system = 42\n").unwrap();
    assert!(matches!(
        config::load_from(&path),
        Err(config::ConfigError::Parse(_))
    ));
    let _ = fs::remove_file(&path);
}
