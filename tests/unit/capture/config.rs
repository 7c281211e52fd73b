use super::*;

fn existing_file() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml")
}

#[test]
fn defaults_are_valid_for_existing_input() {
    let cfg = CaptureConfig::new(existing_file(), "out");
    assert_eq!(cfg.tick, DEFAULT_TICK);
    assert!(cfg.stamp_output_dir);
    assert!(!cfg.write_manifest);
    cfg.validate().unwrap();
}

#[test]
fn missing_input_is_rejected() {
    let cfg = CaptureConfig::new("does/not/exist.gif", "out");
    let err = cfg.validate().unwrap_err();
    assert!(matches!(err, AnimatorError::Validation(_)));
}

#[test]
fn zero_tick_is_rejected() {
    let cfg = CaptureConfig::new(existing_file(), "out").with_tick(Duration::ZERO);
    assert!(cfg.validate().is_err());
}

#[test]
fn zero_max_duration_is_rejected() {
    let cfg =
        CaptureConfig::new(existing_file(), "out").with_max_duration(Some(Duration::ZERO));
    assert!(cfg.validate().is_err());

    let cfg = CaptureConfig::new(existing_file(), "out")
        .with_max_duration(Some(Duration::from_secs(1)));
    cfg.validate().unwrap();
}
