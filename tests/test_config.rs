use std::io::Write;
use std::time::Duration;

use sky_burger::config::*;

#[test]
fn defaults_match_the_game() {
    let config = GameConfig::default();
    assert_eq!(config.spawn_delay(), Duration::from_secs(2));
    assert_eq!(config.finisher_chance, 0.25);
    assert_eq!(config.mission_relevant_chance, 0.3);
    assert_eq!(config.unit_price, 0.6);
    assert_eq!(config.gratuity_rate, 0.15);
    assert!(config.validate().is_empty());
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let config = GameConfig::from_toml_str("finisher_chance = 0.1\n").unwrap();
    assert_eq!(config.finisher_chance, 0.1);
    assert_eq!(config.mission_relevant_chance, 0.3);
    assert_eq!(config.bias().finisher_chance, 0.1);
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = GameConfig::from_toml_str("finisher_chance = [").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn fall_speed_grows_with_level() {
    let config = GameConfig::default();
    assert!(config.fall_speed_for(5) > config.fall_speed_for(1));
    assert_eq!(config.fall_speed_for(2), 7.0);
}

#[test]
fn validate_reports_bad_values() {
    let bad = GameConfig {
        finisher_chance: 1.5,
        mission_relevant_chance: -0.1,
        spawn_delay_secs: 0.0,
        unit_price: -1.0,
        sink_rate: 0.0,
        ..GameConfig::default()
    };
    let warnings = bad.validate();
    assert_eq!(warnings.len(), 5, "{warnings:?}");
}

#[test]
fn sanitized_clamps_into_range() {
    let bad = GameConfig {
        finisher_chance: 1.5,
        mission_relevant_chance: -0.1,
        spawn_delay_secs: -2.0,
        fall_speed: f32::NAN,
        hit_precision: -4,
        ..GameConfig::default()
    };
    let fixed = bad.sanitized();
    assert_eq!(fixed.finisher_chance, 1.0);
    assert_eq!(fixed.mission_relevant_chance, 0.0);
    assert_eq!(fixed.spawn_delay_secs, 2.0);
    assert_eq!(fixed.fall_speed, 6.0);
    assert_eq!(fixed.hit_precision, 0);
    assert!(fixed.validate().is_empty());
}

#[test]
fn load_or_default_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = GameConfig::load_or_default(dir.path().join("absent.toml"));
    assert_eq!(config, GameConfig::default());
}

#[test]
fn load_or_default_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "spawn_delay_secs = 0.5\nunit_price = 1.0").unwrap();
    let config = GameConfig::load_or_default(file.path());
    assert_eq!(config.spawn_delay(), Duration::from_millis(500));
    assert_eq!(config.pricing().unit_price, 1.0);
}

#[test]
fn load_or_default_survives_garbage() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "spawn_delay_secs = \"soon\"").unwrap();
    assert_eq!(GameConfig::load_or_default(file.path()), GameConfig::default());
}

#[test]
fn huge_delays_are_capped_and_start_a_level() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "spawn_delay_secs = 1e30\nfinish_delay_secs = 1e30").unwrap();
    let config = GameConfig::load_or_default(file.path());
    assert_eq!(config.spawn_delay_secs, MAX_DELAY_SECS);
    assert_eq!(config.finish_delay_secs, MAX_DELAY_SECS);
    assert!(config.validate().is_empty());

    let definition = sky_burger::catalog::lookup(1).unwrap();
    let state = sky_burger::compute::init_state(definition, &config, 40, 20);
    assert_eq!(state.scheduler.delay(), Duration::from_secs(3600));
    assert_eq!(state.finish_delay, Duration::from_secs(3600));
}

#[test]
fn unsanitized_delays_never_panic() {
    let raw = GameConfig {
        spawn_delay_secs: 1e30,
        finish_delay_secs: f32::NAN,
        ..GameConfig::default()
    };
    assert_eq!(raw.spawn_delay(), Duration::from_secs(3600));
    assert_eq!(raw.finish_delay(), Duration::from_secs(1));
    assert_eq!(raw.validate().len(), 1);
}
