/// Tunable game constants, optionally overridden from a TOML file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::entities::SpawnBias;
use crate::outcome::Pricing;

/// Longest spawn or finish delay a config may ask for.
pub const MAX_DELAY_SECS: f32 = 3600.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Seconds between two spawned ingredients.
    pub spawn_delay_secs: f32,
    pub finisher_chance: f64,
    pub mission_relevant_chance: f64,
    /// Money per required ingredient on a win.
    pub unit_price: f64,
    pub gratuity_rate: f64,
    /// Base fall speed in rows per second.
    pub fall_speed: f32,
    /// Extra fall speed per unlocked level.
    pub speed_per_level: f32,
    /// Max column offset between ingredient and stack that still catches.
    pub hit_precision: i32,
    /// Pause between the end of an attempt and the finish report.
    pub finish_delay_secs: f32,
    /// Stack sinking speed (tween progress per second).
    pub sink_rate: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_delay_secs: 2.0,
            finisher_chance: 0.25,
            mission_relevant_chance: 0.3,
            unit_price: 0.6,
            gratuity_rate: 0.15,
            fall_speed: 6.0,
            speed_per_level: 0.5,
            hit_precision: 1,
            finish_delay_secs: 1.0,
            sink_rate: 2.5,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Defaults when the file is absent; defaults plus a warning when it is
    /// unreadable.  Invalid values are logged and clamped.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let config = if path.exists() {
            match Self::load_from_file(path) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("using default config: {err}");
                    Self::default()
                }
            }
        } else {
            Self::default()
        };
        for warning in config.validate() {
            log::warn!("config: {warning}");
        }
        config.sanitized()
    }

    /// Human-readable problems with the current values.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !(0.0..=1.0).contains(&self.finisher_chance) {
            warnings.push(format!(
                "finisher_chance {} outside [0, 1]",
                self.finisher_chance
            ));
        }
        if !(0.0..=1.0).contains(&self.mission_relevant_chance) {
            warnings.push(format!(
                "mission_relevant_chance {} outside [0, 1]",
                self.mission_relevant_chance
            ));
        }
        if self.spawn_delay_secs <= 0.0 {
            warnings.push(format!(
                "spawn_delay_secs {} must be positive",
                self.spawn_delay_secs
            ));
        }
        if self.fall_speed <= 0.0 {
            warnings.push(format!("fall_speed {} must be positive", self.fall_speed));
        }
        if self.speed_per_level < 0.0 {
            warnings.push(format!(
                "speed_per_level {} must not be negative",
                self.speed_per_level
            ));
        }
        if self.unit_price < 0.0 {
            warnings.push(format!("unit_price {} must not be negative", self.unit_price));
        }
        if self.gratuity_rate < 0.0 {
            warnings.push(format!(
                "gratuity_rate {} must not be negative",
                self.gratuity_rate
            ));
        }
        if self.hit_precision < 0 {
            warnings.push(format!(
                "hit_precision {} must not be negative",
                self.hit_precision
            ));
        }
        if self.spawn_delay_secs > MAX_DELAY_SECS {
            warnings.push(format!(
                "spawn_delay_secs {} above {MAX_DELAY_SECS}",
                self.spawn_delay_secs
            ));
        }
        if self.finish_delay_secs > MAX_DELAY_SECS {
            warnings.push(format!(
                "finish_delay_secs {} above {MAX_DELAY_SECS}",
                self.finish_delay_secs
            ));
        }
        if self.finish_delay_secs < 0.0 {
            warnings.push(format!(
                "finish_delay_secs {} must not be negative",
                self.finish_delay_secs
            ));
        }
        if self.sink_rate <= 0.0 {
            warnings.push(format!("sink_rate {} must be positive", self.sink_rate));
        }
        warnings
    }

    /// Copy with every value forced into its valid range.  Non-finite
    /// values fall back to the defaults.
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        Self {
            spawn_delay_secs: positive_or(self.spawn_delay_secs, d.spawn_delay_secs)
                .min(MAX_DELAY_SECS),
            finisher_chance: finite_or(self.finisher_chance, d.finisher_chance).clamp(0.0, 1.0),
            mission_relevant_chance: finite_or(self.mission_relevant_chance, d.mission_relevant_chance)
                .clamp(0.0, 1.0),
            unit_price: finite_or(self.unit_price, d.unit_price).max(0.0),
            gratuity_rate: finite_or(self.gratuity_rate, d.gratuity_rate).max(0.0),
            fall_speed: positive_or(self.fall_speed, d.fall_speed),
            speed_per_level: finite_or(f64::from(self.speed_per_level), 0.0).max(0.0) as f32,
            hit_precision: self.hit_precision.max(0),
            finish_delay_secs: (finite_or(f64::from(self.finish_delay_secs), 0.0).max(0.0) as f32)
                .min(MAX_DELAY_SECS),
            sink_rate: positive_or(self.sink_rate, d.sink_rate),
        }
    }

    pub fn bias(&self) -> SpawnBias {
        SpawnBias {
            finisher_chance: self.finisher_chance,
            mission_relevant_chance: self.mission_relevant_chance,
        }
    }

    pub fn pricing(&self) -> Pricing {
        Pricing {
            unit_price: self.unit_price,
            gratuity_rate: self.gratuity_rate,
        }
    }

    /// Capped at `MAX_DELAY_SECS`; a NaN delay falls back to the default.
    pub fn spawn_delay(&self) -> Duration {
        delay_or(self.spawn_delay_secs, Self::default().spawn_delay_secs)
    }

    pub fn finish_delay(&self) -> Duration {
        delay_or(self.finish_delay_secs, Self::default().finish_delay_secs)
    }

    /// Fall speed for a level; later levels drop faster.
    pub fn fall_speed_for(&self, level: u32) -> f32 {
        self.fall_speed + level as f32 * self.speed_per_level
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

fn delay_or(secs: f32, fallback: f32) -> Duration {
    Duration::try_from_secs_f32(secs.clamp(0.0, MAX_DELAY_SECS))
        .unwrap_or_else(|_| Duration::from_secs_f32(fallback))
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}
