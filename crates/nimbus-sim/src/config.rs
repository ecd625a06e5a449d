//! Sky configuration, loaded from an optional TOML file

use nimbus_core::{NimbusError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One ground thermal, expressed as fractions of the viewport width
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalConfig {
    /// Left edge of the source span (fraction of width)
    pub start: f32,
    /// Right edge of the source span (fraction of width)
    pub end: f32,
    /// Emission rate in puffs per second
    #[serde(default = "default_thermal_rate")]
    pub rate: f32,
}

fn default_thermal_rate() -> f32 {
    4.0
}

/// Top-level scene configuration.
///
/// Every field falls back to its default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    pub width: u32,
    pub height: u32,
    /// Fixed RNG seed; wall-clock seeded when absent
    pub seed: Option<u32>,
    /// Initial ambient breeze in pixels per second
    pub breeze: f32,
    pub breeze_step: f32,
    pub rate_step: f32,
    /// Lowest emission rate reachable through user adjustment
    pub min_rate: f32,
    /// Frame delta clamp in seconds
    pub max_dt: f32,
    /// Mid-level seeding probability per 1/60 s
    pub mid_level_chance: f32,
    /// Cap on live puffs; spawns beyond it are dropped
    pub max_puffs: usize,
    /// Height of the ground strip, also the thermal emission height
    pub ground_height: f32,
    pub thermals: Vec<ThermalConfig>,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 600,
            seed: None,
            breeze: 12.0,
            breeze_step: 4.0,
            rate_step: 0.8,
            min_rate: 0.6,
            max_dt: 0.033,
            mid_level_chance: 0.02,
            max_puffs: 2000,
            ground_height: 110.0,
            thermals: vec![
                ThermalConfig {
                    start: 0.18,
                    end: 0.38,
                    rate: 4.0,
                },
                ThermalConfig {
                    start: 0.55,
                    end: 0.82,
                    rate: 3.2,
                },
            ],
        }
    }
}

impl SkyConfig {
    /// Read and parse a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("[sky] Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse a config from TOML text and sanitize it
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut config: SkyConfig = toml::from_str(text)?;
        config.sanitize()?;
        Ok(config)
    }

    /// Repair values that would break the simulation invariants.
    ///
    /// Recoverable problems are fixed with a warning; a config that leaves
    /// nothing to simulate is rejected.
    pub fn sanitize(&mut self) -> Result<()> {
        self.check_finite()?;

        if self.width == 0 || self.height == 0 {
            log::warn!(
                "[sky] Window size {}x{} is empty, using 960x600",
                self.width,
                self.height
            );
            self.width = 960;
            self.height = 600;
        }
        if self.min_rate <= 0.0 {
            log::warn!("[sky] min_rate must be positive, using 0.6");
            self.min_rate = 0.6;
        }
        if self.max_dt <= 0.0 {
            log::warn!("[sky] max_dt must be positive, using 0.033");
            self.max_dt = 0.033;
        }
        self.mid_level_chance = self.mid_level_chance.max(0.0);

        for (i, thermal) in self.thermals.iter_mut().enumerate() {
            if thermal.start > thermal.end {
                log::warn!("[sky] Thermal {i} span is reversed, swapping");
                std::mem::swap(&mut thermal.start, &mut thermal.end);
            }
            if thermal.rate < self.min_rate {
                log::warn!(
                    "[sky] Thermal {i} rate {} is below the floor, raising to {}",
                    thermal.rate,
                    self.min_rate
                );
                thermal.rate = self.min_rate;
            }
        }

        if self.max_puffs == 0 {
            return Err(NimbusError::ConfigError(
                "max_puffs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// NaN or infinite numbers can't be repaired into anything meaningful
    fn check_finite(&self) -> Result<()> {
        let scalars = [
            ("breeze", self.breeze),
            ("breeze_step", self.breeze_step),
            ("rate_step", self.rate_step),
            ("min_rate", self.min_rate),
            ("max_dt", self.max_dt),
            ("mid_level_chance", self.mid_level_chance),
            ("ground_height", self.ground_height),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(NimbusError::ConfigError(format!(
                    "{name} must be a finite number, got {value}"
                )));
            }
        }

        for (i, thermal) in self.thermals.iter().enumerate() {
            let fields = [
                ("start", thermal.start),
                ("end", thermal.end),
                ("rate", thermal.rate),
            ];
            for (name, value) in fields {
                if !value.is_finite() {
                    return Err(NimbusError::ConfigError(format!(
                        "thermals[{i}].{name} must be a finite number, got {value}"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let config = SkyConfig::default();
        assert_eq!(config.thermals.len(), 2);
        assert!(config.min_rate > 0.0);
        assert!(config.max_puffs > 0);
        for t in &config.thermals {
            assert!(t.start <= t.end);
            assert!(t.rate >= config.min_rate);
        }
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = SkyConfig::from_toml_str("").unwrap();
        assert_eq!(config, SkyConfig::default());
    }

    #[test]
    fn bundled_demo_matches_defaults() {
        let text = include_str!("../../../demos/sky.toml");
        let config = SkyConfig::from_toml_str(text).unwrap();
        assert_eq!(config, SkyConfig::default());
    }

    #[test]
    fn parse_partial_override() {
        let text = r#"
breeze = -20
seed = 99

[[thermals]]
start = 0.1
end = 0.9
rate = 6.5
"#;
        let config = SkyConfig::from_toml_str(text).unwrap();
        assert!((config.breeze + 20.0).abs() < 1e-6);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.thermals.len(), 1);
        assert!((config.thermals[0].rate - 6.5).abs() < 1e-6);
        // Untouched fields keep their defaults
        assert_eq!(config.width, 960);
        assert!((config.rate_step - 0.8).abs() < 1e-6);
    }

    #[test]
    fn thermal_rate_defaults_when_missing() {
        let text = r#"
[[thermals]]
start = 0.2
end = 0.4
"#;
        let config = SkyConfig::from_toml_str(text).unwrap();
        assert!((config.thermals[0].rate - 4.0).abs() < 1e-6);
    }

    #[test]
    fn sanitize_swaps_and_raises() {
        let text = r#"
min_rate = 1.0

[[thermals]]
start = 0.8
end = 0.3
rate = 0.1
"#;
        let config = SkyConfig::from_toml_str(text).unwrap();
        let t = &config.thermals[0];
        assert!(t.start <= t.end);
        assert!((t.rate - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_cap_is_rejected() {
        let err = SkyConfig::from_toml_str("max_puffs = 0").unwrap_err();
        assert!(matches!(err, NimbusError::ConfigError(_)));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        for text in [
            "max_dt = nan",
            "min_rate = inf",
            "breeze = -inf",
            "mid_level_chance = nan",
            "[[thermals]]\nstart = 0.1\nend = 0.3\nrate = nan",
            "[[thermals]]\nstart = nan\nend = 0.3",
            "[[thermals]]\nstart = 0.1\nend = inf",
        ] {
            let err = SkyConfig::from_toml_str(text).unwrap_err();
            assert!(
                matches!(err, NimbusError::ConfigError(_)),
                "{text:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = SkyConfig::from_toml_str("breeze = [").unwrap_err();
        assert!(matches!(err, NimbusError::TomlParseError(_)));
    }
}
