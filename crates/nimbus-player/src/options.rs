//! Config file + command-line overrides shared by both front-ends

use anyhow::{Context, Result};
use clap::Args;
use nimbus_sim::SkyConfig;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    /// Path to a sky config (TOML); defaults apply when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Viewport width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// RNG seed for a reproducible sky
    #[arg(long)]
    pub seed: Option<u32>,
}

impl ConfigOverrides {
    /// Load the config file (if any), then apply the command-line values on top
    pub fn resolve(&self) -> Result<SkyConfig> {
        let mut config = match &self.config {
            Some(path) => SkyConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => SkyConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.sanitize().context("Invalid sky config")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        overrides: ConfigOverrides,
    }

    fn parse(args: &[&str]) -> ConfigOverrides {
        TestCli::try_parse_from(std::iter::once("nimbus").chain(args.iter().copied()))
            .expect("arguments should parse")
            .overrides
    }

    #[test]
    fn no_flags_gives_defaults() {
        let config = parse(&[]).resolve().expect("defaults resolve");
        assert_eq!(config, SkyConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let config = parse(&["--width", "480", "--height", "300", "--seed", "9"])
            .resolve()
            .expect("overrides resolve");
        assert_eq!(config.width, 480);
        assert_eq!(config.height, 300);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.thermals, SkyConfig::default().thermals);
    }

    #[test]
    fn zero_width_is_repaired() {
        let config = parse(&["--width", "0"]).resolve().expect("repaired");
        assert_eq!((config.width, config.height), (960, 600));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let overrides = ConfigOverrides {
            config: Some(PathBuf::from("does/not/exist/sky.toml")),
            ..Default::default()
        };
        let err = overrides.resolve().expect_err("missing file");
        assert!(err.to_string().contains("Failed to load config"));
    }
}
