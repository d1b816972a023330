//! Optional TOML configuration for the command-line session.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use nuggets_core::GoldConfig;
use serde::Deserialize;

/// Settings read from the `--config` file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct SessionConfig {
    /// Seed used when none is passed on the command line.
    pub(crate) seed: Option<u64>,
    /// Gold budget and pile bounds.
    pub(crate) gold: GoldConfig,
}

impl SessionConfig {
    /// Reads and parses the configuration file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::parse(&source)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn parse(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}
