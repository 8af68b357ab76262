//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the library crates never see it — workspace
//! level conventions (layout dirs, npm scope) live in `mosaic.json`
//! inside the workspace, not here.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables (`MOSAIC_*`)
//! 3. Config file (`--config`, or the default location)
//! 4. Built-in defaults

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults applied when generate flags are omitted.
    pub generate: GenerateDefaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateDefaults {
    pub linter: String,
    pub unit_test_runner: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for GenerateDefaults {
    fn default() -> Self {
        Self {
            linter: "eslint".to_string(),
            unit_test_runner: "jest".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then file, then environment.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("generate.linter", "eslint")?
            .set_default("generate.unit_test_runner", "jest")?
            .set_default("output.no_color", false)?;

        match config_file {
            Some(path) => {
                builder = builder.add_source(config::File::from(path.clone()));
            }
            None => {
                builder = builder
                    .add_source(config::File::from(Self::config_path()).required(false));
            }
        }
        builder = builder.add_source(config::Environment::with_prefix("MOSAIC").separator("__"));

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.mosaic.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "mosaic", "mosaic")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".mosaic.toml"))
    }
}
