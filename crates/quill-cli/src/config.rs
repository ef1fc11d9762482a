//! Configuration for the Quill CLI.
//!
//! Provides the [`QuillConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `QUILL_CONFIG` environment variable
//! 3. XDG default: `~/.config/quill/config.toml`
//! 4. Built-in defaults

use confyg::{Confygery, env};
use quill_content::{DEFAULT_EXCERPT_LENGTH, RenderOptions};
use quill_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const ENV_PREFIX: &str = "QUILL";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the Quill CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuillConfig {
    /// Default rendering options.
    pub render: RenderOptions,

    /// Excerpt settings.
    pub excerpt: ExcerptConfig,
}

/// Excerpt configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcerptConfig {
    /// Maximum excerpt length in characters.
    pub max_length: usize,
}

impl Default for ExcerptConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_EXCERPT_LENGTH,
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl QuillConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        env_opts.add_section("render");
        env_opts.add_section("excerpt");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        explicit
            .map(PathBuf::from)
            .or_else(|| std::env::var("QUILL_CONFIG").ok().map(PathBuf::from))
            .or_else(Self::default_config_path)
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("quill").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::serialization(e.to_string()))
    }

    /// Flatten this config into `QUILL_`-prefixed environment variable pairs.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value =
            toml::Value::try_from(self).map_err(|e| Error::serialization(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, ENV_PREFIX, &mut vars);
        Ok(vars)
    }
}

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                flatten_toml_value(val, &format!("{prefix}_{}", key.to_uppercase()), out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        other => out.push((prefix.to_string(), other.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================
