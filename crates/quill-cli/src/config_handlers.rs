//! Handler functions for config CLI commands.
//!
//! Implements `quill config {path,get,init,export}`.

use crate::cli::ConfigAction;
use crate::config::QuillConfig;
use quill_core::{Error, Result};
use std::path::PathBuf;

/// Handle a config subcommand and return what it prints.
///
/// Receives the raw `--config` path as well as the loaded config because
/// `path` and `init` work before a config file exists.
pub fn handle_config_command(
    config_path: Option<&str>,
    config: &QuillConfig,
    action: ConfigAction,
) -> Result<String> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Get { key } => cmd_config_get(config, &key),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force),
        ConfigAction::Export { docker_env } => cmd_config_export(config, docker_env),
    }
}

fn cmd_config_path(config_path: Option<&str>) -> Result<String> {
    let path = QuillConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;

    if !path.exists() {
        tracing::info!("Config file does not exist yet; run `quill config init` to create it");
    }
    Ok(path.display().to_string())
}

fn cmd_config_get(config: &QuillConfig, key: &str) -> Result<String> {
    let root = toml::Value::try_from(config).map_err(|e| Error::serialization(e.to_string()))?;
    let value = key
        .split('.')
        .try_fold(&root, |node, part| node.as_table()?.get(part))
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))?;

    Ok(match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Table(_) | toml::Value::Array(_) => {
            toml::to_string_pretty(value).map_err(|e| Error::serialization(e.to_string()))?
        }
        other => other.to_string(),
    })
}

fn cmd_config_init(file: Option<&str>, force: bool) -> Result<String> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => QuillConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = QuillConfig::default().to_toml_string()?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    tracing::debug!(path = %path.display(), "Wrote default config");
    Ok(format!("Config file created at {}", path.display()))
}

fn cmd_config_export(config: &QuillConfig, docker_env: bool) -> Result<String> {
    let lines: Vec<String> = config
        .to_env_vars()?
        .into_iter()
        .map(|(key, value)| {
            if docker_env {
                format!("--env {key}={value}")
            } else {
                format!("{key}={value}")
            }
        })
        .collect();
    Ok(lines.join("\n"))
}
