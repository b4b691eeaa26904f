use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// The backend-maintained snapshot file.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data.json")
}

fn default_poll_interval_ms() -> u64 {
    2_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn config_dir() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .context("could not find config directory")?
        .join("opsdeck");
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

pub fn log_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("opsdeck.log"))
}

/// Load `config.toml` if present; a missing file is just defaults.
pub fn load() -> Result<Config> {
    let path = config_dir()?.join("config.toml");
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config = toml::from_str(&contents)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.data_path, PathBuf::from("data.json"));
        assert_eq!(config.poll_interval_ms, 2_000);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config: Config = toml::from_str(r#"poll_interval_ms = 500"#).unwrap();
        assert_eq!(config.poll_interval_ms, 500);
        assert_eq!(config.data_path, PathBuf::from("data.json"));
    }
}
