//! Configuration file discovery and loading.
//!
//! Lookup order: `--config PATH`, then `$COMPGRAPHER_CONFIG`, then
//! `./compgrapher.toml`, then built-in defaults. A file named explicitly
//! (by flag or environment) must exist.

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use compgrapher_model::PipelineConfig;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "COMPGRAPHER_CONFIG";

/// Configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "compgrapher.toml";

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Flag(PathBuf),
    Environment(PathBuf),
    WorkingDirectory(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Flag(path) | Self::Environment(path) | Self::WorkingDirectory(path) => {
                Some(path)
            }
            Self::Defaults => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(path) => write!(f, "{} (--config)", path.display()),
            Self::Environment(path) => write!(f, "{} (${CONFIG_ENV})", path.display()),
            Self::WorkingDirectory(path) => write!(f, "{}", path.display()),
            Self::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// Picks the configuration source without reading anything.
pub fn resolve_source(
    flag: Option<&Path>,
    env_value: Option<OsString>,
    working_dir: &Path,
) -> ConfigSource {
    if let Some(path) = flag {
        return ConfigSource::Flag(path.to_path_buf());
    }
    if let Some(value) = env_value.filter(|value| !value.is_empty()) {
        return ConfigSource::Environment(PathBuf::from(value));
    }
    let candidate = working_dir.join(DEFAULT_CONFIG_FILE);
    if candidate.is_file() {
        ConfigSource::WorkingDirectory(candidate)
    } else {
        ConfigSource::Defaults
    }
}

/// Reads and parses one configuration file.
pub fn read_config_file(path: &Path) -> Result<PipelineConfig> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parse config {}", path.display()))
}

/// Loads the configuration from the first available source.
pub fn load_config(flag: Option<&Path>) -> Result<(PipelineConfig, ConfigSource)> {
    let working_dir = std::env::current_dir().context("determine working directory")?;
    let source = resolve_source(flag, std::env::var_os(CONFIG_ENV), &working_dir);
    let config = match source.path() {
        Some(path) => read_config_file(path)?,
        None => {
            info!("no configuration file found, using defaults");
            PipelineConfig::default()
        }
    };
    info!(source = %source, "configuration loaded");
    Ok((config, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn flag_wins_over_environment() {
        let dir = TempDir::new().unwrap();
        let source = resolve_source(
            Some(Path::new("a.toml")),
            Some(OsString::from("b.toml")),
            dir.path(),
        );
        assert_eq!(source, ConfigSource::Flag(PathBuf::from("a.toml")));
    }

    #[test]
    fn environment_wins_over_working_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "").unwrap();
        let source = resolve_source(None, Some(OsString::from("b.toml")), dir.path());
        assert_eq!(source, ConfigSource::Environment(PathBuf::from("b.toml")));
    }

    #[test]
    fn working_directory_file_then_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            resolve_source(None, Some(OsString::new()), dir.path()),
            ConfigSource::Defaults
        );
        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "").unwrap();
        assert_eq!(
            resolve_source(None, None, dir.path()),
            ConfigSource::WorkingDirectory(dir.path().join(DEFAULT_CONFIG_FILE))
        );
    }

    #[test]
    fn reads_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            "highlighted_employer = \"Dartmouth\"\ndrop_top_paid = 2\n\n[output]\nformats = [\"svg\", \"csv\"]\n",
        )
        .unwrap();
        let config = read_config_file(&path).unwrap();
        assert_eq!(config.highlighted_employer.as_deref(), Some("Dartmouth"));
        assert_eq!(config.drop_top_paid, 2);
        assert_eq!(config.output.formats.len(), 2);
        assert!(config.render.show_grid);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = read_config_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("read config"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "drop_top_paid = \"many\"").unwrap();
        let err = read_config_file(&path).unwrap_err();
        assert!(err.to_string().contains("parse config"));
    }
}
