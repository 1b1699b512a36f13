//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.situations/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::ConfigError;
use crate::core::loader::{LoadOptions, default_dataset_path};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SituationsConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub dataset_path: Option<PathBuf>,
    pub category_column: Option<String>,
    pub sheet: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub hide_resolution: Option<bool>,
    pub wrap_width: Option<usize>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_WRAP_WIDTH: usize = 78;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub dataset_path: PathBuf,
    pub category_column: Option<String>,
    pub sheet: Option<String>,
    pub log_level: LevelFilter,
    pub hide_resolution: bool,
    pub wrap_width: usize,
    pub seed: Option<u64>,
}

impl ResolvedConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            category_column: self.category_column.clone(),
            sheet: self.sheet.clone(),
        }
    }
}

/// Values given on the command line. `None`/`false` = not specified.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub dataset_path: Option<PathBuf>,
    pub category_column: Option<String>,
    pub sheet: Option<String>,
    pub hide_resolution: bool,
    pub seed: Option<u64>,
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.situations/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".situations").join("config.toml"))
}

/// Load config from `~/.situations/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `SituationsConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<SituationsConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(SituationsConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(SituationsConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<SituationsConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: SituationsConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Situations Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# dataset_path = "Situations-n-Resolutions-with-sections.xlsx"   # Or SITUATIONS_DATASET
# category_column = "Section"      # Omit to detect "Section", then "Stroke"
# sheet = "Sheet1"                 # Omit to use the first sheet
# log_level = "debug"              # "error", "warn", "info", "debug", "trace"

# [display]
# hide_resolution = false          # true = tap/press to reveal each resolution
# wrap_width = 78                  # Console card width
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &SituationsConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], with the environment supplied by `env`.
pub fn resolve_with_env(
    config: &SituationsConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Dataset: CLI → env → config → default
    let dataset_path = cli
        .dataset_path
        .clone()
        .or_else(|| env("SITUATIONS_DATASET").map(PathBuf::from))
        .or_else(|| config.general.dataset_path.clone())
        .unwrap_or_else(default_dataset_path);

    let category_column = cli
        .category_column
        .clone()
        .or_else(|| env("SITUATIONS_CATEGORY_COLUMN"))
        .or_else(|| config.general.category_column.clone());

    let sheet = cli
        .sheet
        .clone()
        .or_else(|| env("SITUATIONS_SHEET"))
        .or_else(|| config.general.sheet.clone());

    let log_level = match config.general.log_level.as_deref() {
        Some(level) => level.parse().unwrap_or_else(|_| {
            warn!("Unknown log_level {:?}, using {}", level, DEFAULT_LOG_LEVEL);
            DEFAULT_LOG_LEVEL
        }),
        None => DEFAULT_LOG_LEVEL,
    };

    ResolvedConfig {
        dataset_path,
        category_column,
        sheet,
        log_level,
        hide_resolution: cli.hide_resolution || config.display.hide_resolution.unwrap_or(false),
        wrap_width: config.display.wrap_width.unwrap_or(DEFAULT_WRAP_WIDTH).max(20),
        seed: cli.seed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = SituationsConfig::default();
        assert!(config.general.dataset_path.is_none());
        assert!(config.display.hide_resolution.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&SituationsConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.dataset_path, default_dataset_path());
        assert_eq!(resolved.wrap_width, DEFAULT_WRAP_WIDTH);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert!(!resolved.hide_resolution);
        assert!(resolved.category_column.is_none());
        assert!(resolved.seed.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = SituationsConfig {
            general: GeneralConfig {
                dataset_path: Some(PathBuf::from("strokes.xlsx")),
                category_column: Some("Stroke".to_string()),
                sheet: Some("2025".to_string()),
                log_level: Some("warn".to_string()),
            },
            display: DisplayConfig {
                hide_resolution: Some(true),
                wrap_width: Some(100),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.dataset_path, PathBuf::from("strokes.xlsx"));
        assert_eq!(resolved.category_column.as_deref(), Some("Stroke"));
        assert_eq!(resolved.sheet.as_deref(), Some("2025"));
        assert_eq!(resolved.log_level, LevelFilter::Warn);
        assert!(resolved.hide_resolution);
        assert_eq!(resolved.wrap_width, 100);
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = SituationsConfig {
            general: GeneralConfig {
                dataset_path: Some(PathBuf::from("from-config.xlsx")),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |key: &str| (key == "SITUATIONS_DATASET").then(|| "from-env.csv".to_string());

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.dataset_path, PathBuf::from("from-env.csv"));

        let cli = CliOverrides {
            dataset_path: Some(PathBuf::from("from-cli.ods")),
            seed: Some(9),
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.dataset_path, PathBuf::from("from-cli.ods"));
        assert_eq!(resolved.seed, Some(9));
    }

    #[test]
    fn test_bad_log_level_falls_back() {
        let config = SituationsConfig {
            general: GeneralConfig {
                log_level: Some("loud".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[display]
hide_resolution = true
"#;
        let config: SituationsConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.display.hide_resolution, Some(true));
        assert!(config.general.dataset_path.is_none());
        assert!(config.display.wrap_width.is_none());
    }

    #[test]
    fn test_toml_full_file() {
        let toml_str = r#"
[general]
dataset_path = "data/situations.csv"
category_column = "Stroke"
log_level = "info"

[display]
wrap_width = 60
"#;
        let config: SituationsConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.general.dataset_path,
            Some(PathBuf::from("data/situations.csv"))
        );
        assert_eq!(config.general.category_column.as_deref(), Some("Stroke"));
        assert_eq!(config.display.wrap_width, Some(60));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[display\nhide_resolution = ").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
