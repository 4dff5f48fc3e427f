//! Configuration loading and resolution
//!
//! Every setting is resolved in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (collected alongside the CLI by the binary)
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error: a warning is logged and the
//! compiled defaults are used. A config file that exists but cannot be
//! parsed is a startup error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "CARTWISE_CONFIG";

/// Bootstrap configuration loaded from TOML file
///
/// Top-level scalars are optional so that an absent key can be told apart
/// from an explicit value when merging with command-line overrides.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Address to bind the HTTP server to
    #[serde(default)]
    pub bind: Option<String>,

    /// Directory holding the catalog and transaction files
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Product catalog file, relative to `data_dir` unless absolute
    #[serde(default)]
    pub products_file: Option<PathBuf>,

    /// Transaction history file, relative to `data_dir` unless absolute
    #[serde(default)]
    pub transactions_file: Option<PathBuf>,

    #[serde(default)]
    pub augmentation: AugmentationConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Seeded corpus augmentation settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AugmentationConfig {
    pub enabled: bool,
    /// Number of passes over the base transactions
    pub rounds: usize,
    /// Probability that a replicated transaction is perturbed
    pub mutation_rate: f64,
    pub seed: u64,
}

impl Default for AugmentationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rounds: 20,
            mutation_rate: 0.3,
            seed: 42,
        }
    }
}

/// Mining thresholds used by the two selectors
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum itemset support for cart recommendations
    pub recommend_min_support: f64,
    /// Minimum rule lift for cart recommendations
    pub min_lift: f64,
    /// Minimum itemset support for "frequently bought together"
    pub together_min_support: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            recommend_min_support: 0.005,
            min_lift: 0.5,
            together_min_support: 0.01,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Compiled defaults used when neither CLI, environment nor TOML supply a value
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub port: u16,
    pub bind: String,
    pub data_dir: PathBuf,
    pub products_file: PathBuf,
    pub transactions_file: PathBuf,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            port: 5000,
            bind: "127.0.0.1".to_string(),
            data_dir: PathBuf::from("./data"),
            products_file: PathBuf::from("products.csv"),
            transactions_file: PathBuf::from("transactions.csv"),
        }
    }
}

/// Values supplied on the command line or through environment variables
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub bind: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub seed: Option<u64>,
}

/// Fully resolved service settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub bind: String,
    pub products_path: PathBuf,
    pub transactions_path: PathBuf,
    pub augmentation: AugmentationConfig,
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

impl Settings {
    /// Merge overrides, TOML values and compiled defaults
    pub fn resolve(overrides: Overrides, toml: TomlConfig) -> Self {
        let defaults = CompiledDefaults::default();

        let data_dir = overrides
            .data_dir
            .or(toml.data_dir)
            .unwrap_or(defaults.data_dir);

        let products_path =
            data_dir.join(toml.products_file.unwrap_or(defaults.products_file));
        let transactions_path =
            data_dir.join(toml.transactions_file.unwrap_or(defaults.transactions_file));

        let mut augmentation = toml.augmentation;
        if let Some(seed) = overrides.seed {
            augmentation.seed = seed;
        }

        Self {
            port: overrides.port.or(toml.port).unwrap_or(defaults.port),
            bind: overrides.bind.or(toml.bind).unwrap_or(defaults.bind),
            products_path,
            transactions_path,
            augmentation,
            engine: toml.engine,
            logging: toml.logging,
        }
    }
}

/// Default config file location: `<config_dir>/cartwise/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cartwise").join("config.toml"))
}

/// Locate the config file: explicit path, then `CARTWISE_CONFIG`, then the
/// platform default location
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    default_config_path()
}

/// Where the TOML config came from
///
/// Returned to the caller so it can be logged once tracing is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read and parsed from this file
    File(PathBuf),
    /// No file at this path; compiled defaults apply
    Missing(PathBuf),
    /// No explicit path, no `CARTWISE_CONFIG` and no platform config directory
    NoConfigDir,
}

/// Load the TOML config file
///
/// A file that does not exist yields the compiled defaults. Does not log.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<(TomlConfig, ConfigSource)> {
    let Some(path) = resolve_config_path(explicit) else {
        return Ok((TomlConfig::default(), ConfigSource::NoConfigDir));
    };

    if !path.exists() {
        return Ok((TomlConfig::default(), ConfigSource::Missing(path)));
    }

    let content = std::fs::read_to_string(&path)?;
    let config = parse_toml_config(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

    Ok((config, ConfigSource::File(path)))
}

/// Parse TOML config text
pub fn parse_toml_config(content: &str) -> Result<TomlConfig> {
    toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
}
