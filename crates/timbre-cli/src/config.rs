use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use timbre_core::artifact::{CATALOG_FILE, MATRIX_FILE};
use timbre_search::DEFAULT_K;
use toml_edit::DocumentMut;

/// Keys accepted by `timbre config get` and `timbre config set`.
pub const KEYS: &[&str] = &[
    "data_dir",
    "catalog_file",
    "matrix_file",
    "default_k",
    "logging.level",
    "logging.coloured",
];

/// Configuration for timbre.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (TIMBRE_* prefix)
/// 3. Config file (~/.config/timbre/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the precomputed artifacts.
    ///
    /// Can be set via:
    /// - CLI: --data-dir /path/to/data
    /// - ENV: TIMBRE_DATA_DIR
    /// - Config: data_dir = "/path/to/data"
    /// - Default: ~/.local/share/timbre
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Catalog file, relative to `data_dir` unless absolute.
    #[serde(default = "default_catalog_file")]
    pub catalog_file: PathBuf,

    /// Similarity matrix file, relative to `data_dir` unless absolute.
    #[serde(default = "default_matrix_file")]
    pub matrix_file: PathBuf,

    /// How many recommendations to show when `-k` is not given.
    #[serde(default = "default_k", deserialize_with = "deserialize_count")]
    pub default_k: usize,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_coloured", deserialize_with = "deserialize_flag")]
    pub coloured: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            coloured: default_coloured(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            catalog_file: default_catalog_file(),
            matrix_file: default_matrix_file(),
            default_k: default_k(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/timbre/config.toml
    /// Reads environment variables with TIMBRE_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration using an explicit config file path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("timbre");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?;

        config.with_env(|name| std::env::var(name).ok())
    }

    /// Apply `TIMBRE_*` variables that the flat env scan cannot reach.
    ///
    /// Nested `logging.*` keys only exist in the environment as
    /// `TIMBRE_LOGGING_*`, and every value arrives as a string.
    fn with_env<F>(mut self, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(k) = var("TIMBRE_DEFAULT_K") {
            self.default_k = parse_count(&k).context("Invalid TIMBRE_DEFAULT_K")?;
        }
        if let Some(level) = var("TIMBRE_LOGGING_LEVEL") {
            self.logging.level = level.trim().to_string();
        }
        if let Some(coloured) = var("TIMBRE_LOGGING_COLOURED") {
            self.logging.coloured =
                parse_flag(&coloured).context("Invalid TIMBRE_LOGGING_COLOURED")?;
        }
        Ok(self)
    }

    /// Apply CLI overrides on top of the loaded configuration.
    #[must_use]
    pub fn with_overrides(
        mut self,
        data_dir: Option<PathBuf>,
        catalog: Option<PathBuf>,
        matrix: Option<PathBuf>,
    ) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        if let Some(path) = catalog {
            self.catalog_file = path;
        }
        if let Some(path) = matrix {
            self.matrix_file = path;
        }
        self
    }

    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(&self.catalog_file)
    }

    #[must_use]
    pub fn matrix_path(&self) -> PathBuf {
        self.data_dir.join(&self.matrix_file)
    }

    /// Current value of a config key, formatted for display.
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "data_dir" => self.data_dir.display().to_string(),
            "catalog_file" => self.catalog_file.display().to_string(),
            "matrix_file" => self.matrix_file.display().to_string(),
            "default_k" => self.default_k.to_string(),
            "logging.level" => self.logging.level.clone(),
            "logging.coloured" => self.logging.coloured.to_string(),
            _ => anyhow::bail!(unknown_key(key)),
        };
        Ok(value)
    }
}

fn parse_count(value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .with_context(|| format!("expected a whole number, got {:?}", value))
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("expected true or false, got {:?}", value),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CountOrText {
    Count(u64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagOrText {
    Flag(bool),
    Text(String),
}

/// Accept `5` or `"5"`; environment values reach serde as strings.
fn deserialize_count<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    match CountOrText::deserialize(deserializer)? {
        CountOrText::Count(n) => usize::try_from(n).map_err(de::Error::custom),
        CountOrText::Text(text) => parse_count(&text).map_err(de::Error::custom),
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match FlagOrText::deserialize(deserializer)? {
        FlagOrText::Flag(flag) => Ok(flag),
        FlagOrText::Text(text) => parse_flag(&text).map_err(de::Error::custom),
    }
}

fn unknown_key(key: &str) -> String {
    format!("Unknown config key: {}\n\nValid keys: {}", key, KEYS.join(", "))
}

/// Set `key` to `value` in the TOML text of a config file.
///
/// Comments and layout of the rest of the file are preserved.
pub fn set_value(contents: &str, key: &str, value: &str) -> Result<String> {
    let mut doc = contents
        .parse::<DocumentMut>()
        .context("Failed to parse config file")?;

    match key {
        "data_dir" | "catalog_file" | "matrix_file" => {
            doc[key] = toml_edit::value(value);
        }
        "default_k" => {
            let k: i64 = value
                .parse()
                .with_context(|| format!("default_k must be a whole number, got {:?}", value))?;
            anyhow::ensure!(k >= 0, "default_k must not be negative");
            doc[key] = toml_edit::value(k);
        }
        "logging.level" | "logging.coloured" => {
            if doc.get("logging").is_some_and(|item| !item.is_table_like()) {
                anyhow::bail!("'logging' in config file is not a table");
            }
            let field = key.trim_start_matches("logging.");
            if field == "coloured" {
                let coloured: bool = value
                    .parse()
                    .with_context(|| format!("logging.coloured must be true or false, got {:?}", value))?;
                doc["logging"][field] = toml_edit::value(coloured);
            } else {
                crate::logging::parse_level(value)?;
                doc["logging"][field] = toml_edit::value(value);
            }
        }
        _ => anyhow::bail!(unknown_key(key)),
    }

    Ok(doc.to_string())
}

/// Get the default data directory.
///
/// Returns: ~/.local/share/timbre (or platform equivalent)
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("timbre")
}

fn default_catalog_file() -> PathBuf {
    PathBuf::from(CATALOG_FILE)
}

fn default_matrix_file() -> PathBuf {
    PathBuf::from(MATRIX_FILE)
}

const fn default_k() -> usize {
    DEFAULT_K
}

fn default_log_level() -> String {
    String::from("warn")
}

const fn default_coloured() -> bool {
    true
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/timbre/config.toml
/// - macOS: ~/Library/Application Support/timbre/config.toml
/// - Windows: %APPDATA%\timbre\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("timbre")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Timbre Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (TIMBRE_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Directory holding the precomputed similarity artifacts
#
# Can also be set via:
# - CLI: timbre --data-dir /custom/dir recommend "Song"
# - Environment: TIMBRE_DATA_DIR=/custom/dir
#
# Default: Platform-specific data directory
#data_dir = "/path/to/timbre/data"

# Artifact file names, relative to data_dir unless absolute
catalog_file = "catalog.json"
matrix_file = "similarity.json"

# Number of recommendations shown when -k is not given
default_k = 5

[logging]
# One of: trace, debug, info, warn, error
level = "warn"
coloured = true
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    ensure_config_file_at(&config_file_path())
}

fn ensure_config_file_at(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
