//! Configuration for Cofre
//!
//! ## Configuration Resolution
//!
//! 1. Embedded defaults
//! 2. TOML file: explicit path, else `~/.local/share/cofre/config.toml` if present
//! 3. Environment overrides (`COFRE_DB`, `OLLAMA_HOST`, `COFRE_MODEL`)
//!
//! `DB_PATH` and `MODELO_FINANCEIRO` are still honored for existing setups,
//! but the `COFRE_*` names win when both are set.
//!
//! Components never read the environment themselves; they receive the
//! resolved values through constructors.
//!
//! ```toml
//! db_path = "dados/transacoes.db"
//!
//! [ollama]
//! host = "http://localhost:11434"
//! model = "qwen:7b"
//! fallback_model = "llama3"
//! timeout_secs = 30
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable overriding the database path
pub const DB_PATH_ENV: &str = "COFRE_DB";
/// Environment variable overriding the Ollama host
pub const OLLAMA_HOST_ENV: &str = "OLLAMA_HOST";
/// Environment variable overriding the classification model
pub const MODEL_ENV: &str = "COFRE_MODEL";
/// Older name for [`DB_PATH_ENV`]
pub const LEGACY_DB_PATH_ENV: &str = "DB_PATH";
/// Older name for [`MODEL_ENV`]
pub const LEGACY_MODEL_ENV: &str = "MODELO_FINANCEIRO";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
    /// Ollama classifier settings
    pub ollama: OllamaConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("dados/transacoes.db"),
            ollama: OllamaConfig::default(),
        }
    }
}

/// Ollama classifier settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server
    pub host: String,
    /// Preferred model
    pub model: String,
    /// Model used when the preferred one is not installed
    pub fallback_model: String,
    /// Timeout for a single classification call
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:11434".to_string(),
            model: "qwen:7b".to_string(),
            fallback_model: "llama3".to_string(),
            timeout_secs: 30,
        }
    }
}

impl OllamaConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from an explicit file, or the default location
    ///
    /// A missing default file is not an error; a missing explicit file is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(default_path) if default_path.exists() => Self::from_file(&default_path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        debug!("Loaded config from {}", path.display());
        Self::from_toml(&content)
    }

    /// Parse TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
    }

    /// Apply overrides from a variable lookup
    ///
    /// Takes the lookup as a function so callers decide where values come
    /// from (`std::env::var` in the CLI, a map in tests).
    pub fn apply_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(db) = non_empty(DB_PATH_ENV).or_else(|| non_empty(LEGACY_DB_PATH_ENV)) {
            self.db_path = PathBuf::from(db);
        }
        if let Some(host) = non_empty(OLLAMA_HOST_ENV) {
            self.ollama.host = host;
        }
        if let Some(model) = non_empty(MODEL_ENV).or_else(|| non_empty(LEGACY_MODEL_ENV)) {
            self.ollama.model = model;
        }
        self
    }
}

/// Default config file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("cofre").join("config.toml"))
}
