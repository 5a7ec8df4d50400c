//! Configuration loaded from `config.toml`.
//!
//! Every key is optional:
//!
//! ```toml
//! [repl]
//! prompt = "sqlit# "
//! history = true
//! history_file = "~/.sqlit_history"
//!
//! [output]
//! format = "sql"   # sql | debug | json
//! color = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SqlitError, SqlitResult};
use crate::output::OutputFormat;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub repl: ReplConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplConfig {
    pub prompt: String,
    /// Persist entered lines between sessions.
    pub history: bool,
    /// Defaults to `~/.sqlit_history`.
    pub history_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "sqlit# ".to_string(),
            history: true,
            history_file: None,
        }
    }
}

impl ReplConfig {
    /// Where history is kept, or `None` when disabled or no home directory exists.
    pub fn history_path(&self) -> Option<PathBuf> {
        if !self.history {
            return None;
        }
        match &self.history_file {
            Some(path) => expand_home(path),
            None => dirs::home_dir().map(|home| home.join(".sqlit_history")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Sql,
            color: true,
        }
    }
}

impl Config {
    /// Parse a config from TOML text.
    pub fn from_toml(src: &str) -> SqlitResult<Self> {
        toml::from_str(src).map_err(|e| SqlitError::Config(e.to_string()))
    }

    /// Read and parse the config at `path`.
    pub fn from_file(path: &Path) -> SqlitResult<Self> {
        if !path.exists() {
            return Err(SqlitError::Config(format!("{} not found", path.display())));
        }
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| SqlitError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load `explicit` if given, else the per-user config if present, else defaults.
    pub fn load(explicit: Option<&Path>) -> SqlitResult<Self> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading config");
            return Self::from_file(path);
        }
        match Self::default_path().filter(|p| p.exists()) {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// `<config dir>/sqlit/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sqlit").join("config.toml"))
    }
}

fn expand_home(path: &Path) -> Option<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir().map(|home| home.join(rest)),
        Err(_) => Some(path.to_path_buf()),
    }
}
