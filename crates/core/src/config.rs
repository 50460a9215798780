use crate::error::{HierscopeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const READER_ENV: &str = "HIERSCOPE_READER";
pub const LOG_DIR_ENV: &str = "HIERSCOPE_LOG_DIR";
pub const DEFAULT_LOG_DIR: &str = ".hierscope/logs";

/// Which class reader a project uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReaderStrategy {
    /// Decode compiled class files from output directories and archives.
    #[default]
    Bytecode,
    /// Parse editable source, falling back to archives for libraries.
    Source,
}

impl FromStr for ReaderStrategy {
    type Err = HierscopeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "bytecode" | "binary" => Ok(ReaderStrategy::Bytecode),
            "source" => Ok(ReaderStrategy::Source),
            other => Err(HierscopeError::Config(format!(
                "unknown reader strategy '{}', expected 'bytecode' or 'source'",
                other
            ))),
        }
    }
}

impl fmt::Display for ReaderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReaderStrategy::Bytecode => write!(f, "bytecode"),
            ReaderStrategy::Source => write!(f, "source"),
        }
    }
}

/// Engine-wide settings, resolved from defaults then environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub reader: ReaderStrategy,
    pub log_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reader: ReaderStrategy::default(),
            log_dir: default_log_dir(),
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `HIERSCOPE_READER` and `HIERSCOPE_LOG_DIR`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(reader) = lookup(READER_ENV) {
            config.reader = reader.parse()?;
        }
        if let Some(dir) = lookup(LOG_DIR_ENV) {
            if !dir.trim().is_empty() {
                config.log_dir = PathBuf::from(dir);
            }
        }
        Ok(config)
    }
}

fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_LOG_DIR)
}
