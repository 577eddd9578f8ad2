//! Runtime configuration.
//!
//! Precedence: explicit overrides > environment > defaults.
//!
//! | Setting   | Environment        | Default                        |
//! |-----------|--------------------|--------------------------------|
//! | data dir  | `FOLIO_DATA_DIR`   | `<platform data dir>/folio`    |
//! | log level | `FOLIO_LOG_LEVEL`  | `default_log_level()`          |
//!
//! Logs always go to `<data dir>/logs`.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "FOLIO_DATA_DIR";
pub const LOG_LEVEL_ENV: &str = "FOLIO_LOG_LEVEL";
const DB_FILE_NAME: &str = "folio.sqlite3";
const APP_DIR_NAME: &str = "folio";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No override, no environment value, and no platform data dir.
    NoDataDir,
    RelativePath(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDataDir => write!(
                f,
                "no data directory: set {DATA_DIR_ENV} or pass an explicit directory"
            ),
            Self::RelativePath(path) => {
                write!(f, "data directory must be absolute, got `{}`", path.display())
            }
        }
    }
}

impl Error for ConfigError {}

/// Values supplied directly by the caller, e.g. CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolioConfig {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl FolioConfig {
    /// Resolves configuration from overrides and the process environment.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Same as `resolve`, reading environment values through `env`.
    pub fn resolve_with(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let non_blank = |value: String| (!value.trim().is_empty()).then_some(value);

        let data_dir = overrides
            .data_dir
            .or_else(|| env(DATA_DIR_ENV).and_then(non_blank).map(PathBuf::from))
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME)))
            .ok_or(ConfigError::NoDataDir)?;
        if !data_dir.is_absolute() {
            return Err(ConfigError::RelativePath(data_dir));
        }

        let log_level = overrides
            .log_level
            .or_else(|| env(LOG_LEVEL_ENV).and_then(non_blank))
            .unwrap_or_else(|| default_log_level().to_string());

        Ok(Self {
            log_dir: data_dir.join("logs"),
            data_dir,
            log_level,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
