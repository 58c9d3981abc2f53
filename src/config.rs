//! Query defaults
//!
//! Handles loading `rosterdsl.toml`. Every field is optional; an empty file
//! or no file at all yields [`QueryConfig::default()`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

use rosterdsl_core::{JoinType, Nulls};

pub const CONFIG_FILE: &str = "rosterdsl.toml";

// ============================================================================
// AverageMode
// ============================================================================

/// How `AVG` over integer columns is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AverageMode {
    /// Fractional average as computed by the store.
    #[default]
    Native,
    /// Truncated toward zero.
    Truncate,
}

impl AverageMode {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Truncate => "truncate",
        }
    }
}

impl std::fmt::Display for AverageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// QueryConfig
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    /// Join used by `search` when the caller does not pick one.
    pub join: JoinType,
    /// Null placement for order terms that do not set their own.
    pub nulls: Option<Nulls>,
    pub average: AverageMode,
    /// Upper bound on a page's `limit`.
    pub max_page_size: Option<u64>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            join: JoinType::Left,
            nulls: None,
            average: AverageMode::Native,
            max_page_size: None,
        }
    }
}

impl QueryConfig {
    /// Load from `rosterdsl.toml` in the working directory
    pub fn load() -> Result<Self, Error> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load from specific path
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(path.into())
            } else {
                Error::Io(path.into(), e)
            }
        })?;

        let config: Self =
            toml::from_str(&content).map_err(|e| Error::Parse(path.into(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, Error> {
        match Self::load_from(path) {
            Err(Error::NotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::Parse(PathBuf::from("<inline>"), e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.join == JoinType::Cross {
            return Err(Error::Invalid(
                "join must be \"left\" or \"inner\" for member searches".into(),
            ));
        }
        if self.max_page_size == Some(0) {
            return Err(Error::Invalid("max_page_size must be positive".into()));
        }
        Ok(())
    }
}

// ============================================================================
// Error
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type ConfigError = Error;

// ============================================================================
// Tests
// ============================================================================
