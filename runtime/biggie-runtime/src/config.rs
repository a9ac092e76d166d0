///
/// # Runtime Configuration
///
/// Selects the dialect the generated code is written in and the few knobs
/// that differ between the historical C and C++ preambles. The runtime
/// contract (alias names, print semantics, container and defer behavior)
/// is the same for every dialect.
///
/// ## Example biggie.toml
///
/// ```toml
/// [runtime]
/// dialect = "cpp"
/// int_width = 64
/// legacy_aliases = false
/// ```
///
/// Unknown keys in `[runtime]` are rejected; other tables are left to the
/// compiler that owns the file.
///

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use biggie_std_core::error::{Result, RuntimeError};

pub const CONFIG_FILE_NAME: &str = "biggie.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    C,
    Cpp,
}

/// Width of the `int` / `uint` convenience aliases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum IntWidth {
    W32,
    #[default]
    W64,
}

impl IntWidth {
    pub fn bits(self) -> u32 {
        match self {
            IntWidth::W32 => 32,
            IntWidth::W64 => 64,
        }
    }
}

impl TryFrom<u32> for IntWidth {
    type Error = String;

    fn try_from(bits: u32) -> std::result::Result<Self, Self::Error> {
        match bits {
            32 => Ok(IntWidth::W32),
            64 => Ok(IntWidth::W64),
            other => Err(format!("int_width must be 32 or 64, got {}", other)),
        }
    }
}

impl From<IntWidth> for u32 {
    fn from(width: IntWidth) -> u32 {
        width.bits()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    pub dialect: Dialect,
    pub int_width: IntWidth,
    pub legacy_aliases: bool,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    runtime: RuntimeConfig,
}

impl RuntimeConfig {
    pub fn for_dialect(dialect: Dialect) -> Self {
        Self { dialect, ..Self::default() }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| RuntimeError::InvalidConfig(e.to_string()))?;
        Ok(file.runtime)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RuntimeError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), dialect = ?config.dialect, "loaded runtime config");
        Ok(config)
    }

    /// Load the nearest `biggie.toml` at or above `start`, or the defaults
    /// when there is none.
    pub fn discover(start: &Path) -> Result<Self> {
        match find_config_file(start) {
            Some(path) => Self::load(&path),
            None => {
                tracing::debug!(start = %start.display(), "no runtime config found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}
