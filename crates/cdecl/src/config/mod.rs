//! Layered configuration for the extractor.
//!
//! Settings are split into one file per category. [`Settings`] aggregates
//! the categories and handles TOML deserialization of `cdecl.toml`, which is
//! discovered by walking up from the input file. Every field is optional in
//! the file; missing fields keep their defaults.

pub(crate) mod compiler;
pub(crate) mod logging;

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub use compiler::{CLANG_ENV_VAR, CompilerSettings, DEFAULT_CLANG};
use compiler::CompilerSettingsPatch;
pub use logging::{LogLevel, LoggingSettings, init_tracing};
use logging::LoggingSettingsPatch;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{CdeclError, Result};

pub const CONFIG_FILENAME: &str = "cdecl.toml";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    pub compiler: CompilerSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Parse settings from TOML text, resolving relative include paths
    /// against `base_dir`.
    pub fn from_toml_str(
        content: &str,
        base_dir: &Path,
    ) -> std::result::Result<Self, toml::de::Error> {
        let patch: SettingsPatch = toml::from_str(content)?;
        let mut settings = Self::default();
        settings.apply_patch(patch);
        settings.normalize(base_dir);
        Ok(settings)
    }

    /// Read and parse a `cdecl.toml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CdeclError::io(path, e))?;
        let base_dir = path.parent().unwrap_or(Path::new("."));
        Self::from_toml_str(&content, base_dir).map_err(|e| CdeclError::Config {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Find and load the nearest `cdecl.toml` above `source_path`.
    ///
    /// Returns defaults when there is no config file. The path of the file
    /// that was loaded is returned alongside the settings.
    pub fn discover(source_path: &Path) -> Result<(Self, Option<PathBuf>)> {
        let Some(config_path) = find_config_file(source_path) else {
            return Ok((Self::default(), None));
        };
        let settings = Self::load(&config_path)?;
        debug!("loaded settings from {}", config_path.display());
        Ok((settings, Some(config_path)))
    }

    fn apply_patch(
        &mut self,
        patch: SettingsPatch,
    ) {
        unknown_key_warning("", &patch._extra);
        if let Some(p) = patch.compiler {
            self.compiler.apply_patch(p);
        }
        if let Some(p) = patch.logging {
            self.logging.apply_patch(p);
        }
    }

    fn normalize(
        &mut self,
        base_dir: &Path,
    ) {
        self.compiler.normalize(base_dir);
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct SettingsPatch {
    compiler: Option<CompilerSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: BTreeMap<String, toml::Value>,
}

/// Walks parent directories from `start` looking for `cdecl.toml`.
/// Returns the path to the first one found, or `None`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    let mut dir = if start.is_file() {
        start.parent()?
    } else {
        start.as_path()
    };
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Logs a warning for every key in `unknown`; `prefix` is the table path.
pub(crate) fn unknown_key_warning(
    prefix: &str,
    unknown: &BTreeMap<String, toml::Value>,
) {
    for name in unknown.keys() {
        match prefix {
            "" => warn!("unknown config key {name}"),
            p => warn!("unknown config key {p}.{name}"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src/config/settings_tests.rs"]
mod tests;
