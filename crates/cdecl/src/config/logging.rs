use std::{collections::BTreeMap, path::Path};

use serde::Deserialize;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoggingSettings {
    pub level: LogLevel,
}

impl LoggingSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: LoggingSettingsPatch,
    ) {
        super::unknown_key_warning("logging", &patch._extra);
        if let Some(v) = patch.level {
            self.level = v;
        }
    }

    /// `--verbose` raises the level to at least `debug`.
    pub fn effective_level(
        &self,
        verbose: bool,
    ) -> LogLevel {
        if verbose {
            self.level.max(LogLevel::Debug)
        } else {
            self.level
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub(crate) struct LoggingSettingsPatch {
    pub(crate) level: Option<LogLevel>,
    #[serde(flatten)]
    pub(crate) _extra: BTreeMap<String, toml::Value>,
}

/// Install the global subscriber: a stderr layer and, when `log_file` is
/// given, a non-rotating file layer.
///
/// Stdout is reserved for tool output, so nothing is ever logged there.
pub fn init_tracing(
    level: LogLevel,
    log_file: Option<&Path>,
) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(EnvFilter::new(level.as_str()));

    let file_layer = log_file.map(|path| {
        let appender = tracing_appender::rolling::never(
            path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new(".")),
            path.file_name().unwrap_or(std::ffi::OsStr::new("cdecl.log")),
        );
        fmt::layer()
            .with_writer(appender)
            .with_ansi(false)
            .with_target(false)
            .with_filter(EnvFilter::new(level.max(LogLevel::Info).as_str()))
    });

    let _ = tracing_subscriber::registry().with(stderr_layer).with(file_layer).try_init();
}
