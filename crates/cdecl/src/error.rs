use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the extractor and normalizer front ends.
///
/// Parse diagnostics reported by clang are not errors; they are carried on
/// [`crate::frontend::TranslationUnit`] and extraction proceeds regardless.
#[derive(Debug, Error)]
pub enum CdeclError {
    #[error("clang frontend not available ({program}: {reason})")]
    FrontendUnavailable {
        program: String,
        reason: String,
    },

    #[error("File '{}' not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read clang AST dump: {0}")]
    AstDump(String),

    #[error("invalid config {}: {message}", path.display())]
    Config {
        path: PathBuf,
        message: String,
    },
}

impl CdeclError {
    pub fn io(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = CdeclError> = std::result::Result<T, E>;
