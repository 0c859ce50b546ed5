pub mod config;
pub mod error;
pub mod extract;
pub mod frontend;
pub mod normalize;

pub use config::{CompilerSettings, LogLevel, LoggingSettings, Settings};
pub use error::{CdeclError, Result};
pub use extract::{DeclarationRecord, ExtractOptions, extract_declarations};
pub use frontend::{Cursor, Location, NodeKind, SyntaxNode, TranslationUnit};
pub use normalize::{AliasMapping, NormalizeOptions, normalize};
