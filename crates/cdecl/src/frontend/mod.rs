//! Parsing frontend boundary.
//!
//! The extractor only sees [`SyntaxNode`]. The clang adapter in this module
//! runs `clang -Xclang -ast-dump=json`, deserializes the dump, and converts it
//! into an owned [`Cursor`] tree that implements the trait.

mod clang_nodes;
mod compiler;
pub mod lexer;
mod macros;
mod tree;

use std::path::{Path, PathBuf};

use serde::Serialize;

pub use compiler::{Diagnostic, Severity, parse_translation_unit, probe_clang};
pub use macros::scan_macro_definitions;
pub use tree::function_result_type;

/// Node categories the extractor knows how to classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Function,
    Variable,
    Parameter,
    Typedef,
    Struct,
    Union,
    Class,
    Enum,
    Field,
    EnumConstant,
    Macro,
    /// Sentinel for nodes whose file could not be determined by the frontend.
    InvalidFile,
    Other,
}

impl NodeKind {
    /// Clang's spelling of the kind, used as the record kind tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Function => "FunctionDecl",
            Self::Variable => "VarDecl",
            Self::Parameter => "ParmVarDecl",
            Self::Typedef => "TypedefDecl",
            Self::Struct | Self::Union => "RecordDecl",
            Self::Class => "CXXRecordDecl",
            Self::Enum => "EnumDecl",
            Self::Field => "FieldDecl",
            Self::EnumConstant => "EnumConstantDecl",
            Self::Macro => "MacroDefinition",
            Self::InvalidFile => "InvalidFile",
            Self::Other => "Other",
        }
    }
}

/// A resolved source position. Line and column are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(
        file: impl Into<PathBuf>,
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

/// Read-only view of one node in the frontend's syntax tree.
pub trait SyntaxNode {
    fn kind(&self) -> NodeKind;

    /// The frontend's own name for the node kind (e.g. `LinkageSpecDecl`).
    fn kind_name(&self) -> &str;

    /// Declared name, or empty.
    fn spelling(&self) -> &str;

    fn location(&self) -> Option<&Location>;

    fn type_spelling(&self) -> &str;

    /// Result type of a function node; empty for everything else.
    fn result_type(&self) -> &str;

    fn children(&self) -> &[Self]
    where
        Self: Sized;

    fn tokens(&self) -> &[String];

    /// The frontend's definition predicate (body present vs. prototype).
    fn is_definition(&self) -> bool;
}

/// Owned syntax tree node produced by the clang adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    pub kind: NodeKind,
    pub kind_name: String,
    pub spelling: String,
    pub location: Option<Location>,
    pub type_spelling: String,
    pub result_type: String,
    pub children: Vec<Cursor>,
    pub tokens: Vec<String>,
    pub is_definition: bool,
}

impl Cursor {
    pub fn new(
        kind: NodeKind,
        spelling: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            kind_name: kind.as_str().to_string(),
            spelling: spelling.into(),
            location: None,
            type_spelling: String::new(),
            result_type: String::new(),
            children: Vec::new(),
            tokens: Vec::new(),
            is_definition: false,
        }
    }

    /// A location-less root holding `children`.
    pub fn root(children: Vec<Cursor>) -> Self {
        let mut root = Self::new(NodeKind::Other, "");
        root.kind_name = "TranslationUnitDecl".to_string();
        root.children = children;
        root
    }

    pub fn with_kind_name(
        mut self,
        kind_name: impl Into<String>,
    ) -> Self {
        self.kind_name = kind_name.into();
        self
    }

    pub fn with_location(
        mut self,
        location: Location,
    ) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_type(
        mut self,
        type_spelling: impl Into<String>,
    ) -> Self {
        self.type_spelling = type_spelling.into();
        self
    }

    pub fn with_result_type(
        mut self,
        result_type: impl Into<String>,
    ) -> Self {
        self.result_type = result_type.into();
        self
    }

    pub fn with_children(
        mut self,
        children: Vec<Cursor>,
    ) -> Self {
        self.children = children;
        self
    }

    pub fn with_tokens<I, S>(
        mut self,
        tokens: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_definition(
        mut self,
        is_definition: bool,
    ) -> Self {
        self.is_definition = is_definition;
        self
    }
}

impl SyntaxNode for Cursor {
    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn kind_name(&self) -> &str {
        &self.kind_name
    }

    fn spelling(&self) -> &str {
        &self.spelling
    }

    fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    fn type_spelling(&self) -> &str {
        &self.type_spelling
    }

    fn result_type(&self) -> &str {
        &self.result_type
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn tokens(&self) -> &[String] {
        &self.tokens
    }

    fn is_definition(&self) -> bool {
        self.is_definition
    }
}

/// Result of running the frontend on one file.
#[derive(Debug, Clone)]
pub struct TranslationUnit {
    /// Canonical path of the parsed file.
    pub path: PathBuf,
    pub root: Cursor,
    pub diagnostics: Vec<Diagnostic>,
}

/// Canonically resolve `path`, falling back to the path as given.
pub fn resolve_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
