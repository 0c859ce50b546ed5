//! Declaration extraction over a [`SyntaxNode`] tree.
//!
//! The walker visits every node depth-first and emits one
//! [`DeclarationRecord`] per interesting node located in the target file.
//! Formatting and the definition verdict live in [`classify`].

pub mod classify;

use std::path::Path;

use serde::Serialize;
use tracing::trace;

pub use classify::{declaration_string, is_definition};

use crate::frontend::{NodeKind, SyntaxNode, resolve_path};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Emit `#define` records.
    pub include_macros: bool,
}

/// One extracted declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclarationRecord {
    pub kind: NodeKind,
    pub declaration: String,
    pub is_definition: bool,
    pub line: u32,
    pub column: u32,
    pub spelling: String,
}

impl DeclarationRecord {
    pub fn suffix(&self) -> &'static str {
        if self.is_definition { "definition" } else { "declaration" }
    }
}

/// Walk `root` and collect a record for every interesting node whose file is
/// `target`, in pre-order.
///
/// `target` is resolved canonically before comparison; node locations are
/// expected to be resolved already.
pub fn extract_declarations<N: SyntaxNode>(
    root: &N,
    target: &Path,
    options: &ExtractOptions,
) -> Vec<DeclarationRecord> {
    let target = resolve_path(target);
    let mut records = Vec::new();
    walk(root, &target, options, &mut records);
    records
}

fn walk<N: SyntaxNode>(
    node: &N,
    target: &Path,
    options: &ExtractOptions,
    records: &mut Vec<DeclarationRecord>,
) {
    if let Some(record) = record_for(node, target, options) {
        records.push(record);
    }
    for child in node.children() {
        walk(child, target, options, records);
    }
}

fn record_for<N: SyntaxNode>(
    node: &N,
    target: &Path,
    options: &ExtractOptions,
) -> Option<DeclarationRecord> {
    let location = node.location();
    if location.is_some_and(|loc| loc.file != target) {
        return None;
    }
    if !is_interesting(node.kind(), options) {
        return None;
    }
    let Some(declaration) = declaration_string(node, options.include_macros) else {
        trace!("{} `{}` produced no declaration", node.kind_name(), node.spelling());
        return None;
    };
    let (line, column) = location.map_or((0, 0), |loc| (loc.line, loc.column));
    Some(DeclarationRecord {
        kind: node.kind(),
        declaration,
        is_definition: is_definition(node),
        line,
        column,
        spelling: node.spelling().to_string(),
    })
}

fn is_interesting(
    kind: NodeKind,
    options: &ExtractOptions,
) -> bool {
    match kind {
        NodeKind::Function
        | NodeKind::Variable
        | NodeKind::Typedef
        | NodeKind::Struct
        | NodeKind::Union
        | NodeKind::Enum
        | NodeKind::Field
        | NodeKind::EnumConstant => true,
        NodeKind::Macro => options.include_macros,
        NodeKind::InvalidFile | NodeKind::Parameter | NodeKind::Class | NodeKind::Other => false,
    }
}

/// Keep only records that supply a body.
pub fn definitions_only(records: Vec<DeclarationRecord>) -> Vec<DeclarationRecord> {
    records.into_iter().filter(|record| record.is_definition).collect()
}

/// `<path>:<line>:<column>: <declaration> // definition|declaration`
pub fn format_record_line(
    path: &str,
    record: &DeclarationRecord,
) -> String {
    format!("{path}:{}:{}: {} // {}", record.line, record.column, record.declaration, record.suffix())
}

#[cfg(test)]
#[path = "../../tests/src/extract/walker_tests.rs"]
mod tests;
