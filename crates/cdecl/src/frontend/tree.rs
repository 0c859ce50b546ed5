use std::{
    borrow::Cow,
    collections::HashMap,
    path::{Path, PathBuf},
};

use clang_ast::{BareSourceLocation, SourceRange};
use tracing::debug;

use crate::frontend::{
    Cursor, Location, NodeKind,
    clang_nodes::{Clang, DeclData, Node, resolve_loc},
    lexer::token_spellings,
    resolve_path,
};

/// Converts a deserialized clang AST into an owned [`Cursor`] tree.
///
/// File paths are canonicalized once per distinct spelling. Token streams are
/// only available for nodes in the target file, whose text is held here.
pub(crate) struct TreeBuilder<'a> {
    target: &'a Path,
    target_source: &'a str,
    skip_function_bodies: bool,
    resolved: HashMap<String, PathBuf>,
}

impl<'a> TreeBuilder<'a> {
    pub(crate) fn new(
        target: &'a Path,
        target_source: &'a str,
        skip_function_bodies: bool,
    ) -> Self {
        Self {
            target,
            target_source,
            skip_function_bodies,
            resolved: HashMap::new(),
        }
    }

    pub(crate) fn build(
        &mut self,
        node: &Node,
    ) -> Cursor {
        let kind_name = node.kind.kind_name().to_string();
        let location = node.kind.loc().and_then(resolve_loc).and_then(|bare| self.location(bare));

        let mut cursor = match node.kind.decl() {
            Some(data) => {
                let kind = classify_kind(&node.kind, data);
                let mut cursor = Cursor::new(kind, data.name()).with_type(data.qual_type());
                if kind == NodeKind::Function {
                    cursor.result_type = function_result_type(data.qual_type()).to_string();
                    cursor.is_definition = node.inner.iter().any(|child| child.kind.is_body());
                }
                if kind == NodeKind::EnumConstant {
                    cursor.tokens = self.range_tokens(data.range.as_ref());
                }
                cursor
            },
            None => Cursor::new(NodeKind::Other, ""),
        };
        cursor.kind_name = kind_name;
        cursor.location = location;

        let skip_statements = self.skip_function_bodies && cursor.kind == NodeKind::Function;
        cursor.children = node
            .inner
            .iter()
            .filter(|child| !is_implicit(child))
            .filter(|child| !(skip_statements && child.kind.is_statement()))
            .map(|child| self.build(child))
            .collect();
        cursor
    }

    fn location(
        &mut self,
        bare: &BareSourceLocation,
    ) -> Option<Location> {
        if bare.file.is_empty() || bare.line == 0 {
            return None;
        }
        let file = self.resolve(&bare.file);
        Some(Location::new(file, bare.line as u32, bare.col as u32))
    }

    fn resolve(
        &mut self,
        file: &str,
    ) -> PathBuf {
        self.resolved.entry(file.to_string()).or_insert_with(|| resolve_path(Path::new(file))).clone()
    }

    /// Tokens covered by `range`, lexed from the target file's text.
    fn range_tokens(
        &mut self,
        range: Option<&SourceRange>,
    ) -> Vec<String> {
        let Some(range) = range else {
            return Vec::new();
        };
        let (Some(begin), Some(end)) = (resolve_loc(&range.begin), resolve_loc(&range.end)) else {
            return Vec::new();
        };
        if self.resolve(&begin.file) != self.target || self.resolve(&end.file) != self.target {
            return Vec::new();
        }
        let end_offset = end.offset + end.tok_len;
        match self.target_source.get(begin.offset..end_offset) {
            Some(text) => token_spellings(text),
            None => {
                debug!("token range {}..{} out of bounds for {}", begin.offset, end_offset, self.target.display());
                Vec::new()
            },
        }
    }
}

fn classify_kind(
    clang: &Clang,
    data: &DeclData,
) -> NodeKind {
    match clang {
        Clang::FunctionDecl(_) => NodeKind::Function,
        Clang::VarDecl(_) => NodeKind::Variable,
        Clang::ParmVarDecl(_) => NodeKind::Parameter,
        Clang::FieldDecl(_) => NodeKind::Field,
        Clang::TypedefDecl(_) => NodeKind::Typedef,
        Clang::EnumDecl(_) => NodeKind::Enum,
        Clang::EnumConstantDecl(_) => NodeKind::EnumConstant,
        Clang::RecordDecl(_) | Clang::CXXRecordDecl(_) => match data.tag_used.as_deref() {
            Some("union") => NodeKind::Union,
            Some("class") => NodeKind::Class,
            _ => NodeKind::Struct,
        },
        _ => NodeKind::Other,
    }
}

/// Implicit declarations (builtin typedefs, injected class names) have no
/// spelling in any source file and are not part of the tree.
fn is_implicit(node: &Node) -> bool {
    node.kind.decl().is_some_and(DeclData::is_implicit)
}

/// Result type of a clang function type spelling.
///
/// Cuts the parameter list, the first top-level parenthesized group that is
/// neither a declarator group (`(*`, `(^`, `(&`) nor an attribute argument:
/// `int (int, int)` gives `int`, `char *(const char *)` gives `char *`.
/// When a declarator group comes first the function returns a pointer to a
/// function, and its own parameter list sits innermost in that group:
/// `void (*(int))(char)` gives `void (*)(char)`.
pub fn function_result_type(function_type: &str) -> Cow<'_, str> {
    let mut depth = 0usize;
    for (i, c) in function_type.char_indices() {
        match c {
            '(' => {
                if depth == 0 {
                    if is_parameter_list(function_type, i) {
                        return Cow::Borrowed(function_type[..i].trim_end());
                    }
                    if is_declarator_group(function_type, i) {
                        let Some(close) = matching_paren(function_type, i) else {
                            break;
                        };
                        let declarator = function_result_type(&function_type[i + 1..close]);
                        return Cow::Owned(format!("{}{declarator}{}", &function_type[..=i], &function_type[close..]));
                    }
                }
                depth += 1;
            },
            ')' => depth = depth.saturating_sub(1),
            _ => {},
        }
    }
    Cow::Borrowed(function_type.trim())
}

fn matching_paren(
    text: &str,
    open: usize,
) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            },
            _ => {},
        }
    }
    None
}

fn is_declarator_group(
    function_type: &str,
    open: usize,
) -> bool {
    let after = function_type[open + 1..].trim_start();
    after.starts_with('*') || after.starts_with('^') || after.starts_with('&')
}

fn is_parameter_list(
    function_type: &str,
    open: usize,
) -> bool {
    let before = function_type[..open].trim_end();
    !before.is_empty() && !before.ends_with("__attribute__") && !is_declarator_group(function_type, open)
}

#[cfg(test)]
#[path = "../../tests/src/frontend/tree_tests.rs"]
mod tests;
