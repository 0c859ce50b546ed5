use std::path::Path;

use crate::frontend::{
    Cursor, Location, NodeKind,
    lexer::{Lexer, Token, TokenKind},
};

/// Find every `#define` directive in `source` and return one macro node per
/// directive, in source order.
///
/// Clang's JSON dump carries no preprocessing record, so macro definitions
/// are recovered from the text. A macro node is located at its name and its
/// tokens are the name followed by the replacement list. Conditional
/// directives are not evaluated.
pub fn scan_macro_definitions(
    source: &str,
    file: &Path,
) -> Vec<Cursor> {
    let line_starts = line_starts(source);
    let mut macros = Vec::new();
    let mut at_line_start = true;
    let mut directive: Option<Vec<Token<'_>>> = None;

    for token in Lexer::new(source) {
        match token.kind {
            TokenKind::Whitespace if token.text.contains('\n') => {
                if let Some(tokens) = directive.take()
                    && let Some(cursor) = macro_cursor(&tokens, file, &line_starts)
                {
                    macros.push(cursor);
                }
                at_line_start = true;
            },
            kind if kind.is_trivia() => {},
            _ => {
                if let Some(tokens) = directive.as_mut() {
                    tokens.push(token);
                } else if at_line_start && token.text == "#" {
                    directive = Some(vec![token]);
                }
                at_line_start = false;
            },
        }
    }
    if let Some(tokens) = directive
        && let Some(cursor) = macro_cursor(&tokens, file, &line_starts)
    {
        macros.push(cursor);
    }

    macros
}

fn macro_cursor(
    tokens: &[Token<'_>],
    file: &Path,
    line_starts: &[usize],
) -> Option<Cursor> {
    let [_, keyword, name, ..] = tokens else {
        return None;
    };
    if keyword.text != "define" || name.kind != TokenKind::Ident {
        return None;
    }
    let (line, column) = line_col(line_starts, name.span.start);
    Some(
        Cursor::new(NodeKind::Macro, name.text)
            .with_location(Location::new(file, line, column))
            .with_tokens(tokens[2..].iter().map(|t| t.text)),
    )
}

pub(crate) fn line_starts(source: &str) -> Vec<usize> {
    std::iter::once(0).chain(source.match_indices('\n').map(|(i, _)| i + 1)).collect()
}

/// 1-based line and byte column of `offset`.
pub(crate) fn line_col(
    line_starts: &[usize],
    offset: usize,
) -> (u32, u32) {
    let line_idx = line_starts.partition_point(|&start| start <= offset).saturating_sub(1);
    let column = offset - line_starts[line_idx];
    ((line_idx + 1) as u32, (column + 1) as u32)
}

#[cfg(test)]
#[path = "../../tests/src/frontend/macros_tests.rs"]
mod tests;
