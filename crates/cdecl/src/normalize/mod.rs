//! Typedef-struct normalization.
//!
//! Turns `typedef struct tag { ... } ALIAS;`, its anonymous variant and
//! `typedef struct tag ALIAS;` into plain `struct tag` spellings, and
//! optionally rewrites `ALIAS` uses to `struct tag`. Everything else in the
//! text is passed through byte for byte.

mod canonical;
mod mapping;
mod usage;

pub use canonical::canonicalize_declarations;
pub use mapping::{AliasMapping, build_alias_mapping};
pub use usage::{is_rewritable_alias, rewrite_usages};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Leave alias uses as written.
    pub keep_usage: bool,
}

/// Run the full pipeline over `text`.
///
/// The alias mapping is always built from the unmodified input.
pub fn normalize(
    text: &str,
    options: &NormalizeOptions,
) -> String {
    let mapping = build_alias_mapping(text);
    let text = if options.keep_usage {
        text.to_string()
    } else {
        rewrite_usages(text, &mapping)
    };
    canonicalize_declarations(&text)
}

/// A struct body (or a match starting with one) that contains another `{`.
fn has_nested_body(text: &str) -> bool {
    text.matches('{').count() > 1
}

#[cfg(test)]
#[path = "../../tests/src/normalize/pipeline_tests.rs"]
mod tests;
