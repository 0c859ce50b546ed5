use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use super::has_nested_body;

/// `typedef struct tag { ... } <anything>;`
static TAGGED_BODY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"typedef\s+struct\s+(\w+)\s*(\{[^}]*\})\s*[^;]+;").unwrap());

/// `typedef struct { ... } <anything>;`
static ANONYMOUS_BODY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"typedef\s+struct\s*(\{[^}]*\})\s*([^;]+);").unwrap());

/// `typedef struct tag ALIAS;`
static FORWARD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"typedef\s+struct\s+(\w+)\s+\w+\s*;").unwrap());

/// Rewrite typedef-struct declarations into plain struct declarations.
///
/// Bodied forms are rewritten first (tagged, then anonymous), then forward
/// declarations. Bodies holding a nested `{` are left as written.
pub fn canonicalize_declarations(text: &str) -> String {
    let text = TAGGED_BODY_RE.replace_all(text, |caps: &Captures<'_>| {
        if has_nested_body(&caps[2]) {
            debug!("leaving nested body of `{}` untouched", &caps[1]);
            return caps[0].to_string();
        }
        format!("struct {} {};", caps[1].to_lowercase(), &caps[2])
    });

    let text = ANONYMOUS_BODY_RE.replace_all(&text, |caps: &Captures<'_>| {
        if has_nested_body(&caps[1]) {
            debug!("leaving nested anonymous body untouched");
            return caps[0].to_string();
        }
        let name = caps[2].split_whitespace().last().unwrap_or("anonymous").to_lowercase();
        format!("struct {name} {};", &caps[1])
    });

    FORWARD_RE
        .replace_all(&text, |caps: &Captures<'_>| format!("struct {};", caps[1].to_lowercase()))
        .into_owned()
}

#[cfg(test)]
#[path = "../../tests/src/normalize/canonical_tests.rs"]
mod tests;
