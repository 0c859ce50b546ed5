use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use tracing::warn;

use super::AliasMapping;

static TYPEDEF_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*typedef\s+struct").unwrap());

/// Aliases spelled entirely in upper case and longer than one character.
pub fn is_rewritable_alias(alias: &str) -> bool {
    alias.chars().count() > 1 && alias.to_uppercase() == alias
}

/// Replace whole-word uses of upper-case aliases with `struct <tag>`.
///
/// Lines starting with `typedef struct` are left alone. Aliases are applied
/// in mapping order, each to the output of the previous one.
pub fn rewrite_usages(
    text: &str,
    mapping: &AliasMapping,
) -> String {
    let rules: Vec<(Regex, String)> = mapping
        .iter()
        .filter(|(alias, _)| is_rewritable_alias(alias))
        .filter_map(|(alias, tag)| {
            let pattern = format!(r"\b{}\b", regex::escape(alias));
            match Regex::new(&pattern) {
                Ok(re) => Some((re, format!("struct {tag}"))),
                Err(e) => {
                    warn!("cannot match alias `{alias}`: {e}");
                    None
                },
            }
        })
        .collect();

    if rules.is_empty() {
        return text.to_string();
    }

    text.split('\n')
        .map(|line| {
            if TYPEDEF_LINE_RE.is_match(line) {
                return line.to_string();
            }
            rules
                .iter()
                .fold(line.to_string(), |line, (re, replacement)| re.replace_all(&line, NoExpand(replacement)).into_owned())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "../../tests/src/normalize/usage_tests.rs"]
mod tests;
