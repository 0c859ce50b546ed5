use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::has_nested_body;

/// `typedef struct tag { ... } ALIAS;`
static TAGGED_BODY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"typedef\s+struct\s+(\w+)\s*\{[^}]*\}\s*(\w+)\s*;").unwrap());

/// `typedef struct { ... } ALIAS;`
static ANONYMOUS_BODY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"typedef\s+struct\s*\{[^}]*\}\s*(\w+)\s*;").unwrap());

/// `typedef struct tag ALIAS;`
static FORWARD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"typedef\s+struct\s+(\w+)\s+(\w+)\s*;").unwrap());

/// Alias name to lowercase struct tag, in first-insertion order.
///
/// Inserting an alias that is already present replaces its tag but keeps its
/// position, so iteration order is the order aliases were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMapping {
    entries: IndexMap<String, String>,
}

impl AliasMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `alias` to `tag`, returning the tag it replaced.
    pub fn insert(
        &mut self,
        alias: impl Into<String>,
        tag: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(alias.into(), tag.into())
    }

    pub fn get(
        &self,
        alias: &str,
    ) -> Option<&str> {
        self.entries.get(alias).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(alias, tag)| (alias.as_str(), tag.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<A: Into<String>, T: Into<String>> FromIterator<(A, T)> for AliasMapping {
    fn from_iter<I: IntoIterator<Item = (A, T)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (alias, tag) in iter {
            mapping.insert(alias, tag);
        }
        mapping
    }
}

/// Collect typedef aliases from `text`.
///
/// The three idioms are scanned one after another over the whole text, so a
/// later scan overwrites what an earlier one recorded for the same alias.
/// Typedefs whose body holds a nested `{` are not recognized.
pub fn build_alias_mapping(text: &str) -> AliasMapping {
    let mut mapping = AliasMapping::new();

    for caps in TAGGED_BODY_RE.captures_iter(text) {
        if has_nested_body(&caps[0]) {
            debug!("skipping nested struct body near alias `{}`", &caps[2]);
            continue;
        }
        mapping.insert(&caps[2], caps[1].to_lowercase());
    }

    for caps in ANONYMOUS_BODY_RE.captures_iter(text) {
        if has_nested_body(&caps[0]) {
            debug!("skipping nested struct body near alias `{}`", &caps[1]);
            continue;
        }
        mapping.insert(&caps[1], caps[1].to_lowercase());
    }

    for caps in FORWARD_RE.captures_iter(text) {
        mapping.insert(&caps[2], caps[1].to_lowercase());
    }

    debug!("collected {} typedef aliases", mapping.len());
    mapping
}

#[cfg(test)]
#[path = "../../tests/src/normalize/mapping_tests.rs"]
mod tests;
