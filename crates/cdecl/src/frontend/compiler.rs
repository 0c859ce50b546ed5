use std::{
    fmt,
    path::Path,
    process::{Command, Stdio},
};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    config::CompilerSettings,
    error::{CdeclError, Result},
    frontend::{Cursor, TranslationUnit, clang_nodes::Node, macros::scan_macro_definitions, resolve_path, tree::TreeBuilder},
};

static DIAGNOSTIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?):(\d+):(\d+):\s*(fatal error|error|warning|note):\s*(.*)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Note,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal error",
        }
    }
}

/// One diagnostic line reported by clang while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    /// Parse a single `file:line:col: severity: message` line.
    pub fn parse_line(line: &str) -> Option<Self> {
        let caps = DIAGNOSTIC_RE.captures(line.trim_end())?;
        let severity = match &caps[4] {
            "fatal error" => Severity::Fatal,
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            _ => Severity::Note,
        };
        Some(Self {
            file: caps[1].to_string(),
            line: caps[2].parse().ok()?,
            column: caps[3].parse().ok()?,
            severity,
            message: caps[5].to_string(),
        })
    }

    /// Parse all diagnostics from clang's stderr, skipping source excerpts
    /// and caret lines.
    pub fn parse_all(stderr: &str) -> Vec<Self> {
        stderr.lines().filter_map(Self::parse_line).collect()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}:{}:{}: {}: {}", self.file, self.line, self.column, self.severity.as_str(), self.message)
    }
}

fn clang_command(program: &str) -> Command {
    let mut command = Command::new(program);
    command.stdin(Stdio::null());
    command
}

/// Check that `program` can be executed; returns its version banner.
pub fn probe_clang(program: &str) -> Result<String> {
    let unavailable = |reason: String| CdeclError::FrontendUnavailable {
        program: program.to_string(),
        reason,
    };
    let output = clang_command(program).arg("--version").output().map_err(|e| unavailable(e.to_string()))?;
    if !output.status.success() {
        return Err(unavailable(format!("`--version` exited with {}", output.status)));
    }
    let banner = String::from_utf8_lossy(&output.stdout).lines().next().unwrap_or_default().to_string();
    debug!("clang frontend: {banner}");
    Ok(banner)
}

/// Parse `path` with clang and convert the AST dump into a [`Cursor`] tree.
///
/// `extra_args` are forwarded verbatim after the configured flags. A
/// non-zero exit status is not an error: clang still dumps whatever it
/// parsed, and the diagnostics are returned alongside the tree.
pub fn parse_translation_unit(
    program: &str,
    path: &Path,
    settings: &CompilerSettings,
    extra_args: &[String],
) -> Result<TranslationUnit> {
    let target = resolve_path(path);
    let source = std::fs::read_to_string(path).map_err(|e| CdeclError::io(path, e))?;

    let mut args = vec!["-Xclang".to_string(), "-ast-dump=json".to_string(), "-fno-color-diagnostics".to_string()];
    args.extend(settings.base_args());
    args.extend(extra_args.iter().cloned());
    args.push(path.display().to_string());

    debug!("AST dump: {program} {}", args.join(" "));

    let output = clang_command(program)
        .args(&args)
        .output()
        .map_err(|e| CdeclError::FrontendUnavailable {
            program: program.to_string(),
            reason: e.to_string(),
        })?;

    let diagnostics = Diagnostic::parse_all(&String::from_utf8_lossy(&output.stderr));
    if !output.status.success() {
        debug!("[ast-dump] exited with {} (partial AST may still be usable)", output.status);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut root = if stdout.trim_start().starts_with('{') {
        let node = parse_ast_json(&stdout)?;
        debug!("[ast-dump] produced {} bytes of JSON for {}", stdout.len(), path.display());
        TreeBuilder::new(&target, &source, settings.skip_function_bodies).build(&node)
    } else {
        warn!("[ast-dump] produced no usable JSON for {}", path.display());
        Cursor::root(Vec::new())
    };

    let macros = scan_macro_definitions(&source, &target);
    info!("{}: {} top-level nodes, {} macro definitions", path.display(), root.children.len(), macros.len());
    interleave_macros(&mut root, macros);

    Ok(TranslationUnit {
        path: target,
        root,
        diagnostics,
    })
}

/// Deserialize a clang JSON AST dump of any nesting depth.
///
/// Function bodies nest one level per expression operand or `else if`, so the
/// recursion limit is lifted and the stack grows on demand.
pub(crate) fn parse_ast_json(json: &str) -> Result<Node> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let deserializer = serde_stacker::Deserializer::new(&mut deserializer);
    Node::deserialize(deserializer).map_err(|e| CdeclError::AstDump(e.to_string()))
}

/// Insert each macro before the first target-file child of `root` that
/// starts after it, keeping both sequences in source order.
pub(crate) fn interleave_macros(
    root: &mut Cursor,
    macros: Vec<Cursor>,
) {
    let mut search_from = 0;
    for macro_cursor in macros {
        let Some(macro_loc) = macro_cursor.location.clone() else {
            root.children.push(macro_cursor);
            continue;
        };
        let position = root.children[search_from..]
            .iter()
            .position(|child| {
                child.location.as_ref().is_some_and(|loc| {
                    loc.file == macro_loc.file && (loc.line, loc.column) > (macro_loc.line, macro_loc.column)
                })
            })
            .map(|offset| search_from + offset)
            .unwrap_or(root.children.len());
        root.children.insert(position, macro_cursor);
        search_from = position + 1;
    }
}

#[cfg(test)]
#[path = "../../tests/src/frontend/compiler_tests.rs"]
mod tests;
