use std::{collections::BTreeMap, path::Path};

use serde::Deserialize;

pub const DEFAULT_CLANG: &str = "clang";
pub const CLANG_ENV_VAR: &str = "CDECL_CLANG";

/// Flags that keep clang lenient on broken or incomplete sources.
pub(crate) const LENIENT_FLAGS: [&str; 3] = ["-fsyntax-only", "-ferror-limit=0", "-Wno-everything"];

#[derive(Debug, Clone, PartialEq)]
pub struct CompilerSettings {
    /// Clang executable from the config file, if any.
    pub clang: Option<String>,
    pub include_paths: Vec<String>,
    /// Extra compiler flags forwarded verbatim (e.g. `-std=c11`, `-DFOO`).
    pub extra_flags: Vec<String>,
    /// Drop statement subtrees of function bodies before extraction.
    pub skip_function_bodies: bool,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            clang: None,
            include_paths: Vec::new(),
            extra_flags: Vec::new(),
            skip_function_bodies: true,
        }
    }
}

impl CompilerSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: CompilerSettingsPatch,
    ) {
        super::unknown_key_warning("compiler", &patch._extra);
        if let Some(v) = patch.clang {
            self.clang = Some(v);
        }
        if let Some(v) = patch.include_paths {
            self.include_paths = v;
        }
        if let Some(v) = patch.extra_flags {
            self.extra_flags = v;
        }
        if let Some(v) = patch.skip_function_bodies {
            self.skip_function_bodies = v;
        }
    }

    pub(crate) fn normalize(
        &mut self,
        base_dir: &Path,
    ) {
        self.clang = self.clang.as_deref().map(str::trim).filter(|c| !c.is_empty()).map(str::to_string);
        self.include_paths = self
            .include_paths
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(|p| {
                let path = Path::new(p);
                if path.is_absolute() {
                    p.to_string()
                } else {
                    base_dir.join(path).display().to_string()
                }
            })
            .collect();
        self.extra_flags = self.extra_flags.iter().map(|f| f.trim().to_string()).filter(|f| !f.is_empty()).collect();
    }

    /// Resolve the clang executable: explicit override, then the
    /// `CDECL_CLANG` environment variable, then the config file, then `clang`.
    pub fn clang_program(
        &self,
        cli_override: Option<&str>,
    ) -> String {
        if let Some(program) = cli_override.map(str::trim).filter(|p| !p.is_empty()) {
            return program.to_string();
        }
        if let Ok(program) = std::env::var(CLANG_ENV_VAR)
            && !program.trim().is_empty()
        {
            return program.trim().to_string();
        }
        self.clang.clone().unwrap_or_else(|| DEFAULT_CLANG.to_string())
    }

    /// Arguments placed before any caller-supplied flags: the lenient
    /// defaults, configured include paths, then configured extra flags.
    pub fn base_args(&self) -> Vec<String> {
        let mut args: Vec<String> = LENIENT_FLAGS.iter().map(|f| f.to_string()).collect();
        for p in &self.include_paths {
            args.push(format!("-I{p}"));
        }
        args.extend(self.extra_flags.iter().cloned());
        args
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub(crate) struct CompilerSettingsPatch {
    pub(crate) clang: Option<String>,
    pub(crate) include_paths: Option<Vec<String>>,
    pub(crate) extra_flags: Option<Vec<String>>,
    pub(crate) skip_function_bodies: Option<bool>,
    #[serde(flatten)]
    pub(crate) _extra: BTreeMap<String, toml::Value>,
}
