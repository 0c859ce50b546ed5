use std::path::Path;

use super::*;

#[test]
fn defaults_without_file() {
    let settings = Settings::default();
    assert_eq!(settings.compiler.clang, None);
    assert!(settings.compiler.include_paths.is_empty());
    assert!(settings.compiler.skip_function_bodies);
    assert_eq!(settings.logging.level, LogLevel::Warn);
}

#[test]
fn parses_full_file() {
    let content = r#"
        [compiler]
        clang = " /usr/bin/clang-18 "
        include_paths = ["include", "/opt/sdk/include", "  "]
        extra_flags = ["-std=c11", " -DDEBUG "]
        skip_function_bodies = false

        [logging]
        level = "debug"
    "#;
    let settings = Settings::from_toml_str(content, Path::new("/work/project")).expect("valid config");
    assert_eq!(settings.compiler.clang.as_deref(), Some("/usr/bin/clang-18"));
    assert_eq!(settings.compiler.include_paths, vec!["/work/project/include", "/opt/sdk/include"]);
    assert_eq!(settings.compiler.extra_flags, vec!["-std=c11", "-DDEBUG"]);
    assert!(!settings.compiler.skip_function_bodies);
    assert_eq!(settings.logging.level, LogLevel::Debug);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let settings = Settings::from_toml_str("[compiler]\nextra_flags = [\"-xc++\"]\n", Path::new("/")).expect("valid config");
    assert_eq!(settings.compiler.extra_flags, vec!["-xc++"]);
    assert!(settings.compiler.skip_function_bodies);
    assert_eq!(settings.logging, LoggingSettings::default());
}

#[test]
fn unknown_keys_are_ignored() {
    let content = "top = 1\n[compiler]\nplatform = \"ios\"\n[logging]\nlevel = \"info\"\ncolor = true\n";
    let settings = Settings::from_toml_str(content, Path::new("/")).expect("unknown keys only warn");
    assert_eq!(settings.logging.level, LogLevel::Info);
}

#[test]
fn malformed_file_is_an_error() {
    assert!(Settings::from_toml_str("[compiler\n", Path::new("/")).is_err());
    assert!(Settings::from_toml_str("[logging]\nlevel = \"loud\"\n", Path::new("/")).is_err());
}

#[test]
fn base_args_order() {
    let compiler = CompilerSettings {
        include_paths: vec!["/inc".to_string()],
        extra_flags: vec!["-std=c99".to_string()],
        ..CompilerSettings::default()
    };
    assert_eq!(
        compiler.base_args(),
        vec!["-fsyntax-only", "-ferror-limit=0", "-Wno-everything", "-I/inc", "-std=c99"]
    );
}

#[test]
fn cli_override_wins_for_clang_program() {
    let compiler = CompilerSettings {
        clang: Some("clang-from-config".to_string()),
        ..CompilerSettings::default()
    };
    assert_eq!(compiler.clang_program(Some("clang-17")), "clang-17");
}

#[test]
fn verbose_raises_level_to_debug() {
    let logging = LoggingSettings {
        level: LogLevel::Warn,
    };
    assert_eq!(logging.effective_level(false), LogLevel::Warn);
    assert_eq!(logging.effective_level(true), LogLevel::Debug);

    let trace = LoggingSettings {
        level: LogLevel::Trace,
    };
    assert_eq!(trace.effective_level(true), LogLevel::Trace);
}

#[test]
fn finds_config_in_ancestor_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    let nested = dir.path().join("src/deep");
    std::fs::create_dir_all(&nested).expect("create nested dirs");
    let source = nested.join("main.c");
    std::fs::write(&source, "int main(void) { return 0; }\n").expect("write source");
    std::fs::write(dir.path().join(CONFIG_FILENAME), "[compiler]\ninclude_paths = [\"include\"]\n").expect("write config");

    let found = find_config_file(&source).expect("config file found");
    assert_eq!(found, dir.path().canonicalize().expect("canonical temp dir").join(CONFIG_FILENAME));

    let (settings, path) = Settings::discover(&source).expect("config loads");
    assert_eq!(path, Some(found));
    let expected_include = dir.path().canonicalize().expect("canonical temp dir").join("include");
    assert_eq!(settings.compiler.include_paths, vec![expected_include.display().to_string()]);
}

#[test]
fn nearest_config_wins() {
    let dir = tempfile::tempdir().expect("temp dir");
    let nested = dir.path().join("module");
    std::fs::create_dir_all(&nested).expect("create nested dir");
    std::fs::write(dir.path().join(CONFIG_FILENAME), "[logging]\nlevel = \"error\"\n").expect("write outer config");
    std::fs::write(nested.join(CONFIG_FILENAME), "[logging]\nlevel = \"trace\"\n").expect("write inner config");
    let source = nested.join("a.c");
    std::fs::write(&source, "").expect("write source");

    let (settings, _) = Settings::discover(&source).expect("config loads");
    assert_eq!(settings.logging.level, LogLevel::Trace);
}

#[test]
fn broken_config_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join(CONFIG_FILENAME), "[compiler]\nextra_flags = 3\n").expect("write config");
    let source = dir.path().join("a.c");
    std::fs::write(&source, "").expect("write source");

    let error = Settings::discover(&source).expect_err("invalid config");
    assert!(matches!(error, CdeclError::Config { .. }), "unexpected error: {error}");
}
