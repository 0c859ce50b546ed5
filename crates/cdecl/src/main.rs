use std::{
    io::{self, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use tracing::{info, warn};

use cdecl::{
    CdeclError, DeclarationRecord, ExtractOptions, Settings, TranslationUnit,
    config::init_tracing,
    extract::{definitions_only, format_record_line},
    extract_declarations,
    frontend::{parse_translation_unit, probe_clang},
};

/// Extract declarations from a C/C++ source file.
#[derive(Parser, Debug)]
#[command(name = "decl-extractor", version, about)]
struct Args {
    /// Source file to analyze.
    file: PathBuf,

    /// Include `#define` macro definitions.
    #[arg(long, short)]
    macros: bool,

    /// Only print definitions.
    #[arg(long, short)]
    definitions_only: bool,

    /// Print one JSON object per declaration.
    #[arg(long)]
    json: bool,

    /// Clang executable (overrides `CDECL_CLANG` and `cdecl.toml`).
    #[arg(long)]
    clang: Option<String>,

    #[arg(long, short)]
    verbose: bool,

    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Extra arguments passed to clang verbatim.
    #[arg(last = true)]
    clang_args: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let (settings, config_error) = match Settings::discover(&args.file) {
        Ok((settings, _)) => (settings, None),
        Err(error) => (Settings::default(), Some(error)),
    };
    init_tracing(settings.logging.effective_level(args.verbose), args.log_file.as_deref());
    if let Some(error) = config_error {
        warn!("{error}; using default settings");
    }

    match run(&args, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            if matches!(error, CdeclError::FrontendUnavailable { .. }) {
                eprintln!("Install clang (e.g. `apt install clang`) or point --clang / CDECL_CLANG at it");
            }
            ExitCode::FAILURE
        },
    }
}

fn run(
    args: &Args,
    settings: &Settings,
) -> cdecl::Result<()> {
    let program = settings.compiler.clang_program(args.clang.as_deref());
    probe_clang(&program)?;

    if !args.file.exists() {
        return Err(CdeclError::InputNotFound(args.file.clone()));
    }

    let unit = parse_translation_unit(&program, &args.file, &settings.compiler, &args.clang_args)?;
    print_diagnostics(args, &unit);

    let options = ExtractOptions {
        include_macros: args.macros,
    };
    let records = extract_declarations(&unit.root, &unit.path, &options);
    let total = records.len();
    info!("{}: extracted {total} declarations", args.file.display());

    let records = if args.definitions_only {
        definitions_only(records)
    } else {
        records
    };
    print_records(args, &records)?;

    eprintln!("\n=== Total: {total} items ===");
    Ok(())
}

fn print_diagnostics(
    args: &Args,
    unit: &TranslationUnit,
) {
    if unit.diagnostics.is_empty() {
        return;
    }
    eprintln!("=== Diagnostics for {} ===", args.file.display());
    for diagnostic in &unit.diagnostics {
        eprintln!("  {diagnostic}");
    }
    eprintln!();
}

fn print_records(
    args: &Args,
    records: &[DeclarationRecord],
) -> cdecl::Result<()> {
    let path = args.file.display().to_string();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let write_error = |e: io::Error| CdeclError::io("<stdout>", e);

    for record in records {
        if args.json {
            serde_json::to_writer(&mut out, record).map_err(|e| write_error(e.into()))?;
            writeln!(out).map_err(write_error)?;
        } else {
            writeln!(out, "{}", format_record_line(&path, record)).map_err(write_error)?;
        }
    }
    out.flush().map_err(write_error)
}
