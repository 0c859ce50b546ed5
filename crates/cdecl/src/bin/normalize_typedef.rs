use std::{
    io::{self, Read, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;

use cdecl::{
    CdeclError, LogLevel, NormalizeOptions,
    config::init_tracing,
    normalize,
};

/// Normalize typedef struct patterns for easier parsing.
///
///   typedef struct foo { ... } FOO;  ->  struct foo { ... };
///   typedef struct { ... } FOO;      ->  struct foo { ... };
///   typedef struct foo FOO;          ->  struct foo;
#[derive(Parser, Debug)]
#[command(name = "normalize-typedef", version, about, verbatim_doc_comment)]
struct Args {
    /// Input file, or `-` for stdin.
    #[arg(default_value = "-")]
    input: String,

    /// Output file (default: stdout).
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Keep uses of upper-case aliases instead of rewriting them to `struct tag`.
    #[arg(long)]
    keep_usage: bool,

    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = if args.verbose { LogLevel::Debug } else { LogLevel::Warn };
    init_tracing(level, None);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        },
    }
}

fn run(args: &Args) -> cdecl::Result<()> {
    let content = if args.input == "-" {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content).map_err(|e| CdeclError::io("<stdin>", e))?;
        content
    } else {
        std::fs::read_to_string(&args.input).map_err(|e| CdeclError::io(&args.input, e))?
    };

    let options = NormalizeOptions {
        keep_usage: args.keep_usage,
    };
    let normalized = normalize(&content, &options);

    match &args.output {
        Some(path) => std::fs::write(path, normalized).map_err(|e| CdeclError::io(path, e)),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(normalized.as_bytes()).and_then(|()| stdout.flush()).map_err(|e| CdeclError::io("<stdout>", e))
        },
    }
}
