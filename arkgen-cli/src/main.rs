mod tracing_config;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use arkgen_core::{
    BatchPolicy, CoreError, EmitOptions, UnsupportedPolicy, generate, load_inputs,
};
use clap::Parser;

/// Exit status for a failed emission (output I/O or unsupported node).
const EMIT_FAILURE: u8 = 2;

/// Re-print serialized Ark ASTs as source text, one `<name>.out` per file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// AST files (JSON) or directories to search for them
    #[arg(required = true, value_name = "INPUT")]
    inputs: Vec<PathBuf>,

    #[arg(long, help = "Omit all newlines and indentation")]
    minify: bool,

    #[arg(short, long, help = "Report start and finish of each file")]
    verbose: bool,

    #[arg(long, help = "Skip unsupported nodes instead of failing")]
    skip_unsupported: bool,

    #[arg(long, help = "Continue with remaining files after a failure")]
    keep_going: bool,

    #[arg(
        long,
        value_name = "DIR",
        help = "Write outputs into DIR instead of next to each file name"
    )]
    out_dir: Option<PathBuf>,
}

impl Cli {
    fn options(&self) -> EmitOptions {
        EmitOptions {
            minify: self.minify,
            verbose: self.verbose,
            unsupported: if self.skip_unsupported {
                UnsupportedPolicy::Skip
            } else {
                UnsupportedPolicy::Abort
            },
            batch: if self.keep_going {
                BatchPolicy::KeepGoing
            } else {
                BatchPolicy::StopOnError
            },
            out_dir: self.out_dir.clone(),
        }
    }
}

fn main() -> ExitCode {
    tracing_config::init_tracing();
    let cli = Cli::parse();
    match execute(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("arkgen error: {err:#}");
            exit_code_for(&err)
        }
    }
}

fn execute(cli: Cli) -> Result<ExitCode> {
    let files = load_inputs(&cli.inputs).context("failed to load AST input")?;
    let options = cli.options();

    let mut diagnostics = io::stderr().lock();
    let report = generate(&files, &options, &mut diagnostics)?;

    if report.is_success() {
        return Ok(ExitCode::SUCCESS);
    }
    for failure in &report.failures {
        eprintln!("arkgen error: {}: {}", failure.name, failure.error);
    }
    Ok(ExitCode::from(EMIT_FAILURE))
}

fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<CoreError>() {
        Some(core) if core.is_emission_failure() => ExitCode::from(EMIT_FAILURE),
        _ => ExitCode::FAILURE,
    }
}
