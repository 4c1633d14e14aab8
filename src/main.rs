//! Sparse stack runner (default binary).
//!
//! Reads `<color> <x>` lines from a file or stdin, resolves every placement
//! and prints the surviving cells as `<color> <x> <row>` lines. Diagnostics
//! and logs go to stderr; on error the exit code is 1.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::Level;
use tracing_subscriber::prelude::*;

use sparse_stack::engine::{run, EngineConfig};
use sparse_stack::output::RecordFormat;

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for RecordFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => RecordFormat::Text,
            FormatArg::Json => RecordFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "sparse-stack", version, about)]
struct Cli {
    #[arg(help = "Placement file (stdin if omitted)")]
    input: Option<PathBuf>,

    #[arg(long, help = "Dump the board after every placement instead of listing records")]
    debug: bool,

    #[arg(long, value_name = "N", help = "Largest accepted |x|")]
    max_x: Option<i64>,

    #[arg(long, value_enum, help = "Record listing format")]
    format: Option<FormatArg>,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase verbosity level (-v = INFO, -vv = DEBUG, -vvv = TRACE)")]
    verbose: u8,
}

impl Cli {
    /// Environment first, flags on top
    fn config(&self) -> Result<EngineConfig> {
        let mut config = EngineConfig::from_env();
        if self.debug {
            config.debug = true;
        }
        if let Some(max_x) = self.max_x {
            config.max_abs_x = EngineConfig::checked_bound(max_x)
                .ok_or_else(|| anyhow!("--max-x {} is not an addressable bound", max_x))?;
        }
        if let Some(format) = self.format {
            config.format = format.into();
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(1)
        }
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let config = cli.config()?;

    let input: Box<dyn BufRead> = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run(&config, input, &mut out)?;
    out.flush().context("flushing stdout")?;
    Ok(())
}
