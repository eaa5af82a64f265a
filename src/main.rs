use std::{
    fs,
    io::{self, BufWriter, Read, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use leaf_wetness::{
    io::{DEFAULT_INDENT, OutputOptions, parse_constants, parse_observations, write_json},
    models::agronomy::leaf_wetness::{Constants, LeafWetness},
};

/// Estimate leaf wetness from weather-station observations
#[derive(Parser, Debug)]
#[command(name = "leaf-wetness", version)]
#[command(
    about = "Estimate leaf wetness (mm) from 15-minute weather observations",
    long_about = None
)]
struct Args {
    /// Observations as a JSON literal, a file path, or `-` for stdin (default)
    input: Option<String>,

    /// JSON file overriding any of the model constants
    #[arg(short, long)]
    constants: Option<PathBuf>,

    /// Include every intermediate quantity in each output record
    #[arg(short, long)]
    diagnostics: bool,

    /// Evaluate rows on all cores
    #[arg(short, long)]
    parallel: bool,

    /// Spaces per indentation level
    #[arg(long, default_value_t = DEFAULT_INDENT, conflicts_with = "compact")]
    indent: usize,

    /// Write each batch on a single line
    #[arg(long)]
    compact: bool,

    /// Print the effective constants as JSON and exit
    #[arg(long)]
    print_constants: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let constants = load_constants(args.constants.as_ref())?;
    if args.print_constants {
        let stdout = io::stdout().lock();
        serde_json::to_writer_pretty(stdout, &constants).context("writing constants")?;
        println!();
        return Ok(());
    }

    let model = LeafWetness::new(constants).context("invalid model constants")?;

    let input = read_input(args.input.as_deref())?;
    let observations = parse_observations(&input).context("decoding observations")?;

    let estimates = if args.parallel {
        model.estimate_par(&observations)
    } else {
        model.estimate(&observations)
    }
    .context("estimating leaf wetness")?;
    info!(rows = estimates.len(), "estimated leaf wetness");

    let options = OutputOptions {
        indent: (!args.compact).then_some(args.indent),
        diagnostics: args.diagnostics,
    };

    let mut out = BufWriter::new(io::stdout().lock());
    write_json(&mut out, &estimates, &options).context("writing results")?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

/// Logs go to stderr so stdout stays pure JSON. `RUST_LOG` overrides `-v`.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("leaf_wetness={level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_constants(path: Option<&PathBuf>) -> Result<Constants> {
    let Some(path) = path else {
        return Ok(Constants::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("reading constants from {}", path.display()))?;
    parse_constants(&text).with_context(|| format!("parsing constants from {}", path.display()))
}

/// Resolves the positional input: stdin, an inline JSON document, or a file.
fn read_input(source: Option<&str>) -> Result<String> {
    match source {
        None | Some("-") => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading observations from stdin")?;
            Ok(text)
        }
        Some(text) if is_inline_json(text) => Ok(text.to_owned()),
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading observations from {path}")),
    }
}

fn is_inline_json(text: &str) -> bool {
    matches!(text.trim_start().chars().next(), Some('[' | '{'))
}
