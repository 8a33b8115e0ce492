//! Buck - Buck Converter Design Calculator
//!
//! Validates a partial buck converter design and computes everything that
//! follows from it.
//!
//! # Usage
//!
//! ```bash
//! buck vin=12 vout=5 fs=500kHz L=10uH iout=2A
//! buck --file design.json --json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::level_filters::LevelFilter;

use buck_core::{
    error::Result,
    input, report, Calculation, Calculator, ParameterSet, ValidatorConfig, DEFAULT_TOLERANCE,
};

/// Buck converter design calculator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Known parameters, e.g. vin=12 vout=5 fs=500kHz L=10uH dii=30%
    #[arg(value_name = "NAME=VALUE")]
    assignments: Vec<String>,

    /// JSON design file with camelCase parameter names (command-line values take precedence)
    #[arg(short, long, value_name = "DESIGN_FILE")]
    file: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Absolute tolerance for duty cycle and ripple ratio checks
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    ratio_tolerance: f64,

    /// Relative tolerance for ripple magnitude checks
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    relative_tolerance: f64,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(calc) if calc.errors().is_empty() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<Calculation> {
    // Gather the known parameters
    let from_file = match &args.file {
        Some(path) => input::read_design_file(path)?,
        None => ParameterSet::new(),
    };
    let from_args = input::parse_assignments(&args.assignments)?;
    let params = from_args.merge(&from_file);

    if params.is_empty() {
        eprintln!("No parameters given; try `buck vin=12 vout=5 fs=500kHz L=10uH`");
    }

    // Validate and infer
    let config = ValidatorConfig::new()
        .with_ratio_tolerance(args.ratio_tolerance)
        .with_relative_tolerance(args.relative_tolerance);
    let calc = Calculator::with_config(config).calculate(&params);

    // Report
    if args.json {
        println!("{}", report::render_json(&calc)?);
    } else {
        print!("{}", report::render_text(&calc));
    }

    Ok(calc)
}
