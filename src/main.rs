//! Nodal - Interactive Circuit Solver
//!
//! Builds a resistor/voltage-source network from typed commands and solves
//! it with modified nodal analysis.
//!
//! # Usage
//!
//! ```bash
//! nodal
//! nodal --script divider.txt --quiet --precision 4
//! ```

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use nodal_core::{
    error::{NodalError, Result},
    session::DEFAULT_PRECISION,
    solver::DEFAULT_PIVOT_TOLERANCE,
    Session, SessionConfig, SolverConfig,
};

/// Interactive linear circuit solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Read commands from a file instead of standard input
    #[arg(short, long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Decimals printed for potentials and currents
    #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
    precision: usize,

    /// Pivot tolerance for singular circuit detection
    #[arg(long, default_value_t = DEFAULT_PIVOT_TOLERANCE)]
    pivot_tolerance: f64,

    /// Suppress the banner and prompt
    #[arg(short, long)]
    quiet: bool,

    /// Log to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(verbose: u8) {
    // RUST_LOG still refines the level chosen by -v
    let _ = env_logger::Builder::new()
        .filter_level(level_filter(verbose))
        .parse_default_env()
        .try_init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = SessionConfig::new()
        .with_precision(args.precision)
        .with_solver(SolverConfig::new().with_pivot_tolerance(args.pivot_tolerance));
    if args.quiet || args.script.is_some() {
        config = config.quiet();
    }

    let mut session = Session::new(config);
    let stdout = io::stdout().lock();

    match &args.script {
        Some(path) => {
            let file = File::open(path).map_err(|e| NodalError::ScriptReadError {
                path: path.display().to_string(),
                source: e,
            })?;
            session.run(BufReader::new(file), stdout)?;
        }
        None => session.run(io::stdin().lock(), stdout)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_filter(0), LevelFilter::Warn);
        assert_eq!(level_filter(1), LevelFilter::Info);
        assert_eq!(level_filter(2), LevelFilter::Debug);
        assert_eq!(level_filter(7), LevelFilter::Trace);
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["nodal", "-vv", "--quiet", "--precision", "4"]);
        assert_eq!(args.verbose, 2);
        assert!(args.quiet);
        assert_eq!(args.precision, 4);
        assert!(args.script.is_none());
        assert_eq!(args.pivot_tolerance, DEFAULT_PIVOT_TOLERANCE);
    }
}
