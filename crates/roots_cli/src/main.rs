//! Roots CLI - Command Line Access to the roots_core Solvers
//!
//! # Commands
//!
//! - `roots poly <c0> <c1> ...` - Real roots of a polynomial (ascending coefficients)
//! - `roots bezier <b0> <b1> ...` - Roots in `[0, 1]` of a Bernstein polynomial
//! - `roots check` - Print the effective configuration and run the self-test
//!
//! # Configuration
//!
//! Settings are read from `roots.toml` (or `--config`), then from `ROOTS_`
//! environment variables, then from the command line.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::poly::PolyOptions;
use crate::config::{LogLevel, OutputFormat, RootsConfig};

/// Real root finding from the command line
#[derive(Parser)]
#[command(name = "roots")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error); overrides --verbose
    #[arg(long, global = true, value_parser = parse_log_level)]
    log_level: Option<LogLevel>,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "roots.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a polynomial given by ascending coefficients
    Poly {
        /// Coefficients c0 c1 ... cn of c0 + c1·x + ... + cn·xⁿ
        #[arg(required = true, allow_negative_numbers = true)]
        coefficients: Vec<f64>,

        /// Also print the critical points
        #[arg(long)]
        critical: bool,

        /// Find a single root by Newton iteration from this guess
        #[arg(short, long, allow_negative_numbers = true)]
        guess: Option<f64>,

        /// Find a single root inside [LO, HI]
        #[arg(short, long, num_args = 2, value_names = ["LO", "HI"], allow_negative_numbers = true)]
        bracket: Option<Vec<f64>>,

        /// Output format (overrides the configuration)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Digits after the decimal point in table output
        #[arg(short, long)]
        precision: Option<usize>,
    },

    /// Solve a Bernstein polynomial on [0, 1]
    Bezier {
        /// Bernstein weights b0 b1 ... bn
        #[arg(required = true, allow_negative_numbers = true)]
        weights: Vec<f64>,

        /// Also print the critical points in [0, 1]
        #[arg(long)]
        critical: bool,

        /// Output format (overrides the configuration)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Digits after the decimal point in table output
        #[arg(short, long)]
        precision: Option<usize>,
    },

    /// Print the effective configuration and run the solver self-test
    Check,
}

fn parse_log_level(s: &str) -> std::result::Result<LogLevel, String> {
    s.parse().map_err(|e: CliError| e.to_string())
}

fn init_tracing(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = RootsConfig::load(&cli.config)?;
    config.merge_with_cli(cli.verbose, cli.log_level);
    init_tracing(config.logging.level);

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(?config, "configuration loaded");

    let mut out = std::io::stdout().lock();
    match cli.command {
        Commands::Poly {
            coefficients,
            critical,
            guess,
            bracket,
            format,
            precision,
        } => {
            apply_output_overrides(&mut config, format, precision)?;
            let options = PolyOptions {
                critical,
                guess,
                bracket: bracket.map(|b| (b[0], b[1])),
            };
            commands::poly::run(&mut out, &coefficients, &options, &config.solver, &config.output)
        }
        Commands::Bezier {
            weights,
            critical,
            format,
            precision,
        } => {
            apply_output_overrides(&mut config, format, precision)?;
            commands::bezier::run(&mut out, &weights, critical, &config.output)
        }
        Commands::Check => commands::check::run(&mut out, &config),
    }
}

fn apply_output_overrides(
    config: &mut RootsConfig,
    format: Option<OutputFormat>,
    precision: Option<usize>,
) -> Result<()> {
    if let Some(format) = format {
        config.output.format = format;
    }
    if let Some(precision) = precision {
        config.output.precision = precision;
    }
    config.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_flag() {
        let cli = Cli::try_parse_from(["roots", "--log-level", "info", "check"]).unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Info));
        assert!(!cli.verbose);

        assert!(Cli::try_parse_from(["roots", "--log-level", "loud", "check"]).is_err());
    }
}
