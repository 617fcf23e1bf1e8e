//! CLI configuration management
//!
//! Layers, from lowest to highest priority: built-in defaults, an optional
//! TOML file, `ROOTS_`-prefixed environment variables (sections separated by
//! a double underscore, e.g. `ROOTS_SOLVER__MAX_ITERATIONS=64`), then
//! command-line flags.

use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use roots_core::math::solvers::SolverConfig;
use serde::{Deserialize, Serialize};

use crate::{CliError, Result};

/// Log levels accepted in `[logging]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(CliError::InvalidArgument(format!(
                "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                s
            ))),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Output formats for solver results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// `[output]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Result format
    pub format: OutputFormat,
    /// Digits after the decimal point in table output
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            precision: 15,
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used when `RUST_LOG` is not set
    pub level: LogLevel,
}

/// Effective configuration of the `roots` binary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootsConfig {
    /// Configuration of the iterative solvers
    pub solver: SolverConfig,
    /// Output format settings
    pub output: OutputConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl RootsConfig {
    /// Load configuration from `path` (if it exists) and the environment.
    pub fn load(path: &Path) -> Result<Self> {
        Self::build(config::File::from(path).required(false))
    }

    fn build<S>(file: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config: RootsConfig = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("ROOTS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.solver.tolerance.is_nan() || self.solver.tolerance <= 0.0 {
            return Err(CliError::InvalidArgument(format!(
                "solver.tolerance must be positive, got {}",
                self.solver.tolerance
            )));
        }
        if self.solver.max_iterations == 0 {
            return Err(CliError::InvalidArgument(
                "solver.max_iterations must be at least 1".to_string(),
            ));
        }
        if self.output.precision > 17 {
            return Err(CliError::InvalidArgument(format!(
                "output.precision must be at most 17, got {}",
                self.output.precision
            )));
        }
        Ok(())
    }

    /// Merge command-line overrides (they take precedence)
    ///
    /// An explicit level wins over `--verbose`.
    pub fn merge_with_cli(&mut self, verbose: bool, log_level: Option<LogLevel>) {
        if verbose {
            self.logging.level = LogLevel::Debug;
        }
        if let Some(level) = log_level {
            self.logging.level = level;
        }
    }

    /// The configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(text: &str) -> Result<RootsConfig> {
        RootsConfig::build(config::File::from_str(text, config::FileFormat::Toml))
    }

    #[test]
    fn test_default_config() {
        let config = RootsConfig::default();
        assert_eq!(config.solver, SolverConfig::default());
        assert_eq!(config.output.format, OutputFormat::Table);
        assert_eq!(config.output.precision, 15);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = from_toml(
            r#"
            [solver]
            max_iterations = 64

            [output]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.solver.max_iterations, 64);
        assert_eq!(config.solver.tolerance, 1e-12);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.precision, 15);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(from_toml("[solver]\ntolerance = -1.0\n").is_err());
        assert!(from_toml("[output]\nprecision = 40\n").is_err());
        assert!(from_toml("[logging]\nlevel = \"loud\"\n").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = RootsConfig::load(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_verbose_override() {
        let mut config = RootsConfig::default();
        config.merge_with_cli(true, None);
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_log_level_override() {
        let mut config = RootsConfig::default();
        config.merge_with_cli(true, Some(LogLevel::Trace));
        assert_eq!(config.logging.level, LogLevel::Trace);

        let mut config = RootsConfig::default();
        config.merge_with_cli(false, Some("error".parse().unwrap()));
        assert_eq!(config.logging.level, LogLevel::Error);
    }

    #[test]
    fn test_toml_output() {
        let text = RootsConfig::default().to_toml().unwrap();
        assert!(text.contains("[solver]"));
        assert!(text.contains("max_iterations = 128"));
        assert!(text.contains("format = \"table\""));
        assert!(text.contains("level = \"warn\""));
    }
}
