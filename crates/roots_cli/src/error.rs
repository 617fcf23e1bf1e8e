//! CLI error types

use roots_core::types::SolverError;
use thiserror::Error;

/// Errors surfaced by the `roots` binary
#[derive(Debug, Error)]
pub enum CliError {
    /// A solver rejected its input or failed to converge
    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    /// The configuration file or environment could not be read
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON output could not be produced
    #[error("JSON serialisation error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration could not be printed as TOML
    #[error("TOML serialisation error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// Writing to standard output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// One or more self-test cases of `roots check` failed
    #[error("Self-test failed: {failed} of {total} cases")]
    SelfTest {
        /// Number of failing cases
        failed: usize,
        /// Number of cases run
        total: usize,
    },
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use roots_core::types::Method;

    #[test]
    fn test_solver_error_conversion() {
        let err: CliError = SolverError::NoBracket { a: 0.0, b: 1.0 }.into();
        assert!(matches!(err, CliError::Solver(_)));
        assert!(err.to_string().contains("not bracketed"));
    }

    #[test]
    fn test_self_test_message() {
        let err = CliError::SelfTest { failed: 1, total: 6 };
        assert_eq!(err.to_string(), "Self-test failed: 1 of 6 cases");

        let err: CliError = SolverError::NotConverging {
            method: Method::Newton,
            x: 1.0,
        }
        .into();
        assert!(err.to_string().starts_with("Solver error"));
    }
}
