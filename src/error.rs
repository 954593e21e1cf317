//! Error types for suite-runner

use thiserror::Error;

/// Result type alias for suite-runner operations
pub type Result<T> = std::result::Result<T, Error>;

/// Exit code reported when a run request cannot be built
pub const CONFIGURATION_EXIT_CODE: i32 = 2;

/// Exit code reported when the harness process cannot be started
pub const INVOCATION_EXIT_CODE: i32 = 127;

/// Main error type for suite-runner operations
///
/// A harness that runs to completion and reports failing tests is not an
/// error; see [`crate::RunOutcome`].
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid input: unset variables, bad paths, unknown suites
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The harness process could not be spawned
    #[error("Failed to start harness '{program}': {source}")]
    Invocation {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Regex error
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create an invocation error
    pub fn invocation(program: impl Into<String>, source: std::io::Error) -> Self {
        Error::Invocation {
            program: program.into(),
            source,
        }
    }

    /// Whether this error was raised before any process was spawned
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration { .. })
    }

    /// Process exit code the CLI reports for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Configuration { .. } => CONFIGURATION_EXIT_CODE,
            Error::Invocation { .. } => INVOCATION_EXIT_CODE,
            Error::Io(_) | Error::Regex(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_message_is_prefixed() {
        let err = Error::configuration("HARNESS_HOME is not set");
        assert_eq!(
            err.to_string(),
            "Configuration error: HARNESS_HOME is not set"
        );
        assert!(err.is_configuration());
        assert_eq!(err.exit_code(), CONFIGURATION_EXIT_CODE);
    }

    #[test]
    fn invocation_error_names_program() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err = Error::invocation("dart", source);
        assert!(err.to_string().contains("'dart'"));
        assert!(!err.is_configuration());
        assert_eq!(err.exit_code(), INVOCATION_EXIT_CODE);
    }
}
