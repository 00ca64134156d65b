//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from `CoreError` to exit codes and user-facing messages.

use edgespeak_client::ClientError;
use edgespeak_core::{BackendError, CoreError, PathError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Invalid input or arguments.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The server could not be reached.
    #[error("Server unavailable: {0}")]
    Unavailable(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2,    // EX_USAGE
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Io(_) => 74,          // EX_IOERR
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Request(e) => Self::Arguments(e.to_string()),
            CoreError::Backend(e @ BackendError::Network(_)) => Self::Unavailable(e.to_string()),
            CoreError::Backend(e) => Self::Core(e.to_string()),
            CoreError::Store(e) => Self::Io(e.to_string()),
            CoreError::Loading(e) => Self::Core(e.to_string()),
            CoreError::Settings(e) => Self::Config(e.to_string()),
        }
    }
}

impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Exit code for an error returned from `run`.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgespeak_core::{RequestError, SettingsError};

    #[test]
    fn test_request_error_is_usage() {
        let err = CliError::from(CoreError::Request(RequestError::EmptyText));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_network_error_is_unavailable() {
        let err = CliError::from(CoreError::Backend(BackendError::Network(
            "connection refused".to_string(),
        )));
        assert_eq!(err.exit_code(), 69);
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_rejection_is_general_error() {
        let err = CliError::from(CoreError::Backend(BackendError::Rejected {
            status: 500,
            message: "Speech synthesis failed".to_string(),
        }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_settings_error_is_config() {
        let err = CliError::from(CoreError::Settings(SettingsError::EmptyVoice));
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_exit_code_through_anyhow() {
        let err = anyhow::Error::new(CliError::Io("disk full".to_string()));
        assert_eq!(exit_code_for(&err), 74);
        assert_eq!(exit_code_for(&anyhow::anyhow!("other")), 1);
    }
}
