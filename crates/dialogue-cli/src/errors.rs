//! CLI error types for structured error handling.
//!
//! Core errors are mapped onto a small set of kinds, each with its own
//! exit code, so scripts can tell a wrong password from a missing path.

use std::fmt;

use dialogue_core::DialogueError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Path to lock or unlock does not exist
    NotFound { message: String, hint: String },

    /// Wrong password or tampered container
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),

    /// Container or archive is structurally broken
    Corrupt(String),

    /// Anything else (I/O, entropy, key derivation)
    Other(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message)
            | CliError::Corrupt(message)
            | CliError::Other(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::Corrupt(_) => exit_codes::CORRUPT,
            CliError::Other(_) => 1,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        std::process::exit(self.exit_code())
    }
}

impl From<DialogueError> for CliError {
    fn from(err: DialogueError) -> Self {
        match err {
            DialogueError::NotFound(path) => CliError::not_found(
                format!("No such file or directory: {}", path),
                "Hint: Check the path, or run `dialogue lock <PATH>` first.",
            ),
            DialogueError::Authentication => CliError::auth_failed_with_hint(
                "Incorrect password, or the locked file has been modified.",
                "Hint: Passwords are case-sensitive; surrounding whitespace is ignored.",
            ),
            DialogueError::PasswordMismatch => CliError::invalid_input("Passwords do not match."),
            DialogueError::InvalidInput(message) => CliError::InvalidInput(message),
            DialogueError::AlreadyExists(path) => CliError::invalid_input(format!(
                "Output path is already taken: {}\nHint: Pass --output to choose another destination.",
                path
            )),
            err @ (DialogueError::MalformedContainer(_) | DialogueError::CorruptArchive(_)) => {
                CliError::Corrupt(err.to_string())
            }
            other => CliError::Other(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_exit_codes() {
        let cases = [
            (DialogueError::NotFound("x".into()), exit_codes::NOT_FOUND),
            (DialogueError::Authentication, exit_codes::AUTH_FAILED),
            (DialogueError::PasswordMismatch, exit_codes::INVALID_INPUT),
            (DialogueError::InvalidInput("x".into()), exit_codes::INVALID_INPUT),
            (DialogueError::AlreadyExists("x".into()), exit_codes::INVALID_INPUT),
            (DialogueError::MalformedContainer("x".into()), exit_codes::CORRUPT),
            (DialogueError::CorruptArchive("x".into()), exit_codes::CORRUPT),
            (DialogueError::Entropy("x".into()), 1),
        ];

        for (err, code) in cases {
            let label = err.to_string();
            assert_eq!(CliError::from(err).exit_code(), code, "{}", label);
        }
    }

    #[test]
    fn test_auth_failure_display_includes_hint() {
        let err = CliError::from(DialogueError::Authentication);
        let rendered = err.to_string();
        assert!(rendered.starts_with("Incorrect password"));
        assert!(rendered.contains("Hint:"));
    }
}
