//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, and by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Path to lock or unlock does not exist.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments (empty or mismatched password, occupied output).
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong password or tampered container).
    pub const AUTH_FAILED: i32 = 5;

    /// Container or archive is structurally broken.
    pub const CORRUPT: i32 = 6;
}

/// Config directory name under `$XDG_CONFIG_HOME`.
pub const APP_DIR: &str = "dialogue";

/// Default suffix marking a path that is, or should be, locked.
pub const DEFAULT_LOCKED_SUFFIX: &str = ".locked";

/// Default suffix for the output of an unlock.
pub const DEFAULT_UNLOCKED_SUFFIX: &str = ".unlocked";
