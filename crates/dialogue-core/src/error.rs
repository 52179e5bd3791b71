//! Error types for Dialogue core operations.
//!
//! Every core operation returns one of these kinds directly to its caller;
//! nothing in the core retries or recovers. The CLI layer maps them to
//! user-facing messages and exit codes.

use thiserror::Error;

/// Result type alias for Dialogue operations.
pub type Result<T> = std::result::Result<T, DialogueError>;

/// Core error type for Dialogue operations.
#[derive(Debug, Error)]
pub enum DialogueError {
    /// The random source could not supply a full salt
    #[error("Entropy source failed: {0}")]
    Entropy(String),

    /// Scrypt rejected its parameters or output length
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    /// AEAD tag check failed (wrong password or corrupted ciphertext)
    #[error("Authentication failed: wrong password or corrupted data")]
    Authentication,

    /// Ciphertext container is too short to hold its salt
    #[error("Malformed container: {0}")]
    MalformedContainer(String),

    /// Archive stream is structurally invalid past its first record
    #[error("Corrupt archive: {0}")]
    CorruptArchive(String),

    /// Extraction destination is occupied by a non-directory
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Source path does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Password and its confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// AEAD seal failure unrelated to authentication
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Invalid caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
