//! # Dialogue Core
//!
//! Core library for Dialogue - a password-locked local journal.
//!
//! Locking turns a file or a whole directory tree into one authenticated
//! ciphertext blob; unlocking recovers the original file or tree.
//!
//! ## Architecture
//!
//! - **crypto**: scrypt key derivation and AES-256-GCM sealing
//! - **archive**: directory tree to tar stream and back, with raw-file detection
//! - **locker**: the lock/unlock pipelines composing the two
//! - **fs**: atomic file replacement
//!
//! ## Container format
//!
//! ```text
//! [ AES-256-GCM ciphertext + 16-byte tag ][ 12-byte salt/nonce ]
//! ```

pub mod archive;
pub mod crypto;
pub mod error;
pub mod fs;
pub mod locker;

pub use error::{DialogueError, Result};
pub use locker::{Locker, Unlocked};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
