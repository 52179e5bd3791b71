//! Cryptographic operations for Dialogue.
//!
//! - **scrypt** (N=32768, r=8, p=1) derives a 32-byte key from the password
//!   and a 12-byte random salt
//! - **AES-256-GCM** seals the payload, using the same 12 bytes as its nonce
//! - Derived keys and passwords are zeroized on drop
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of a locked journal file or directory
//! - Tampering with ciphertext at rest
//!
//! We do NOT defend against:
//! - Offline dictionary attacks beyond the scrypt cost factor
//! - A repeating or predictable random source

pub mod cipher;
pub mod entropy;
pub mod key;
pub mod password;

pub use cipher::{decrypt, encrypt, SALT_LENGTH};
pub use entropy::OsEntropy;
pub use key::{derive_key, DerivedKey, KEY_LENGTH};
pub use password::{confirm_password, Password};
