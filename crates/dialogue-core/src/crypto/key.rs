//! Key derivation using scrypt.
//!
//! The salt is the same 12-byte value that later serves as the AES-GCM nonce,
//! so a container is fully described by its sealed bytes plus that tail.

use zeroize::ZeroizeOnDrop;

use crate::error::{DialogueError, Result};

/// Scrypt cost parameters: N = 2^15 = 32768, r = 8, p = 1.
const SCRYPT_LOG_N: u8 = 15;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;

/// Length of derived key in bytes (32 bytes = AES-256).
pub const KEY_LENGTH: usize = 32;

/// A symmetric key derived from a password.
///
/// Key material is zeroized when dropped, including when derivation fails
/// halfway through.
#[derive(ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    fn zeroed() -> Self {
        Self {
            key: [0u8; KEY_LENGTH],
        }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive a 32-byte key from `password` and `salt` with scrypt.
///
/// Deterministic: the same password and salt always produce the same key.
/// Parameter or output-length rejections surface as
/// [`DialogueError::KeyDerivation`].
///
/// # Examples
///
/// ```
/// use dialogue_core::crypto::derive_key;
///
/// let key = derive_key(b"my-password", b"Test salt!!!").unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(password: &[u8], salt: &[u8]) -> Result<DerivedKey> {
    let params = scrypt::Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, KEY_LENGTH)
        .map_err(|e| DialogueError::KeyDerivation(format!("invalid scrypt params: {}", e)))?;

    // Fill in place so no unzeroed copy of the key is left on the stack.
    let mut key = DerivedKey::zeroed();
    scrypt::scrypt(password, salt, &params, &mut key.key)
        .map_err(|e| DialogueError::KeyDerivation(e.to_string()))?;

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_derivation_deterministic() {
        let key1 = derive_key(b"test", b"Test salt!!!").unwrap();
        let key2 = derive_key(b"test", b"Test salt!!!").unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key(b"test", b"salt-one-12b").unwrap();
        let key2 = derive_key(b"test", b"salt-two-12b").unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_password_different_key() {
        let key1 = derive_key(b"password-one", b"Test salt!!!").unwrap();
        let key2 = derive_key(b"password-two", b"Test salt!!!").unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_derived_key_debug_redacts() {
        let key = derive_key(b"test", b"Test salt!!!").unwrap();

        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));

        let key_hex = hex::encode(&key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }
}
