//! Password-based AES-256-GCM sealing.
//!
//! Container layout: `[sealed ciphertext + 16-byte tag][12-byte salt]`.
//! The salt is appended, not prepended, and doubles as the GCM nonce. There is
//! no version byte and no length prefix.

use std::io::Read;

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};

use super::key::derive_key;
use crate::error::{DialogueError, Result};

/// Length of the salt/nonce appended to every container.
pub const SALT_LENGTH: usize = 12;

/// Encrypt `plaintext` under `password`, drawing a fresh salt from `entropy`.
///
/// The output is deterministic for a given entropy stream, which is what makes
/// fixed test vectors possible. Production callers pass
/// [`OsEntropy`](super::OsEntropy).
///
/// # Errors
///
/// - [`DialogueError::Entropy`] if `entropy` cannot supply 12 bytes
/// - [`DialogueError::KeyDerivation`] if scrypt rejects its inputs
///
/// # Examples
///
/// ```
/// use dialogue_core::crypto::{decrypt, encrypt, OsEntropy};
///
/// let container = encrypt(b"secret entry", b"password", &mut OsEntropy).unwrap();
/// let plaintext = decrypt(&container, b"password").unwrap();
/// assert_eq!(plaintext, b"secret entry");
/// ```
pub fn encrypt<R: Read + ?Sized>(
    plaintext: &[u8],
    password: &[u8],
    entropy: &mut R,
) -> Result<Vec<u8>> {
    let mut salt = [0u8; SALT_LENGTH];
    entropy
        .read_exact(&mut salt)
        .map_err(|e| DialogueError::Entropy(e.to_string()))?;

    let key = derive_key(password, &salt)?;
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));

    let mut container = cipher
        .encrypt(Nonce::from_slice(&salt), plaintext)
        .map_err(|_| DialogueError::Crypto("AES-GCM seal failed".to_string()))?;
    container.extend_from_slice(&salt);

    Ok(container)
}

/// Decrypt a container produced by [`encrypt`].
///
/// Either the full authentic plaintext is returned or nothing is: a wrong
/// password and tampered bytes both yield [`DialogueError::Authentication`]
/// with no further detail.
///
/// # Errors
///
/// - [`DialogueError::MalformedContainer`] if `container` is shorter than the salt
/// - [`DialogueError::KeyDerivation`] if scrypt rejects its inputs
/// - [`DialogueError::Authentication`] if the tag does not verify
pub fn decrypt(container: &[u8], password: &[u8]) -> Result<Vec<u8>> {
    if container.len() < SALT_LENGTH {
        return Err(DialogueError::MalformedContainer(format!(
            "container is {} bytes, shorter than the {}-byte salt",
            container.len(),
            SALT_LENGTH
        )));
    }

    let (sealed, salt) = container.split_at(container.len() - SALT_LENGTH);

    let key = derive_key(password, salt)?;
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));

    cipher
        .decrypt(Nonce::from_slice(salt), sealed)
        .map_err(|_| DialogueError::Authentication)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXED_SALT: &[u8; SALT_LENGTH] = b"Test salt!!!";

    #[test]
    fn test_salt_appended_at_tail() {
        let container = encrypt(b"Simple", b"test", &mut &FIXED_SALT[..]).unwrap();

        assert_eq!(&container[container.len() - SALT_LENGTH..], FIXED_SALT);
        // 6 plaintext bytes + 16-byte tag + 12-byte salt
        assert_eq!(container.len(), 6 + 16 + SALT_LENGTH);
    }

    #[test]
    fn test_short_entropy_source_fails() {
        let result = encrypt(b"Simple", b"test", &mut &b"short"[..]);
        assert!(matches!(result, Err(DialogueError::Entropy(_))));
    }

    #[test]
    fn test_round_trip_empty_plaintext() {
        let container = encrypt(b"", b"test", &mut &FIXED_SALT[..]).unwrap();
        assert_eq!(container.len(), 16 + SALT_LENGTH);
        assert_eq!(decrypt(&container, b"test").unwrap(), b"");
    }

    #[test]
    fn test_container_shorter_than_salt_is_malformed() {
        for len in 0..SALT_LENGTH {
            let container = vec![0u8; len];
            let result = decrypt(&container, b"test");
            assert!(matches!(result, Err(DialogueError::MalformedContainer(_))));
        }
    }

    #[test]
    fn test_container_without_tag_fails_authentication() {
        // Long enough for the salt, too short for a tag.
        let container = [7u8; SALT_LENGTH + 4];
        let result = decrypt(&container, b"test");
        assert!(matches!(result, Err(DialogueError::Authentication)));
    }

    #[test]
    fn test_tampered_salt_fails_authentication() {
        let mut container = encrypt(b"Simple", b"test", &mut &FIXED_SALT[..]).unwrap();
        let last = container.len() - 1;
        container[last] ^= 0x01;

        let result = decrypt(&container, b"test");
        assert!(matches!(result, Err(DialogueError::Authentication)));
    }
}
