//! Password confirmation.

use zeroize::Zeroizing;

use crate::error::{DialogueError, Result};

/// A password held in a buffer that is wiped on drop.
pub type Password = Zeroizing<Vec<u8>>;

/// Check a password against its retyped confirmation.
///
/// Both inputs are compared exactly as typed; the accepted password is then
/// trimmed of surrounding whitespace. An empty result is rejected.
///
/// # Examples
///
/// ```
/// use dialogue_core::crypto::confirm_password;
///
/// let password = confirm_password(b"hunter2\n", b"hunter2\n").unwrap();
/// assert_eq!(password.as_slice(), b"hunter2");
/// assert!(confirm_password(b"hunter2", b"hunter3").is_err());
/// ```
pub fn confirm_password(entered: &[u8], retyped: &[u8]) -> Result<Password> {
    if entered != retyped {
        return Err(DialogueError::PasswordMismatch);
    }

    let trimmed = entered.trim_ascii();
    if trimmed.is_empty() {
        return Err(DialogueError::InvalidInput(
            "Password cannot be empty".to_string(),
        ));
    }

    Ok(Zeroizing::new(trimmed.to_vec()))
}
