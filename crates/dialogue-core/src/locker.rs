//! Lock and unlock pipelines.
//!
//! - `lock`: read path (archive if a directory, raw bytes otherwise), encrypt,
//!   replace the path with the ciphertext container
//! - `unlock`: read container, decrypt, classify, then either extract the tree
//!   or write the raw bytes to the destination
//!
//! All transforms happen in memory before anything touches the filesystem, so
//! a wrong password or a bad container never leaves a half-written output.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, Dispatch};
use zeroize::Zeroizing;

use crate::archive::{archive, classify, PayloadKind};
use crate::crypto::{decrypt, encrypt, OsEntropy};
use crate::error::{DialogueError, Result};
use crate::fs::{replace_dir_with_bytes, replace_file_with_bytes};

/// Permission bits for locked containers and unlocked single files.
const LOCKED_FILE_MODE: u32 = 0o600;

/// What an unlock produced at the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unlocked {
    /// The container held a single file, now written to the destination.
    File,
    /// The container held a directory tree, now extracted under the destination.
    Directory,
}

/// Runs lock and unlock operations.
///
/// Logging is an explicit collaborator: when a [`Dispatch`] is supplied, each
/// operation's events go to it; otherwise they go wherever the caller's
/// current default subscriber sends them (nowhere, if none is set).
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use dialogue_core::{Locker, Unlocked};
///
/// let locker = Locker::new().with_compression(true);
/// locker.lock(Path::new("journal"), b"password").unwrap();
///
/// let outcome = locker
///     .unlock(Path::new("journal"), Path::new("journal.unlocked"), b"password")
///     .unwrap();
/// assert_eq!(outcome, Unlocked::Directory);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Locker {
    compress: bool,
    dispatch: Option<Dispatch>,
}

impl Locker {
    /// A locker that writes uncompressed archives and logs to the default subscriber.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gzip the archive stream when locking directories.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Send this locker's events to `dispatch`.
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// Replace `path` (file or directory) with its ciphertext container.
    ///
    /// A symlink is resolved first: the file or directory it points to is
    /// locked and the link itself is left in place.
    ///
    /// # Errors
    ///
    /// - [`DialogueError::NotFound`] if `path` does not exist
    /// - any error from archiving, encryption or the final write
    pub fn lock(&self, path: &Path, password: &[u8]) -> Result<()> {
        self.lock_with_entropy(path, password, &mut OsEntropy)
    }

    /// [`lock`](Self::lock) with an explicit salt source.
    pub fn lock_with_entropy<R: Read + ?Sized>(
        &self,
        path: &Path,
        password: &[u8],
        entropy: &mut R,
    ) -> Result<()> {
        self.scoped(|| lock_path(path, password, self.compress, entropy))
    }

    /// Decrypt `source` and restore its contents at `destination`.
    ///
    /// `source` is left in place.
    ///
    /// # Errors
    ///
    /// - [`DialogueError::NotFound`] if `source` does not exist
    /// - [`DialogueError::Authentication`] on a wrong password or tampered container
    /// - [`DialogueError::AlreadyExists`] if the container holds a single file
    ///   and `destination` is a directory, or holds a tree and `destination`
    ///   is not a directory
    /// - any error from extraction or the final write
    pub fn unlock(&self, source: &Path, destination: &Path, password: &[u8]) -> Result<Unlocked> {
        self.scoped(|| unlock_path(source, destination, password))
    }

    fn scoped<T>(&self, operation: impl FnOnce() -> T) -> T {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, operation),
            None => operation(),
        }
    }
}

fn lock_path<R: Read + ?Sized>(
    path: &Path,
    password: &[u8],
    compress: bool,
    entropy: &mut R,
) -> Result<()> {
    let resolved = fs::canonicalize(path).map_err(|e| not_found(path, e))?;
    let path = resolved.as_path();
    let metadata = fs::metadata(path)?;

    let plaintext = Zeroizing::new(if metadata.is_dir() {
        archive(path, compress)?
    } else {
        fs::read(path)?
    });
    debug!(
        path = %path.display(),
        directory = metadata.is_dir(),
        compress,
        bytes = plaintext.len(),
        "read plaintext"
    );

    let container = encrypt(&plaintext, password, entropy)?;
    if metadata.is_dir() {
        replace_dir_with_bytes(path, &container, Some(LOCKED_FILE_MODE))?;
    } else {
        replace_file_with_bytes(path, &container, Some(LOCKED_FILE_MODE))?;
    }

    debug!(path = %path.display(), bytes = container.len(), "wrote container");
    Ok(())
}

fn unlock_path(source: &Path, destination: &Path, password: &[u8]) -> Result<Unlocked> {
    let container = fs::read(source).map_err(|e| not_found(source, e))?;
    let plaintext = Zeroizing::new(decrypt(&container, password)?);

    match classify(&plaintext)? {
        PayloadKind::Raw(bytes) => {
            if destination.is_dir() {
                return Err(DialogueError::AlreadyExists(format!(
                    "{} is a directory",
                    destination.display()
                )));
            }
            replace_file_with_bytes(destination, bytes, Some(LOCKED_FILE_MODE))?;
            debug!(destination = %destination.display(), bytes = bytes.len(), "restored file");
            Ok(Unlocked::File)
        }
        PayloadKind::Archive(stream) => {
            debug!(compressed = stream.is_compressed(), "payload is an archive");
            stream.extract(destination)?;
            Ok(Unlocked::Directory)
        }
    }
}

fn not_found(path: &Path, err: io::Error) -> DialogueError {
    match err.kind() {
        io::ErrorKind::NotFound => DialogueError::NotFound(path.display().to_string()),
        _ => err.into(),
    }
}
