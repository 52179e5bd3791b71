//! Payload classification and directory tree reconstruction.
//!
//! A decrypted payload carries no flag saying whether it was a single file or
//! a packed directory, nor whether the archive was compressed. [`classify`]
//! resolves that once:
//!
//! 1. gzip magic at offset 0: a compressed archive, decompressed here
//! 2. otherwise, if the first tar record parses: an uncompressed archive
//! 3. otherwise: the raw bytes of a single file

use std::borrow::Cow;
use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use tar::{Entry, EntryType};
use tracing::debug;

use super::GZIP_MAGIC;
use crate::error::{DialogueError, Result};

/// Permission bits kept from a record's mode.
const MODE_MASK: u32 = 0o7777;

/// What a decrypted payload turned out to be.
#[derive(Debug)]
pub enum PayloadKind<'a> {
    /// A single file's original bytes.
    Raw(&'a [u8]),
    /// A packed directory tree.
    Archive(ArchiveStream<'a>),
}

/// An uncompressed archive stream ready for extraction.
#[derive(Debug)]
pub struct ArchiveStream<'a> {
    bytes: Cow<'a, [u8]>,
    compressed: bool,
}

impl ArchiveStream<'_> {
    /// Whether the payload was gzip-compressed before classification.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// The uncompressed tar bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Reconstruct the tree under `destination`.
    ///
    /// `destination` is created as a directory if missing. Records are applied
    /// strictly in stream order: directory records ensure the directory exists,
    /// regular-file records create or truncate the file and copy exactly the
    /// recorded bytes. Directory modes are applied after every record has been
    /// written.
    ///
    /// # Errors
    ///
    /// - [`DialogueError::AlreadyExists`] if a non-directory occupies `destination`
    /// - [`DialogueError::CorruptArchive`] on a malformed, truncated, unsafe or
    ///   unsupported record
    /// - [`DialogueError::Io`] on any filesystem failure
    pub fn extract(&self, destination: &Path) -> Result<()> {
        prepare_destination(destination)?;

        let mut archive = tar::Archive::new(self.as_bytes());
        let entries = archive.entries().map_err(corrupt)?;

        let mut directories = Vec::new();
        let mut files = 0usize;
        for entry in entries {
            let mut entry = entry.map_err(corrupt)?;
            let relative = relative_path(&entry.path().map_err(corrupt)?)?;
            let entry_type = entry.header().entry_type();
            let mode = entry.header().mode().map_err(corrupt)? & MODE_MASK;
            let target = destination.join(&relative);

            match entry_type {
                EntryType::Directory => {
                    if !target.is_dir() {
                        fs::create_dir_all(&target)?;
                    }
                    directories.push((target, mode));
                }
                EntryType::Regular if relative.as_os_str().is_empty() => {
                    return Err(DialogueError::CorruptArchive(
                        "file record has no name".to_string(),
                    ));
                }
                EntryType::Regular => {
                    write_file(&mut entry, &target, mode)?;
                    files += 1;
                }
                other => {
                    return Err(DialogueError::CorruptArchive(format!(
                        "unsupported record type {:?} for {}",
                        other,
                        relative.display()
                    )));
                }
            }
        }

        // Deepest first, so a read-only parent never blocks a child.
        for (path, mode) in directories.iter().rev() {
            set_mode(path, *mode)?;
        }

        debug!(
            destination = %destination.display(),
            directories = directories.len(),
            files,
            "extracted archive"
        );
        Ok(())
    }
}

/// Decide whether `payload` is a raw file or an archive.
///
/// # Errors
///
/// Returns [`DialogueError::CorruptArchive`] if the payload starts with the
/// gzip magic but does not decompress.
pub fn classify(payload: &[u8]) -> Result<PayloadKind<'_>> {
    if payload.starts_with(&GZIP_MAGIC) {
        let mut bytes = Vec::new();
        GzDecoder::new(payload)
            .read_to_end(&mut bytes)
            .map_err(|e| DialogueError::CorruptArchive(format!("gzip stream: {}", e)))?;
        return Ok(PayloadKind::Archive(ArchiveStream {
            bytes: Cow::Owned(bytes),
            compressed: true,
        }));
    }

    if first_record_parses(payload) {
        Ok(PayloadKind::Archive(ArchiveStream {
            bytes: Cow::Borrowed(payload),
            compressed: false,
        }))
    } else {
        Ok(PayloadKind::Raw(payload))
    }
}

/// Extract `payload` under `destination` if it is an archive.
///
/// Returns `Some(bytes)` when the payload is a single file's contents; nothing
/// is written in that case and the caller writes the bytes wherever they
/// belong. Returns `None` once an archive has been fully extracted.
pub fn try_extract<'a>(payload: &'a [u8], destination: &Path) -> Result<Option<&'a [u8]>> {
    match classify(payload)? {
        PayloadKind::Raw(bytes) => Ok(Some(bytes)),
        PayloadKind::Archive(stream) => {
            stream.extract(destination)?;
            Ok(None)
        }
    }
}

fn first_record_parses(stream: &[u8]) -> bool {
    let mut archive = tar::Archive::new(stream);
    let Ok(mut entries) = archive.entries() else {
        return false;
    };
    let first = entries.next();
    matches!(first, Some(Ok(_)))
}

fn prepare_destination(destination: &Path) -> Result<()> {
    match fs::metadata(destination) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(DialogueError::AlreadyExists(format!(
            "{} exists and is not a directory",
            destination.display()
        ))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(destination)?;
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Strip `./` components and reject anything that could escape the destination.
fn relative_path(raw: &Path) -> Result<PathBuf> {
    let mut relative = PathBuf::new();
    for component in raw.components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            _ => {
                return Err(DialogueError::CorruptArchive(format!(
                    "unsafe record path {}",
                    raw.display()
                )))
            }
        }
    }
    Ok(relative)
}

fn write_file<R: Read>(entry: &mut Entry<'_, R>, target: &Path, mode: u32) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }

    let expected = entry.header().size().map_err(corrupt)?;
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }

    let mut file = options.open(target)?;
    let written = io::copy(entry, &mut file)?;
    if written != expected {
        return Err(DialogueError::CorruptArchive(format!(
            "{} truncated: expected {} bytes, got {}",
            target.display(),
            expected,
            written
        )));
    }
    file.flush()?;
    drop(file);

    // The open mode is filtered by the umask; set it exactly.
    set_mode(target, mode)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

fn corrupt(err: io::Error) -> DialogueError {
    DialogueError::CorruptArchive(err.to_string())
}
