//! Filesystem utilities for atomic replacement.
//!
//! New bytes are always written and synced to a hidden sibling first, then
//! moved into place with a single rename. Nothing at the destination is
//! deleted before its replacement is in place.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Replace the file at `destination` (or create it) with `bytes`.
///
/// `fs::rename` replaces an existing file atomically on every supported
/// platform, so the old contents stay intact until the new file is complete.
/// A directory at `destination` is refused with
/// [`io::ErrorKind::AlreadyExists`] and left untouched.
///
/// `mode` sets the new file's permission bits on Unix.
pub fn replace_file_with_bytes(
    destination: &Path,
    bytes: &[u8],
    mode: Option<u32>,
) -> io::Result<()> {
    if fs::metadata(destination).is_ok_and(|metadata| metadata.is_dir()) {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} is a directory", destination.display()),
        ));
    }

    let temp_path = stage_sibling(destination, bytes, mode)?;
    fs::rename(&temp_path, destination).map_err(|err| {
        let _ = fs::remove_file(&temp_path);
        err
    })
}

/// Replace the directory tree at `directory` with a regular file holding `bytes`.
///
/// The tree is first renamed aside, the new file renamed into its place, and
/// only then is the old tree deleted. If either rename fails, the tree is put
/// back and the staged file removed. If deleting the old tree fails, the new
/// file is already in place and the error names the leftover directory.
pub fn replace_dir_with_bytes(directory: &Path, bytes: &[u8], mode: Option<u32>) -> io::Result<()> {
    let temp_path = stage_sibling(directory, bytes, mode)?;
    let aside = sibling_name(directory, "old")?;

    if let Err(err) = fs::rename(directory, &aside) {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }
    if let Err(err) = fs::rename(&temp_path, directory) {
        let _ = fs::rename(&aside, directory);
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }

    fs::remove_dir_all(&aside).map_err(|err| {
        io::Error::new(
            err.kind(),
            format!(
                "{} was replaced but its old contents remain at {}: {}",
                directory.display(),
                aside.display(),
                err
            ),
        )
    })
}

/// Write `bytes` to a fresh hidden sibling of `destination` and return its path.
fn stage_sibling(destination: &Path, bytes: &[u8], mode: Option<u32>) -> io::Result<PathBuf> {
    let temp_path = sibling_name(destination, "tmp")?;
    if let Err(err) = write_synced(&temp_path, bytes, mode) {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }
    Ok(temp_path)
}

fn write_synced(path: &Path, bytes: &[u8], mode: Option<u32>) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        if let Some(mode) = mode {
            options.mode(mode);
        }
    }

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);

    // The open mode is filtered by the umask; set it exactly.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Some(mode) = mode {
            fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
        }
    }
    #[cfg(not(unix))]
    let _ = mode;

    Ok(())
}

fn sibling_name(destination: &Path, extension: &str) -> io::Result<PathBuf> {
    let name = destination.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no file name", destination.display()),
        )
    })?;
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?
        .as_nanos();
    let sibling = format!(
        ".{}.{}_{}.{}",
        name.to_string_lossy(),
        std::process::id(),
        nanos,
        extension
    );
    Ok(destination.with_file_name(sibling))
}
