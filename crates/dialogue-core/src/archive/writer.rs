//! Directory tree serialization.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use tar::Builder;
use tracing::{debug, warn};

use super::ROOT_ENTRY;
use crate::error::{DialogueError, Result};

/// Serialize the directory tree at `root` into an in-memory archive stream.
///
/// See [`archive_into`] for ordering and record details.
pub fn archive(root: &Path, compress: bool) -> Result<Vec<u8>> {
    archive_into(root, compress, Vec::new())
}

/// Serialize the directory tree at `root` into `writer`, returning the writer.
///
/// The root itself is recorded first as `./`, then the tree is walked depth
/// first with siblings in file-name order, so every directory record precedes
/// the records nested under it. Each record carries the relative path, the
/// entry type and the permission mode; regular files are followed by their
/// contents. Symlinks and special files are skipped.
///
/// With `compress`, the whole stream is gzip-compressed. On error the tar
/// and gzip writers are still finalized when dropped.
///
/// # Errors
///
/// - [`DialogueError::NotFound`] if `root` does not exist
/// - [`DialogueError::InvalidInput`] if `root` is not a directory
/// - [`DialogueError::Io`] on any read failure in the source tree
pub fn archive_into<W: Write>(root: &Path, compress: bool, writer: W) -> Result<W> {
    let metadata = fs::metadata(root).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DialogueError::NotFound(root.display().to_string()),
        _ => e.into(),
    })?;
    if !metadata.is_dir() {
        return Err(DialogueError::InvalidInput(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    if compress {
        let encoder = write_tree(root, GzEncoder::new(writer, Compression::default()))?;
        Ok(encoder.finish()?)
    } else {
        write_tree(root, writer)
    }
}

fn write_tree<W: Write>(root: &Path, writer: W) -> Result<W> {
    let mut builder = Builder::new(writer);
    builder.append_dir(ROOT_ENTRY, root)?;

    let mut records = 1usize;
    walk(&mut builder, root, Path::new(""), &mut records)?;

    let writer = builder.into_inner()?;
    debug!(root = %root.display(), records, "archived directory tree");
    Ok(writer)
}

fn walk<W: Write>(
    builder: &mut Builder<W>,
    dir: &Path,
    name: &Path,
    records: &mut usize,
) -> Result<()> {
    let mut children = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    children.sort_by_key(|child| child.file_name());

    for child in children {
        let source = child.path();
        let child_name = name.join(child.file_name());
        let file_type = child.file_type()?;

        if file_type.is_dir() {
            builder.append_dir(&child_name, &source)?;
            *records += 1;
            walk(builder, &source, &child_name, records)?;
        } else if file_type.is_file() {
            let mut file = File::open(&source)?;
            builder.append_file(&child_name, &mut file)?;
            *records += 1;
        } else {
            warn!(path = %source.display(), "skipping entry that is neither a file nor a directory");
        }
    }

    Ok(())
}
