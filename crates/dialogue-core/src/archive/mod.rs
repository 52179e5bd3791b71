//! Directory trees as a single byte stream.
//!
//! The stream is a tar archive, optionally gzip-compressed. Whether it was
//! compressed is never recorded anywhere: on the way back, [`classify`] sniffs
//! the gzip magic and otherwise probes the first tar record.

pub mod extract;
pub mod writer;

pub use extract::{classify, try_extract, ArchiveStream, PayloadKind};
pub use writer::{archive, archive_into};

/// Leading bytes of every gzip stream.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Record name of the archived root directory.
pub(crate) const ROOT_ENTRY: &str = "./";
