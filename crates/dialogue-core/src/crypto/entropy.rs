//! Operating-system randomness as a byte reader.

use std::io;

/// Reads cryptographically secure random bytes from the operating system.
///
/// [`encrypt`](super::encrypt) takes any [`io::Read`] as its salt source;
/// this is the one production callers use.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl io::Read for OsEntropy {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        getrandom::getrandom(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("OS entropy: {}", e)))?;
        Ok(buf.len())
    }
}
