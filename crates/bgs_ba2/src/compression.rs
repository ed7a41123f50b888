//! Entry storage handling.
//!
//! Storage is modeled as a strategy keyed by [`CompressionKind`], with uncompressed storage as
//! the only implemented kind. Records whose packed size is nonzero use zlib in the wild; they
//! are rejected at the point where their payload would be touched, never while listing metadata.

use std::io::{self, Read, Seek, Write};

use tracing::instrument;

use crate::error::{Error, Result, UnsupportedError};

/// Identifies how an entry's payload is stored inside the BA2 file
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum CompressionKind {
    /// Stores the data as it is
    #[default]
    None,

    /// Payload is deflated. Part of the format family but not handled by this library
    Zlib,
}

impl std::fmt::Display for CompressionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompressionKind::None => write!(f, "none"),
            CompressionKind::Zlib => write!(f, "zlib"),
        }
    }
}

/// Bounded reader over a single entry's payload.
///
/// Construction fails for any storage kind other than [`CompressionKind::None`].
pub(crate) struct Ba2BlockReader<'a, R: Read + Seek> {
    inner: io::Take<&'a mut R>,
}

impl<'a, R: Read + Seek> Ba2BlockReader<'a, R> {
    #[instrument(skip(reader, name))]
    pub fn new(
        reader: &'a mut R,
        start: u64,
        limit: u64,
        kind: CompressionKind,
        name: &str,
    ) -> Result<Self> {
        if kind != CompressionKind::None {
            return Err(UnsupportedError::CompressedData { name: name.into() }.into());
        }

        reader.seek(io::SeekFrom::Start(start))?;

        Ok(Self {
            inner: reader.by_ref().take(limit),
        })
    }
}

impl<R: Read + Seek> Read for Ba2BlockReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.inner.read_exact(buf)
    }

    fn read_to_end(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        self.inner.read_to_end(buf)
    }
}

/// Copy exactly `size` bytes from `reader` to `writer`.
///
/// A source that runs dry early is structurally corrupt, not an I/O failure.
pub(crate) fn copy_exact<R, W>(reader: &mut R, writer: &mut W, size: u64) -> Result<()>
where
    R: Read,
    W: Write,
{
    let mut bounded = reader.by_ref().take(size);
    let copied = io::copy(&mut bounded, writer)?;
    if copied != size {
        return Err(Error::InvalidArchive);
    }
    Ok(())
}
