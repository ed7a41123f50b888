//! Types for writing BA2 archives
//!
//! Rewriting is a two-pass backpatch: pass 1 streams the data region and the
//! name table while the final offsets accumulate in an in-memory record
//! table, pass 2 seeks back to the start and writes the header and records.
//! The output sink therefore has to support seeking.

use binrw::BinWrite;
use byteorder::{LittleEndian, WriteBytesExt};
use indexmap::IndexMap;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::compression::{copy_exact, CompressionKind};
use crate::error::{Result, UnsupportedError};
use crate::read::Ba2Archive;
use crate::types::{Ba2Header, Ba2Record, RECORD_TABLE_MARKER};

/// Replacement payloads applied by name when an archive is rewritten.
///
/// A name present in the overlay means "use this payload and its length
/// instead of the original entry's bytes"; absence means the original payload
/// is copied verbatim. The overlay is the only mutable state involved in a
/// rewrite; the loaded header, records and names are never touched.
#[derive(Debug, Clone, Default)]
pub struct Ba2Overlay {
    replacements: IndexMap<String, Vec<u8>>,
}

impl Ba2Overlay {
    /// An overlay with no replacements queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `data` as the replacement payload for `name`.
    ///
    /// Any byte sequence is accepted. Replacing the same name twice keeps
    /// only the latest payload.
    pub fn replace_file(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.replacements.insert(name.into(), data.into());
    }

    /// The replacement payload queued for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.replacements.get(name).map(Vec::as_slice)
    }

    /// Whether a replacement is queued for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.replacements.contains_key(name)
    }

    /// Names with a queued replacement, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.replacements.keys().map(String::as_str)
    }

    /// Number of queued replacements.
    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    /// Whether no replacements are queued.
    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    /// Drop every queued replacement.
    pub fn clear(&mut self) {
        self.replacements.clear();
    }
}

impl<R: Read + Seek> Ba2Archive<R> {
    /// Rewrite the archive to `writer`, substituting queued replacements.
    ///
    /// Entries are written in record order. A replaced entry is stored
    /// uncompressed with its new length; every other entry's payload is
    /// copied verbatim from the source stream. All record offsets and the
    /// name table offset are recomputed for the new layout, every other
    /// record field is carried unchanged.
    ///
    /// Fails when an entry without a replacement is stored compressed.
    ///
    /// ```no_run
    /// use std::io::Cursor;
    ///
    /// fn patch(mut ba2: bgs_ba2::Ba2Archive<std::fs::File>) -> bgs_ba2::error::Result<()> {
    ///     ba2.replace_file("interface/translate_en.txt", b"DIALOGUE\tHello".to_vec());
    ///     ba2.write_to(Cursor::new(Vec::new()))?;
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip_all, err)]
    pub fn write_to<W: Write + Seek>(&mut self, mut writer: W) -> Result<W> {
        let shared = Arc::clone(&self.shared);

        let reserved_size = if shared.reserved.is_some() { 8 } else { 0 };
        let table_size = Ba2Record::SIZE * shared.files.len() as u64;
        let data_start = Ba2Header::SIZE + reserved_size + table_size + 8;
        writer.seek(SeekFrom::Start(data_start))?;

        let mut records = Vec::with_capacity(shared.files.len());
        for file in &shared.files {
            let mut record = file.record;
            record.offset = writer.stream_position()?;

            if let Some(payload) = self.overlay.get(&file.file_name) {
                record.packed_size = 0;
                record.unpacked_size = payload.len() as u32;
                writer.write_all(payload)?;
            } else {
                if file.record.compression() != CompressionKind::None {
                    return Err(UnsupportedError::CompressedData {
                        name: file.file_name.to_string(),
                    }
                    .into());
                }

                self.reader.seek(SeekFrom::Start(file.record.offset))?;
                copy_exact(
                    &mut self.reader,
                    &mut writer,
                    file.record.unpacked_size as u64,
                )?;
            }

            records.push(record);
        }

        let names_offset = writer.stream_position()?;
        for file in &shared.files {
            writer.write_u16::<LittleEndian>(file.file_name_raw.len() as u16)?;
            writer.write_all(&file.file_name_raw)?;
        }

        // Backpatch: the header and record table depend on the final layout,
        // so they are written last even though they occupy the lowest offsets.
        writer.seek(SeekFrom::Start(0))?;
        let header = Ba2Header {
            names_offset,
            ..shared.header
        };
        header.write(&mut writer)?;
        if let Some(reserved) = shared.reserved {
            writer.write_u64::<LittleEndian>(reserved)?;
        }
        for record in &records {
            record.write(&mut writer)?;
        }
        writer.write_u64::<LittleEndian>(RECORD_TABLE_MARKER)?;

        debug!(files = records.len(), "archive rewritten");

        Ok(writer)
    }

    /// Rewrite the archive to a file at `path`, substituting queued replacements.
    ///
    /// The destination handle is released on every exit path; a failed
    /// rewrite leaves a closed, possibly truncated file behind.
    #[instrument(skip(self, path), err)]
    pub fn write(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        self.write_to(file)?;
        Ok(())
    }
}
