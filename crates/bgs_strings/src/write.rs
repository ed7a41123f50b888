//! Writing string table files
//!
//! The entry count is written first, the entry table region is reserved, and
//! the text blob is streamed with content dedup. Once every offset is known
//! the data size and the entry table are backpatched, so the output sink has
//! to support seeking.

use byteorder::{LittleEndian, WriteBytesExt};
use encoding_rs::WINDOWS_1252;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::types::StringTable;

impl StringTable {
    /// Write the table to `writer` in its variant's on-disk layout.
    ///
    /// Entries are emitted in the table's order. Identical text is stored
    /// once: every later entry with the same content reuses the first
    /// occurrence's offset.
    #[instrument(skip_all, err)]
    pub fn write_to<W: Write + Seek>(&self, mut writer: W) -> Result<W> {
        writer.write_u32::<LittleEndian>(self.get_entries().len() as u32)?;

        // The data size field and the entry table get backpatched once every
        // offset is known; skip straight to the blob.
        let data_offset = 8 + 8 * self.get_entries().len() as u64;
        writer.seek(SeekFrom::Start(data_offset))?;

        let mut table = Vec::with_capacity(self.get_entries().len());
        let mut written: HashMap<&str, u32> = HashMap::new();
        for (&id, text) in self.get_entries() {
            if let Some(&offset) = written.get(text.as_str()) {
                table.push((id, offset));
                continue;
            }

            let offset = (writer.stream_position()? - data_offset) as u32;
            written.insert(text, offset);
            table.push((id, offset));

            let (bytes, _, had_errors) = WINDOWS_1252.encode(text);
            if had_errors {
                return Err(Error::Encode { id });
            }

            if self.variant().has_length_prefix() {
                writer.write_u32::<LittleEndian>(bytes.len() as u32 + 1)?;
            }
            writer.write_all(&bytes)?;
            writer.write_u8(0)?;
        }

        let data_size = (writer.stream_position()? - data_offset) as u32;
        writer.seek(SeekFrom::Start(4))?;
        writer.write_u32::<LittleEndian>(data_size)?;

        for (id, offset) in table {
            writer.write_u32::<LittleEndian>(id)?;
            writer.write_u32::<LittleEndian>(offset)?;
        }

        debug!(
            entries = self.get_entries().len(),
            unique = written.len(),
            data_size,
            "string table written"
        );

        Ok(writer)
    }

    /// Write the table to a file at `path`.
    ///
    /// The destination handle is released on every exit path; a failed write
    /// leaves a closed, possibly truncated file behind.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        self.write_to(file)?;
        Ok(())
    }
}
