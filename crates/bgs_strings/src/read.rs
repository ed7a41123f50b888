//! Reading string table files
//!

use byteorder::{LittleEndian, ReadBytesExt};
use encoding_rs::WINDOWS_1252;
use indexmap::IndexMap;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::Path;
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::types::{StringTable, Variant};

impl StringTable {
    /// Read a string table, decoding every entry's text eagerly.
    ///
    /// Entries populate the table in on-disk order. A duplicate string ID is
    /// not an error; the later occurrence overwrites the earlier one.
    ///
    /// ```no_run
    /// use std::io::prelude::*;
    ///
    /// fn list_entries(reader: impl Read + Seek) -> bgs_strings::error::Result<()> {
    ///     let table = bgs_strings::StringTable::read(reader, bgs_strings::Variant::Strings)?;
    ///
    ///     for (id, text) in table.get_entries() {
    ///         println!("{id}: {text}");
    ///     }
    ///
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(reader), err)]
    pub fn read<R: Read + Seek>(mut reader: R, variant: Variant) -> Result<Self> {
        let count = reader.read_u32::<LittleEndian>().map_err(structural)?;
        let data_size = reader.read_u32::<LittleEndian>().map_err(structural)?;

        let mut raw_entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let id = reader.read_u32::<LittleEndian>().map_err(structural)?;
            let offset = reader.read_u32::<LittleEndian>().map_err(structural)?;
            raw_entries.push((id, offset));
        }

        let mut data = vec![0u8; data_size as usize];
        reader.read_exact(&mut data).map_err(structural)?;

        let mut entries = IndexMap::with_capacity(raw_entries.len());
        for (id, offset) in raw_entries {
            let text = decode_entry(variant, &data, id, offset)?;
            entries.insert(id, text);
        }

        debug!(count = entries.len(), "string table loaded");

        Ok(StringTable::new(variant, entries))
    }

    /// Open a string table file from disk.
    ///
    /// When no variant is given it is inferred from the file extension.
    pub fn open(path: impl AsRef<Path>, variant: Option<Variant>) -> Result<Self> {
        let path = path.as_ref();
        let variant = match variant {
            Some(variant) => variant,
            None => Variant::from_path(path)?,
        };
        Self::read(File::open(path)?, variant)
    }
}

fn decode_entry(variant: Variant, data: &[u8], id: u32, offset: u32) -> Result<String> {
    let start = offset as usize;

    let bytes = if variant.has_length_prefix() {
        let header = data.get(start..start + 4).ok_or(Error::InvalidTable)?;
        // The stored length counts the trailing NUL terminator.
        let length = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
        if length == 0 {
            return Err(Error::InvalidTable);
        }
        data.get(start + 4..start + 4 + length - 1)
            .ok_or(Error::InvalidTable)?
    } else {
        let tail = data.get(start..).ok_or(Error::InvalidTable)?;
        let terminator = tail
            .iter()
            .position(|&b| b == 0)
            .ok_or(Error::InvalidTable)?;
        &tail[..terminator]
    };

    WINDOWS_1252
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(Cow::into_owned)
        .ok_or(Error::Decode { id, offset })
}

fn structural(err: io::Error) -> Error {
    match err.kind() {
        io::ErrorKind::UnexpectedEof => Error::InvalidTable,
        _ => Error::IOError(err),
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::types::{StringTable, Variant};

    #[test]
    fn read_nul_terminated_table() -> Result<()> {
        #[rustfmt::skip]
        let input = Cursor::new(vec![
            // Entry count, data size
            0x02, 0x00, 0x00, 0x00,
            0x04, 0x00, 0x00, 0x00,
            // Entries
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00,
            // Blob
            0x61, 0x00, 0x62, 0x00,
        ]);

        let table = StringTable::read(input, Variant::Strings)?;

        assert_eq!(table.len(), 2);
        assert_eq!(table.by_id(1), Some("a"));
        assert_eq!(table.by_id(2), Some("b"));

        Ok(())
    }

    #[test]
    fn read_length_prefixed_table() -> Result<()> {
        #[rustfmt::skip]
        let input = Cursor::new(vec![
            // Entry count, data size
            0x01, 0x00, 0x00, 0x00,
            0x07, 0x00, 0x00, 0x00,
            // Entries
            0x07, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            // Blob: length 3 counts "hi" plus the terminator
            0x03, 0x00, 0x00, 0x00, 0x68, 0x69, 0x00,
        ]);

        let table = StringTable::read(input, Variant::IlStrings)?;

        assert_eq!(table.len(), 1);
        assert_eq!(table.by_id(7), Some("hi"));

        Ok(())
    }

    #[test]
    fn read_duplicate_id_keeps_later_text() -> Result<()> {
        #[rustfmt::skip]
        let input = Cursor::new(vec![
            0x02, 0x00, 0x00, 0x00,
            0x04, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00,
            0x61, 0x00, 0x62, 0x00,
        ]);

        let table = StringTable::read(input, Variant::Strings)?;

        assert_eq!(table.len(), 1);
        assert_eq!(table.by_id(1), Some("b"));

        Ok(())
    }

    #[test]
    fn read_entries_sharing_one_offset() -> Result<()> {
        #[rustfmt::skip]
        let input = Cursor::new(vec![
            0x02, 0x00, 0x00, 0x00,
            0x04, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x64, 0x75, 0x70, 0x00,
        ]);

        let table = StringTable::read(input, Variant::Strings)?;

        assert_eq!(table.len(), 2);
        assert_eq!(table.by_id(1), Some("dup"));
        assert_eq!(table.by_id(2), Some("dup"));

        Ok(())
    }

    #[test]
    fn read_windows_1252_text() -> Result<()> {
        #[rustfmt::skip]
        let input = Cursor::new(vec![
            0x01, 0x00, 0x00, 0x00,
            0x05, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            // "café" in windows-1252
            0x63, 0x61, 0x66, 0xE9, 0x00,
        ]);

        let table = StringTable::read(input, Variant::Strings)?;

        assert_eq!(table.by_id(1), Some("café"));

        Ok(())
    }

    #[test]
    fn read_offset_out_of_range() {
        #[rustfmt::skip]
        let input = Cursor::new(vec![
            0x01, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00, 0x09, 0x00, 0x00, 0x00,
            0x61, 0x00,
        ]);

        let table = StringTable::read(input, Variant::Strings);
        assert!(matches!(table.err(), Some(Error::InvalidTable)));
    }

    #[test]
    fn read_missing_terminator() {
        #[rustfmt::skip]
        let input = Cursor::new(vec![
            0x01, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x61, 0x62,
        ]);

        let table = StringTable::read(input, Variant::Strings);
        assert!(matches!(table.err(), Some(Error::InvalidTable)));
    }

    #[test]
    fn read_zero_length_prefix() {
        #[rustfmt::skip]
        let input = Cursor::new(vec![
            0x01, 0x00, 0x00, 0x00,
            0x04, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
        ]);

        let table = StringTable::read(input, Variant::IlStrings);
        assert!(matches!(table.err(), Some(Error::InvalidTable)));
    }

    #[test]
    fn read_truncated_blob() {
        #[rustfmt::skip]
        let input = Cursor::new(vec![
            0x01, 0x00, 0x00, 0x00,
            0x10, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x61, 0x00,
        ]);

        let table = StringTable::read(input, Variant::Strings);
        assert!(matches!(table.err(), Some(Error::InvalidTable)));
    }
}
