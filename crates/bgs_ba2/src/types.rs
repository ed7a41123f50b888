//! Base types for the structure of a BA2 file.

use binrw::{BinRead, BinWrite};
use std::borrow::Cow;

use crate::compression::CompressionKind;

/// Archive subtype tag for general archives ("GNRL" in ASCII)
pub const GENERAL_ARCHIVE: u32 = 0x4C52_4E47;

/// Sentinel value conventionally stored in a record's padding field
pub const RECORD_PADDING: u32 = 0xBAAD_F00D;

/// Fixed 8-byte value written after the record table
pub const RECORD_TABLE_MARKER: u64 = 1;

/// BA2 file header
///
/// Defines the header of the BA2 file which always starts with "BTDX".
/// All data is stored in little endian format
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
#[brw(magic = b"BTDX", little)]
pub struct Ba2Header {
    /// The format version. Version 2 carries an extra 8-byte reserved field after the header
    pub version: u32,

    /// The archive subtype tag. Only [`GENERAL_ARCHIVE`] is handled by this library
    pub archive_type: u32,

    /// The number of records stored in the file
    pub file_count: u32,

    /// The offset from the beginning of the file where the name table starts
    pub names_offset: u64,
}

impl Ba2Header {
    /// On-disk size of the header, including the magic number
    pub const SIZE: u64 = 24;
}

impl Default for Ba2Header {
    fn default() -> Self {
        Self {
            version: 1,
            archive_type: GENERAL_ARCHIVE,
            file_count: 0,
            names_offset: Self::SIZE,
        }
    }
}

/// BA2 file record
///
/// Defines an entry in the BA2 file. Record `i` describes the same logical
/// file as name `i` of the name table.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct Ba2Record {
    /// Hash of the entry's file name
    pub name_hash: u32,

    /// ASCII extension tag, NUL padded to 4 bytes, no separator
    pub extension: [u8; 4],

    /// Hash of the entry's directory
    pub dir_hash: u32,

    /// Per-entry flag bits
    pub flags: u32,

    /// The offset to the data for this record from the start of the file
    pub offset: u64,

    /// The size of this record's data as stored, or 0 when stored uncompressed
    pub packed_size: u32,

    /// The size of this record's data once unpacked
    pub unpacked_size: u32,

    /// Padding field, conventionally [`RECORD_PADDING`]. Carried verbatim, never validated
    pub padding: u32,
}

impl Ba2Record {
    /// On-disk size of a record
    pub const SIZE: u64 = 32;

    /// Extension tag with the trailing NUL padding stripped
    pub fn extension_str(&self) -> Cow<'_, str> {
        let end = self
            .extension
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.extension.len());
        String::from_utf8_lossy(&self.extension[..end])
    }

    /// How this record's payload is stored
    pub fn compression(&self) -> CompressionKind {
        if self.packed_size == 0 {
            CompressionKind::None
        } else {
            CompressionKind::Zlib
        }
    }
}

impl Default for Ba2Record {
    fn default() -> Self {
        Self {
            name_hash: 0,
            extension: [0; 4],
            dir_hash: 0,
            flags: 0,
            offset: 0,
            packed_size: 0,
            unpacked_size: 0,
            padding: RECORD_PADDING,
        }
    }
}
