//! This library handles reading from and patching **BA2** general archives used by Bethesda games.
//!
//! # BA2 General Archive Format Documentation
//!
//! This crate provides utilities to read, selectively replace and rewrite entries of the **BA2**
//! archive format used by Bethesda titles to package game assets. Only the *general* archive
//! subtype is handled; specialized subtypes (such as the texture layout) exist in the format
//! family but are rejected by this crate. BA2 files are typically identified with the `.ba2`
//! extension.
//!
//! ## File Structure
//!
//! A BA2 file consists of a header, a table of fixed-size file records, a data region holding the
//! raw entry payloads, and a name table.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: 0x58445442 ("BTDX")                               |
//! | 0x0004         | Version                | 4 bytes: Format version                                    |
//! | 0x0008         | Archive type           | 4 bytes: 0x4C524E47 ("GNRL") for general archives          |
//! | 0x000C         | File count             | 4 bytes: Number of records in the archive                  |
//! | 0x0010         | Names offset           | 8 bytes: Offset of the name table from the start of file   |
//! | 0x0018         | Reserved               | 8 bytes, only present when Version is 2                    |
//!
//! ### Header
//!
//! The BA2 header consists of the following fields:
//!
//! - **Magic Number**: A 4-byte identifier set to `0x58445442`, which is the ASCII code for
//!   "BTDX". This helps identify the file type.
//! - **Version**: A 4-byte unsigned integer representing the version of the BA2 format. Version 2
//!   adds an 8-byte reserved field directly after the header.
//! - **Archive Type**: A 4-byte tag naming the archive subtype. Only `0x4C524E47` ("GNRL") is
//!   handled by this crate.
//! - **File Count**: A 4-byte unsigned integer indicating the number of records in the archive.
//! - **Names Offset**: An 8-byte unsigned integer specifying the offset of the name table from
//!   the beginning of the file.
//!
//! ### File Records
//!
//! After the header (and the reserved field on version 2 archives), the file contains `File
//! Count` fixed-size records describing each stored entry. Each record has the following
//! structure:
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Name hash              | 4 bytes: Hash of the entry's file name                  |
//! | 0x0004         | Extension              | 4 bytes: ASCII extension tag, NUL padded                |
//! | 0x0008         | Directory hash         | 4 bytes: Hash of the entry's directory                  |
//! | 0x000C         | Flags                  | 4 bytes: Per-entry flag bits                            |
//! | 0x0010         | Data offset            | 8 bytes: Offset of the payload from the start of file   |
//! | 0x0018         | Packed size            | 4 bytes: Compressed payload size, 0 when uncompressed   |
//! | 0x001C         | Unpacked size          | 4 bytes: Payload size once unpacked                     |
//! | 0x0020         | Padding                | 4 bytes: Fixed sentinel value 0xBAADF00D                |
//!
//! A nonzero packed size marks a zlib-packed payload. Packed entries are outside the scope of
//! this crate and are rejected wherever their payload would be touched.
//!
//! When this crate rewrites an archive, an 8-byte marker with the fixed value `1` follows the
//! record table, and the data region starts directly after it.
//!
//! ### Data Region
//!
//! The raw payload bytes of every entry, stored contiguously in record order. Each record's data
//! offset points into this region.
//!
//! ### Name Table
//!
//! The name table stores the file path associated with each record, in record order: a 2-byte
//! length followed by that many UTF-8 bytes, with no terminator. Record `i` and name `i` denote
//! the same logical file, an index correspondence this crate preserves across read, replacement
//! and rewrite.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.ba2`
//! - **Endianness**: Little-endian for all multi-byte integers

pub mod compression;
pub mod error;
pub mod read;
pub mod types;
pub mod write;

pub use compression::CompressionKind;
pub use read::Ba2Archive;
pub use write::Ba2Overlay;
