//! # String Table Format Documentation
//!
//! This crate provides utilities to read and create the localization string table formats used
//! by Bethesda games. A string table maps numeric string IDs to localized text and comes in
//! three on-disk variants, identified by file extension: `.strings`, `.ilstrings` and
//! `.dlstrings`.
//!
//! ## File Structure
//!
//! A string table consists of a small header, a table of ID/offset entries, and one contiguous
//! blob holding every text payload.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Entry Count            | 4 bytes: The number of entries in this file                |
//! | 0x0004         | Data Size              | 4 bytes: Total size of the text blob in bytes              |
//! | 0x0008         | Entries                | Entry Count × 8 bytes                                      |
//! | next           | Text blob              | Data Size bytes of encoded text                            |
//!
//! ### Entries
//!
//! Each entry is a pair of 4-byte values:
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | String ID              | 4 bytes: Numeric ID of the string                       |
//! | 0x0004         | Offset                 | 4 bytes: Position of the text within the blob           |
//!
//! Several entries may share one offset; identical text is stored once and referenced by every
//! entry that carries it.
//!
//! ### Text Blob
//!
//! Text is encoded with the Windows-1252 code page. How a payload is delimited depends on the
//! variant:
//!
//! - **`.strings`**: the text is NUL terminated; the run of non-zero bytes starting at the
//!   entry's offset is the payload.
//! - **`.ilstrings` / `.dlstrings`**: a 4-byte length field at the entry's offset gives the
//!   payload size *including* one trailing NUL terminator; the text is the following
//!   `length - 1` bytes.
//!
//! ## Additional Information
//!
//! - **File Extensions**: `.strings`, `.ilstrings`, `.dlstrings`
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Text Encoding**: Windows-1252; bytes outside the code page are a hard error, never
//!   silently replaced

pub mod error;
pub mod read;
#[cfg(feature = "serde")]
pub mod serde;
pub mod types;
pub mod write;

pub use types::{StringTable, Variant};
