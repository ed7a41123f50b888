//! Error types that can be emitted from this library
//!

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// File is structurally not a valid string table
    #[error("file is an invalid string table")]
    InvalidTable,

    /// Entry bytes are invalid under the Windows-1252 code page
    #[error("entry {id} at offset {offset} is not valid windows-1252 text")]
    Decode {
        /// ID of the offending entry
        id: u32,
        /// Blob offset the entry points at
        offset: u32,
    },

    /// Entry text has no Windows-1252 representation
    #[error("entry {id} cannot be encoded as windows-1252")]
    Encode {
        /// ID of the offending entry
        id: u32,
    },

    /// The file extension does not map to a known variant
    #[error("unknown string table extension {0:?}")]
    UnknownExtension(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
