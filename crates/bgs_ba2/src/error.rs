//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// file is an invalid ba2 archive
    #[error("file is an invalid ba2 archive")]
    InvalidArchive,

    /// archive uses a feature outside this library's scope
    #[error("archive uses an unsupported feature")]
    Unsupported(#[from] UnsupportedError),

    /// unable to find requested file
    #[error("unable to find requested file")]
    FileNotFound(#[from] FileNotFoundError),
}

/// Error type for well-formed archives that use a feature this library does not implement
#[derive(Error, Diagnostic, Debug)]
pub enum UnsupportedError {
    /// only general ("GNRL") archives are handled
    #[error("archive type {0:#010x} is not a general archive")]
    ArchiveType(u32),

    /// packed entry payloads cannot be copied or extracted
    #[error("entry {name} is compressed")]
    CompressedData {
        /// name of the offending entry
        name: String,
    },
}

/// Error type to provide further information when a file has not been found
#[derive(Error, Diagnostic, Debug)]
pub enum FileNotFoundError {
    /// at index {0}
    #[error("at index {0}")]
    Index(usize),

    /// by name {0}
    #[error("by name {0}")]
    Name(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
