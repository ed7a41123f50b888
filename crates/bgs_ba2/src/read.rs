//! Types for reading BA2 archives
//!

use binrw::BinRead;
use byteorder::{LittleEndian, ReadBytesExt};
use indexmap::IndexMap;
use std::{
    borrow::Cow,
    fmt::{self, Debug},
    fs::{self, File},
    io::{self, Read, Seek, SeekFrom},
    path::Path,
    sync::Arc,
};
use tracing::{info, instrument};

use crate::{
    compression::{Ba2BlockReader, CompressionKind},
    error::{Error, FileNotFoundError, Result, UnsupportedError},
    types::{Ba2Header, Ba2Record, GENERAL_ARCHIVE},
    write::Ba2Overlay,
};

/// A struct for reading an entry from a BA2 file
pub struct Ba2File<'a, R: Read + Seek> {
    data: Cow<'a, Ba2FileData>,
    reader: Ba2BlockReader<'a, R>,
}

impl<'a, R: Read + Seek> Debug for Ba2File<'a, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Ba2File({:#?})", self.get_metadata())
    }
}

/// Methods for retrieving information on BA2 file entries
impl<'a, R: Read + Seek> Ba2File<'a, R> {
    /// Get the name of the file
    ///
    /// # Warnings
    ///
    /// It is dangerous to use this name directly when extracting an archive.
    /// It may contain an absolute path (`/etc/shadow`), or break out of the
    /// current directory (`../runtime`). Carelessly writing to these paths
    /// allows an attacker to craft a BA2 archive that will overwrite critical
    /// files.
    ///
    pub fn name(&self) -> &str {
        &self.get_metadata().file_name
    }

    /// Get the name of the file, in the raw (internal) byte representation.
    ///
    /// These are the exact bytes stored in the name table.
    pub fn name_raw(&self) -> &[u8] {
        &self.get_metadata().file_name_raw
    }

    /// Get the size of the file, in bytes, once unpacked
    pub fn size(&self) -> u64 {
        self.get_metadata().record.unpacked_size as u64
    }

    /// Get the size of the file, in bytes, as stored in the archive. 0 for uncompressed entries
    pub fn packed_size(&self) -> u64 {
        self.get_metadata().record.packed_size as u64
    }

    /// Get the starting offset of the data of the file
    pub fn data_start(&self) -> u64 {
        self.get_metadata().record.offset
    }

    /// Get the storage kind used for this file
    pub fn compression_kind(&self) -> CompressionKind {
        self.get_metadata().record.compression()
    }

    /// Get the on-disk record for this file
    pub fn record(&self) -> &Ba2Record {
        &self.get_metadata().record
    }

    fn get_metadata(&self) -> &Ba2FileData {
        self.data.as_ref()
    }
}

impl<R: Read + Seek> Read for Ba2File<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }
}

/// Structure representing a BA2 file entry.
#[derive(Debug, Clone, Default)]
pub struct Ba2FileData {
    /// On-disk record, carried verbatim so that a rewrite keeps hashes and flags intact
    pub record: Ba2Record,
    /// Name of the file
    pub file_name: Box<str>,
    /// Raw file name. To be used when file_name was incorrectly decoded.
    pub file_name_raw: Box<[u8]>,
}

#[derive(Debug)]
pub(crate) struct Shared {
    pub(crate) header: Ba2Header,
    pub(crate) reserved: Option<u64>,
    pub(crate) files: Vec<Ba2FileData>,
    pub(crate) names: IndexMap<Box<str>, usize>,
}

/// BA2 archive reader
///
/// The source stream stays open for the archive's lifetime so that payload
/// bytes can be copied lazily during extraction or rewrite. Calls on the same
/// archive are not reentrant and must be serialized by the caller.
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn list_ba2_contents(reader: impl Read + Seek) -> bgs_ba2::error::Result<()> {
///     let mut ba2 = bgs_ba2::Ba2Archive::new(reader)?;
///
///     for i in 0..ba2.len() {
///         let mut file = ba2.by_index(i)?;
///         println!("Filename: {}", file.name());
///         std::io::copy(&mut file, &mut std::io::stdout())?;
///     }
///
///     Ok(())
/// }
/// ```
pub struct Ba2Archive<R> {
    pub(crate) reader: R,
    pub(crate) shared: Arc<Shared>,
    pub(crate) overlay: Ba2Overlay,
}

impl<R> Ba2Archive<R> {
    /// Total unpacked size of the files in the archive, if it can be known. Doesn't include
    /// metadata.
    pub fn unpacked_size(&self) -> Option<u128> {
        let mut total = 0u128;
        for file in &self.shared.files {
            total = total.checked_add(file.record.unpacked_size as u128)?;
        }
        Some(total)
    }
}

impl Ba2Archive<File> {
    /// Open an archive file from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ba2Archive::new(File::open(path)?)
    }
}

impl<R: Read + Seek> Ba2Archive<R> {
    /// Read a BA2 archive collecting the records and names it contains.
    ///
    /// Payload bytes are not materialized; the reader is retained and read
    /// lazily when entries are extracted or the archive is rewritten.
    pub fn new(mut reader: R) -> Result<Ba2Archive<R>> {
        let shared = Self::get_metadata(&mut reader)?;

        Ok(Ba2Archive {
            reader,
            shared: shared.into(),
            overlay: Ba2Overlay::new(),
        })
    }

    /// Number of entries contained in this BA2.
    pub fn len(&self) -> usize {
        self.shared.files.len()
    }

    /// Whether this BA2 archive contains no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Format version of the source archive.
    pub fn version(&self) -> u32 {
        self.shared.header.version
    }

    /// Returns an iterator over all the file names in this archive, in record order.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.shared.files.iter().map(|f| &*f.file_name)
    }

    /// Get the index of a file entry by name, if it's present.
    ///
    /// Should an archive carry the same name twice, the first record wins.
    #[inline(always)]
    pub fn index_for_name(&self, name: &str) -> Option<usize> {
        self.shared.names.get(name).copied()
    }

    /// Get the name of a file entry, if it's present.
    #[inline(always)]
    pub fn name_for_index(&self, index: usize) -> Option<&str> {
        self.shared.files.get(index).map(|f| &*f.file_name)
    }

    /// Get the on-disk record of a file entry, if it's present.
    pub fn record(&self, index: usize) -> Option<&Ba2Record> {
        self.shared.files.get(index).map(|f| &f.record)
    }

    /// Search for a file entry by name
    pub fn by_name(&mut self, name: &str) -> Result<Ba2File<'_, R>> {
        let Some(index) = self.shared.names.get(name).copied() else {
            return Err(Error::FileNotFound(FileNotFoundError::Name(
                name.to_owned(),
            )));
        };
        self.by_index(index)
    }

    /// Get a contained file by index
    ///
    /// Fails for entries stored compressed.
    pub fn by_index(&mut self, file_number: usize) -> Result<Ba2File<'_, R>> {
        let data = self
            .shared
            .files
            .get(file_number)
            .ok_or(Error::FileNotFound(FileNotFoundError::Index(file_number)))?;

        Ok(Ba2File {
            data: Cow::Borrowed(data),
            reader: Ba2BlockReader::new(
                &mut self.reader,
                data.record.offset,
                data.record.unpacked_size as u64,
                data.record.compression(),
                &data.file_name,
            )?,
        })
    }

    /// Queue a replacement payload for `name`, applied when the archive is rewritten.
    ///
    /// Replacing the same name twice keeps only the latest payload. The loaded
    /// records and names are never modified; see [`Ba2Overlay`].
    pub fn replace_file(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.overlay.replace_file(name, data);
    }

    /// The replacement payloads queued on this archive.
    pub fn overlay(&self) -> &Ba2Overlay {
        &self.overlay
    }

    /// Mutable access to the queued replacement payloads.
    pub fn overlay_mut(&mut self) -> &mut Ba2Overlay {
        &mut self.overlay
    }

    /// Extract every entry to `directory`, creating intermediate directories as needed.
    #[instrument(skip(self, directory), err)]
    pub fn extract_all(&mut self, directory: impl AsRef<Path>) -> Result<()> {
        let directory = directory.as_ref();
        let shared = Arc::clone(&self.shared);
        for (index, file) in shared.files.iter().enumerate() {
            let destination = directory.join(&*file.file_name);
            info!("writing {}", destination.display());
            self.extract_file(index, destination)?;
        }
        Ok(())
    }

    /// Extract the entry at `index` to `destination`.
    ///
    /// Fails before the destination is created when the entry is stored
    /// compressed or the index is out of range.
    #[instrument(skip(self, destination), err)]
    pub fn extract_file(&mut self, index: usize, destination: impl AsRef<Path>) -> Result<()> {
        let mut entry = self.by_index(index)?;
        let size = entry.size();

        let destination = destination.as_ref();
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut output = File::create(destination)?;
        let copied = io::copy(&mut entry, &mut output)?;
        if copied != size {
            return Err(Error::InvalidArchive);
        }
        Ok(())
    }

    /// Unwrap and return the inner reader object
    ///
    /// The position of the reader is undefined.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn get_names(reader: &mut R, header: &Ba2Header) -> Result<Vec<Vec<u8>>> {
        reader
            .seek(SeekFrom::Start(header.names_offset))
            .map_err(structural)?;

        (0..header.file_count)
            .map(|_| {
                let length = reader.read_u16::<LittleEndian>().map_err(structural)? as usize;
                let mut name_raw = vec![0u8; length];
                reader.read_exact(&mut name_raw).map_err(structural)?;
                Ok(name_raw)
            })
            .collect()
    }

    fn get_metadata(reader: &mut R) -> Result<Shared> {
        let header = Ba2Header::read(reader).map_err(|err| match err {
            binrw::Error::BadMagic { .. } => Error::InvalidArchive,
            err => Error::BinRWError(err),
        })?;

        // Version 2 carries a reserved quadword between header and records.
        // Retained so a rewrite can put it back verbatim.
        let reserved = if header.version == 2 {
            Some(reader.read_u64::<LittleEndian>().map_err(structural)?)
        } else {
            None
        };

        if header.archive_type != GENERAL_ARCHIVE {
            return Err(UnsupportedError::ArchiveType(header.archive_type).into());
        }

        let records = (0..header.file_count)
            .map(|_| Ba2Record::read(&mut *reader).map_err(Error::from))
            .collect::<Result<Vec<_>>>()?;

        let names = Self::get_names(reader, &header)?;

        let mut files = Vec::with_capacity(records.len());
        let mut names_index = IndexMap::with_capacity(records.len());
        for (record, name_raw) in records.into_iter().zip(names) {
            let file = Ba2FileData {
                record,
                file_name: String::from_utf8_lossy(&name_raw).into(),
                file_name_raw: name_raw.into(),
            };
            names_index
                .entry(file.file_name.clone())
                .or_insert(files.len());
            files.push(file);
        }

        Ok(Shared {
            header,
            reserved,
            files,
            names: names_index,
        })
    }
}

fn structural(err: io::Error) -> Error {
    match err.kind() {
        io::ErrorKind::UnexpectedEof => Error::InvalidArchive,
        _ => Error::IOError(err),
    }
}
