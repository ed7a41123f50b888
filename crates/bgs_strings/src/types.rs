use derive_more::derive::{Constructor, Deref, Display};
use indexmap::IndexMap;
use std::ffi::OsStr;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

/// On-disk encoding variant of a string table.
///
/// The variant is fixed at construction and decides both how text payloads
/// are delimited in the blob and which file extension the table maps to.
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Variant {
    /// NUL-terminated text, `.strings` files
    #[display("strings")]
    Strings,

    /// Length-prefixed text, `.ilstrings` files
    #[display("ilstrings")]
    IlStrings,

    /// Length-prefixed text, `.dlstrings` files
    #[display("dlstrings")]
    DlStrings,
}

impl Variant {
    /// Map a path to its variant via the file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(OsStr::to_str)
            .unwrap_or_default();
        extension.parse()
    }

    /// File extension conventionally used for this variant
    pub const fn extension(self) -> &'static str {
        match self {
            Variant::Strings => "strings",
            Variant::IlStrings => "ilstrings",
            Variant::DlStrings => "dlstrings",
        }
    }

    /// Whether text payloads carry a leading length field rather than being
    /// scanned to a NUL terminator
    pub const fn has_length_prefix(self) -> bool {
        !matches!(self, Variant::Strings)
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "strings" => Ok(Variant::Strings),
            "ilstrings" => Ok(Variant::IlStrings),
            "dlstrings" => Ok(Variant::DlStrings),
            _ => Err(Error::UnknownExtension(s.to_string())),
        }
    }
}

/// In-memory string table: numeric string IDs mapped to decoded text.
///
/// Entries keep their population order, so a loaded table rewrites with its
/// entry order intact. Inserting an ID twice keeps the latest text at the
/// first occurrence's position.
#[derive(Constructor, Clone, Debug, PartialEq, Eq, Deref)]
pub struct StringTable {
    variant: Variant,
    #[deref]
    entries: IndexMap<u32, String>,
}

impl StringTable {
    /// A table with no entries.
    pub fn empty(variant: Variant) -> Self {
        Self::new(variant, IndexMap::new())
    }

    /// The encoding variant this table was constructed with.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Insert or overwrite the text for `id`, returning the previous text.
    pub fn insert(&mut self, id: u32, text: impl Into<String>) -> Option<String> {
        self.entries.insert(id, text.into())
    }

    /// Remove the entry for `id`, returning its text. Later entries shift up.
    pub fn remove(&mut self, id: u32) -> Option<String> {
        self.entries.shift_remove(&id)
    }

    /// Try to get a reference to an entry's text by its ID
    pub fn by_id(&self, id: u32) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    /// Get a reference to the entries in this table
    pub fn get_entries(&self) -> &IndexMap<u32, String> {
        &self.entries
    }
}
