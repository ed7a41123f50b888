//! Serialization support for string tables.
//!
//! A table serializes as a flat map with decimal string keys, which keeps the
//! JSON form stable across tooling. The encoding variant is not part of the
//! serialized form; rebuilding a [`StringTable`] from exported data goes
//! through [`StringTable::new`] with a caller-chosen variant.

use serde::{ser::SerializeMap, Serialize};

use crate::types::StringTable;

impl Serialize for StringTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.get_entries().len()))?;
        for (id, text) in self.get_entries() {
            map.serialize_entry(&id.to_string(), text)?;
        }
        map.end()
    }
}
