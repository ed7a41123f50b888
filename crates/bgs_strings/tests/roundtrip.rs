use std::io::{Cursor, Seek};

use bgs_strings::error::Result;
use bgs_strings::{StringTable, Variant};
use tracing_test::traced_test;

fn write_and_reload(table: &StringTable) -> Result<StringTable> {
    let mut written = table.write_to(Cursor::new(Vec::new()))?;
    written.rewind()?;
    StringTable::read(written, table.variant())
}

#[traced_test]
#[test]
fn nul_terminated_round_trip() -> Result<()> {
    let mut table = StringTable::empty(Variant::Strings);
    table.insert(1, "a");
    table.insert(2, "b");

    let reloaded = write_and_reload(&table)?;

    assert_eq!(reloaded, table);
    assert_eq!(
        reloaded.get_entries().keys().collect::<Vec<_>>(),
        vec![&1, &2]
    );

    Ok(())
}

#[traced_test]
#[test]
fn length_prefixed_round_trip() -> Result<()> {
    for variant in [Variant::IlStrings, Variant::DlStrings] {
        let mut table = StringTable::empty(variant);
        table.insert(10, "Ah, mon café préféré");
        table.insert(11, "");
        table.insert(12, "Docked at Niira");

        let reloaded = write_and_reload(&table)?;
        assert_eq!(reloaded, table);
    }

    Ok(())
}

#[traced_test]
#[test]
fn deduplicated_entries_survive_a_round_trip() -> Result<()> {
    let mut table = StringTable::empty(Variant::Strings);
    table.insert(1, "dup");
    table.insert(2, "dup");
    table.insert(3, "unique");

    let reloaded = write_and_reload(&table)?;

    assert_eq!(reloaded.len(), 3);
    assert_eq!(reloaded.by_id(1), Some("dup"));
    assert_eq!(reloaded.by_id(2), Some("dup"));
    assert_eq!(reloaded.by_id(3), Some("unique"));

    Ok(())
}

#[traced_test]
#[test]
fn loaded_entry_order_is_preserved_on_rewrite() -> Result<()> {
    let mut table = StringTable::empty(Variant::Strings);
    table.insert(90, "last id first");
    table.insert(3, "middle");
    table.insert(42, "tail");

    let reloaded = write_and_reload(&table)?;

    assert_eq!(
        reloaded.get_entries().keys().copied().collect::<Vec<_>>(),
        vec![90, 3, 42]
    );

    Ok(())
}

#[traced_test]
#[test]
fn save_and_open_infer_variant_from_extension() -> Result<()> {
    let dir = std::env::temp_dir().join(format!("bgs_strings_io_{}", std::process::id()));
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("starfield_en.strings");

    let mut table = StringTable::empty(Variant::Strings);
    table.insert(5, "New Atlantis");
    table.save(&path)?;

    let reloaded = StringTable::open(&path, None)?;
    std::fs::remove_dir_all(&dir)?;

    assert_eq!(reloaded, table);
    assert_eq!(reloaded.variant(), Variant::Strings);

    Ok(())
}
