use std::io::{Cursor, Read, Seek};

use bgs_ba2::error::Result;
use bgs_ba2::Ba2Archive;
use tracing_test::traced_test;

const GENERAL_ARCHIVE: u32 = 0x4C52_4E47;
const RECORD_PADDING: u32 = 0xBAAD_F00D;

/// Assemble a version 1 general archive from scratch, laid out the same way
/// the library writes one: header, records, marker, data, names.
fn build_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let data_start = 24 + 32 * entries.len() + 8;

    let mut data = Vec::new();
    let mut records = Vec::new();
    for (name, payload) in entries {
        let offset = (data_start + data.len()) as u64;
        records.extend_from_slice(&0u32.to_le_bytes());
        let mut extension = [0u8; 4];
        let ext = name.rsplit('.').next().unwrap_or("");
        extension[..ext.len().min(4)].copy_from_slice(&ext.as_bytes()[..ext.len().min(4)]);
        records.extend_from_slice(&extension);
        records.extend_from_slice(&0u32.to_le_bytes());
        records.extend_from_slice(&0u32.to_le_bytes());
        records.extend_from_slice(&offset.to_le_bytes());
        records.extend_from_slice(&0u32.to_le_bytes());
        records.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        records.extend_from_slice(&RECORD_PADDING.to_le_bytes());
        data.extend_from_slice(payload);
    }

    let names_offset = (data_start + data.len()) as u64;

    let mut archive = Vec::new();
    archive.extend_from_slice(b"BTDX");
    archive.extend_from_slice(&1u32.to_le_bytes());
    archive.extend_from_slice(&GENERAL_ARCHIVE.to_le_bytes());
    archive.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    archive.extend_from_slice(&names_offset.to_le_bytes());
    archive.extend_from_slice(&records);
    archive.extend_from_slice(&1u64.to_le_bytes());
    archive.extend_from_slice(&data);
    for (name, _) in entries {
        archive.extend_from_slice(&(name.len() as u16).to_le_bytes());
        archive.extend_from_slice(name.as_bytes());
    }

    archive
}

fn entry_bytes<R: Read + Seek>(archive: &mut Ba2Archive<R>, index: usize) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut entry = archive.by_index(index)?;
    entry.read_to_end(&mut buffer)?;
    Ok(buffer)
}

#[traced_test]
#[test]
fn rewrite_without_replacements_preserves_everything() -> Result<()> {
    let input = build_archive(&[
        ("interface/fonts_en.gfx", b"font data"),
        ("interface/translate_en.txt", b"DIALOGUE\tHello"),
        ("textures/ui/icon.dds", b"DDS \x00\x01\x02\x03"),
    ]);

    let mut original = Ba2Archive::new(Cursor::new(input))?;
    let mut rewritten = original.write_to(Cursor::new(Vec::new()))?;

    rewritten.rewind()?;
    let mut reloaded = Ba2Archive::new(rewritten)?;

    assert_eq!(original.len(), reloaded.len());
    assert_eq!(
        original.file_names().collect::<Vec<_>>(),
        reloaded.file_names().collect::<Vec<_>>()
    );

    for index in 0..original.len() {
        assert_eq!(
            original.record(index).map(|r| r.unpacked_size),
            reloaded.record(index).map(|r| r.unpacked_size)
        );
        assert_eq!(
            entry_bytes(&mut original, index)?,
            entry_bytes(&mut reloaded, index)?
        );
    }

    Ok(())
}

#[traced_test]
#[test]
fn rewrite_substitutes_only_replaced_entries() -> Result<()> {
    let input = build_archive(&[
        ("interface/fonts_en.gfx", b"font data"),
        ("interface/translate_en.txt", b"DIALOGUE\tHello"),
        ("textures/ui/icon.dds", b"DDS \x00\x01\x02\x03"),
    ]);

    let replacement: &[u8] = b"DIALOGUE\tGoodbye, and thanks for all the fish";

    let mut original = Ba2Archive::new(Cursor::new(input))?;
    original.replace_file("interface/translate_en.txt", replacement.to_vec());

    let mut rewritten = original.write_to(Cursor::new(Vec::new()))?;
    rewritten.rewind()?;
    let mut reloaded = Ba2Archive::new(rewritten)?;

    // Record order is never reshuffled by a rewrite.
    assert_eq!(
        reloaded.file_names().collect::<Vec<_>>(),
        vec![
            "interface/fonts_en.gfx",
            "interface/translate_en.txt",
            "textures/ui/icon.dds",
        ]
    );

    assert_eq!(entry_bytes(&mut reloaded, 0)?, b"font data");
    assert_eq!(entry_bytes(&mut reloaded, 1)?, replacement);
    assert_eq!(entry_bytes(&mut reloaded, 2)?, b"DDS \x00\x01\x02\x03");

    // The replacement is stored uncompressed with its own length.
    let record = reloaded.record(1).copied().unwrap();
    assert_eq!(record.packed_size, 0);
    assert_eq!(record.unpacked_size, replacement.len() as u32);

    Ok(())
}

#[traced_test]
#[test]
fn rewrite_survives_a_second_pass() -> Result<()> {
    let input = build_archive(&[("a.txt", b"alpha"), ("b.txt", b"beta")]);

    let mut first = Ba2Archive::new(Cursor::new(input))?;
    first.replace_file("a.txt", b"gamma".to_vec());

    let mut once = first.write_to(Cursor::new(Vec::new()))?;
    once.rewind()?;

    // A patched archive is a valid source for another patch round.
    let mut second = Ba2Archive::new(once)?;
    second.replace_file("b.txt", b"delta".to_vec());

    let mut twice = second.write_to(Cursor::new(Vec::new()))?;
    twice.rewind()?;
    let mut reloaded = Ba2Archive::new(twice)?;

    assert_eq!(entry_bytes(&mut reloaded, 0)?, b"gamma");
    assert_eq!(entry_bytes(&mut reloaded, 1)?, b"delta");

    Ok(())
}

#[traced_test]
#[test]
fn extract_all_writes_every_entry() -> Result<()> {
    let input = build_archive(&[
        ("interface/fonts_en.gfx", b"font data"),
        ("interface/translate_en.txt", b"DIALOGUE\tHello"),
    ]);

    let target = std::env::temp_dir().join(format!("bgs_ba2_extract_{}", std::process::id()));

    let mut archive = Ba2Archive::new(Cursor::new(input))?;
    archive.extract_all(&target)?;

    let fonts = std::fs::read(target.join("interface/fonts_en.gfx"))?;
    let translate = std::fs::read(target.join("interface/translate_en.txt"))?;
    std::fs::remove_dir_all(&target)?;

    assert_eq!(fonts, b"font data");
    assert_eq!(translate, b"DIALOGUE\tHello");

    Ok(())
}
