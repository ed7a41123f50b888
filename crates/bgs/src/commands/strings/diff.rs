use bgs_strings::{StringTable, Variant};
use clap::{Args, ValueEnum};
use itertools::Itertools;
use miette::Result;
use owo_colors::OwoColorize;
use similar::{ChangeTag, TextDiff};
use std::path::PathBuf;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Report which IDs were added, removed or changed
    #[default]
    Summary,
    /// Include an inline diff of each changed text
    Full,
}

#[derive(Args)]
pub struct DiffArgs {
    /// An input string table file
    #[arg(short, long, value_name = "FILE")]
    left: PathBuf,

    /// An input string table file
    #[arg(short, long, value_name = "FILE")]
    right: PathBuf,

    /// Table variant, inferred from the file extensions when omitted
    #[arg(long)]
    variant: Option<Variant>,

    /// Comparison mode
    #[arg(short, long, value_enum, default_value_t = Mode::Summary)]
    mode: Mode,
}

impl DiffArgs {
    pub fn handle(&self) -> Result<()> {
        let left = StringTable::open(&self.left, self.variant)?;
        let right = StringTable::open(&self.right, self.variant)?;

        for id in right
            .keys()
            .filter(|id| !left.contains_key(*id))
            .copied()
            .sorted()
        {
            let line = format!("{id}: {}", right.by_id(id).unwrap_or_default());
            println!("✅ {}", line.green());
        }

        for id in left
            .keys()
            .filter(|id| !right.contains_key(*id))
            .copied()
            .sorted()
        {
            let line = format!("{id}: {}", left.by_id(id).unwrap_or_default());
            println!("❌ {}", line.red());
        }

        for id in left
            .keys()
            .filter(|id| right.contains_key(*id))
            .copied()
            .sorted()
        {
            let old = left.by_id(id).unwrap_or_default();
            let new = right.by_id(id).unwrap_or_default();
            if old == new {
                continue;
            }

            println!("🔃 {}", id.blue());

            if self.mode == Mode::Full {
                let diff = TextDiff::from_lines(old, new);
                for op in diff.ops() {
                    for change in diff.iter_inline_changes(op) {
                        let mut line = String::new();
                        for (emphasized, value) in change.iter_strings_lossy() {
                            if emphasized {
                                if change.tag() == ChangeTag::Insert {
                                    line.push_str(&format!("{}", value.green().underline()));
                                } else {
                                    line.push_str(&format!("{}", value.red().underline()));
                                }
                            } else {
                                line.push_str(&format!("{}", value.dimmed()));
                            }
                        }
                        print!("  {}", line);
                        if !line.ends_with('\n') {
                            println!();
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
