use bgs_strings::{StringTable, Variant};
use clap::Args;
use miette::Result;
use std::path::PathBuf;

#[derive(Args)]
pub struct ListArgs {
    /// An input string table file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Table variant, inferred from the file extension when omitted
    #[arg(short, long)]
    variant: Option<Variant>,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let table = StringTable::open(&self.file, self.variant)?;

        for (id, text) in table.get_entries() {
            println!("{id}\t{text}");
        }

        Ok(())
    }
}
