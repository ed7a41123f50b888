use bgs_ba2::Ba2Archive;
use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, path::PathBuf};

#[derive(Args)]
pub struct ListArgs {
    /// An input BA2 file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let ba2 = Ba2Archive::new(f)?;

        for index in 0..ba2.len() {
            let Some(record) = ba2.record(index) else {
                continue;
            };
            let name = ba2.name_for_index(index).unwrap_or("<unnamed>");
            println!(
                "{:>12} {:>10} {:>5} {}",
                record.unpacked_size,
                record.compression(),
                record.extension_str(),
                name
            );
        }

        println!(
            "{} entries, {} bytes unpacked",
            ba2.len(),
            ba2.unpacked_size().unwrap_or_default()
        );

        Ok(())
    }
}
