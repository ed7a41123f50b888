use bgs_strings::{StringTable, Variant};
use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, path::PathBuf};
use tracing::info;

#[derive(Args)]
pub struct ExportArgs {
    /// An input string table file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target JSON file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Table variant, inferred from the file extension when omitted
    #[arg(short, long)]
    variant: Option<Variant>,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ExportArgs {
    pub fn handle(&self) -> Result<()> {
        let table = StringTable::open(&self.file, self.variant)?;
        info!("exporting {} entries", table.len());

        let out = if !self.overwrite {
            File::create_new(&self.output)
                .into_diagnostic()
                .context(format!("creating {}", &self.output.display()))?
        } else {
            File::create(&self.output)
                .into_diagnostic()
                .context(format!("creating {}", &self.output.display()))?
        };

        serde_json::to_writer_pretty(out, &table).into_diagnostic()?;
        Ok(())
    }
}
