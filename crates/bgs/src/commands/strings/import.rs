use bgs_strings::{StringTable, Variant};
use clap::Args;
use indexmap::IndexMap;
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, path::PathBuf};
use tracing::info;

#[derive(Args)]
pub struct ImportArgs {
    /// An input JSON file mapping string IDs to text
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target string table file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Table variant, inferred from the output extension when omitted
    #[arg(short, long)]
    variant: Option<Variant>,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ImportArgs {
    pub fn handle(&self) -> Result<()> {
        let input = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let raw: IndexMap<String, String> = serde_json::from_reader(input)
            .into_diagnostic()
            .context(format!("parsing {}", &self.file.display()))?;

        let variant = match self.variant {
            Some(variant) => variant,
            None => Variant::from_path(&self.output)?,
        };

        let mut table = StringTable::empty(variant);
        for (id, text) in raw {
            let parsed = id
                .parse::<u32>()
                .into_diagnostic()
                .context(format!("string ID {id:?} is not numeric"))?;
            table.insert(parsed, text);
        }
        info!("importing {} entries", table.len());

        let out = if !self.overwrite {
            File::create_new(&self.output)
                .into_diagnostic()
                .context(format!("creating {}", &self.output.display()))?
        } else {
            File::create(&self.output)
                .into_diagnostic()
                .context(format!("creating {}", &self.output.display()))?
        };

        table.write_to(out)?;
        Ok(())
    }
}
