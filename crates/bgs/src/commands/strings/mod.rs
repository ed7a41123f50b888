pub mod diff;
pub mod export;
pub mod import;
pub mod list;

#[derive(clap::Subcommand)]
pub enum StringsCommands {
    /// Print the entries of a string table file
    List(list::ListArgs),
    /// Export a string table file to JSON
    Export(export::ExportArgs),
    /// Build a string table file from exported JSON
    Import(import::ImportArgs),
    /// Compare two string table files
    Diff(diff::DiffArgs),
}

impl StringsCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            StringsCommands::List(list) => list.handle(),
            StringsCommands::Export(export) => export.handle(),
            StringsCommands::Import(import) => import.handle(),
            StringsCommands::Diff(diff) => diff.handle(),
        }
    }
}
