pub mod extract;
pub mod list;
pub mod patch;

#[derive(clap::Subcommand)]
pub enum Ba2Commands {
    /// List the entries of a BA2 file
    List(list::ListArgs),
    /// Extract a BA2 file into a directory
    Extract(extract::ExtractArgs),
    /// Rewrite a BA2 file with entries replaced from a directory
    Patch(patch::PatchArgs),
}

impl Ba2Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Ba2Commands::List(list) => list.handle(),
            Ba2Commands::Extract(extract) => extract.handle(),
            Ba2Commands::Patch(patch) => patch.handle(),
        }
    }
}
