pub mod ba2;
pub mod strings;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle BA2 archives
    Ba2 {
        #[command(subcommand)]
        command: ba2::Ba2Commands,
    },
    /// Handle string table files
    Strings {
        #[command(subcommand)]
        command: strings::StringsCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Ba2 { command } => command.handle(),
            Commands::Strings { command } => command.handle(),
        }
    }
}
