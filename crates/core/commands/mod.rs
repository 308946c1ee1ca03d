pub(crate) mod search;

use search::SearchCommands;

use crate::app;

use clap::Subcommand;
use log::trace;

#[derive(Subcommand)]
#[non_exhaustive]
pub enum Commands {
    /// Search the public book catalog
    #[clap(arg_required_else_help = true)]
    Search {
        #[clap(subcommand)]
        command: SearchCommands,
    },

    /// Fetch the raw volume record for an ISBN
    ///
    /// The record comes from a separate volume lookup service than the search
    /// commands and is printed as-is rather than interpreted.
    #[clap(arg_required_else_help = true)]
    Volume {
        /// The ISBN of the volume record, hyphens are ignored
        isbn: String,
    },

    /// Start an interactive session with an in-memory review shelf
    ///
    /// Registered users and their reviews live only for the lifetime of the
    /// session.
    Shell,
}

impl Commands {
    pub fn execute(self) -> eyre::Result<String> {
        match self {
            Commands::Search { command } => command.execute(),
            Commands::Volume { isbn } => {
                trace!("Fetching the volume record for '{isbn}'..");
                let record = shelf::volume_record_by_isbn(&isbn)?;
                Ok(render_record(&record))
            }
            Commands::Shell => app::run_shell(),
        }
    }
}

fn render_record(record: &str) -> String {
    // the record is opaque JSON, pretty-print it when possible
    serde_json::from_str::<serde_json::Value>(record)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| record.to_owned())
}
