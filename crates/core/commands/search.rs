use clap::Subcommand;
use log::trace;
use shelf::{ErrorKind, Volume};

#[derive(Subcommand)]
#[non_exhaustive]
pub enum SearchCommands {
    /// Search volumes matching a free-text term
    #[clap(arg_required_else_help = true)]
    Keyword {
        /// The text to search volumes by
        term: String,
    },

    /// Search volumes by title
    #[clap(arg_required_else_help = true)]
    Title {
        /// The title to search volumes by
        title: String,
    },

    /// Search volumes by author
    #[clap(arg_required_else_help = true)]
    Author {
        /// The author to search volumes by
        author: String,
    },

    /// Search the volume matching an ISBN
    #[clap(arg_required_else_help = true)]
    Isbn {
        /// The ISBN to search by, hyphens are ignored
        isbn: String,
    },
}

impl SearchCommands {
    pub fn execute(self) -> eyre::Result<String> {
        match self {
            SearchCommands::Keyword { term } => {
                trace!("Searching volumes matching '{term}'..");
                render_volumes(shelf::volumes_by_keyword(&term))
            }
            SearchCommands::Title { title } => {
                trace!("Searching volumes with the title '{title}'..");
                render_volumes(shelf::volumes_by_title(&title))
            }
            SearchCommands::Author { author } => {
                trace!("Searching volumes by the author '{author}'..");
                render_volumes(shelf::volumes_by_author(&author))
            }
            SearchCommands::Isbn { isbn } => {
                trace!("Searching the volume for ISBN '{isbn}'..");
                match shelf::volume_by_isbn(&isbn) {
                    Ok(volume) => Ok(format!("Book found for ISBN {isbn}: {volume}")),
                    Err(err) if err.kind() == ErrorKind::NoValue => {
                        Ok(format!("No books found for ISBN {isbn}."))
                    }
                    Err(err) => Err(err.into()),
                }
            }
        }
    }
}

fn render_volumes(volumes: Result<Vec<Volume>, shelf::Error>) -> eyre::Result<String> {
    match volumes {
        Ok(volumes) => {
            let lines = volumes
                .iter()
                .enumerate()
                .map(|(index, volume)| format!("Book {}: {volume}", index + 1))
                .collect::<Vec<_>>();

            Ok(lines.join("\n"))
        }
        Err(err) if err.kind() == ErrorKind::NoValue => Ok("No books found.".to_owned()),
        Err(err) => Err(err.into()),
    }
}
