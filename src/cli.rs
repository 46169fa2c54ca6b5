use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Dictionary backend base URL (overrides CEDICT_API_BASE)
    #[arg(long, value_name = "URL", global = true)]
    pub api: Option<String>,

    /// Local store file (overrides CEDICT_STORE_PATH)
    #[arg(long, value_name = "FILE", global = true)]
    pub store: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Look up a word and show related news on an exact match
    Lookup {
        #[arg(value_name = "WORD", required = true, num_args = 1..)]
        word: Vec<String>,

        /// Print HTML fragments instead of text
        #[arg(long)]
        html: bool,
    },

    /// Show news related to a query
    News {
        #[arg(value_name = "QUERY", required = true, num_args = 1..)]
        query: Vec<String>,

        /// Number of items to request
        #[arg(short, long)]
        count: Option<usize>,

        #[arg(long)]
        html: bool,
    },

    /// Search as you type, reading input lines from stdin
    Interactive {
        #[arg(long)]
        html: bool,
    },

    /// Show or clear the search history
    History {
        #[arg(long)]
        clear: bool,
    },

    /// Show or clear favorite words
    Favorites {
        #[arg(long)]
        clear: bool,
    },

    /// Add a word to favorites, or remove it if already there
    Favorite {
        #[arg(value_name = "WORD")]
        word: String,

        #[arg(short, long, default_value = "")]
        translation: String,
    },

    /// Show, remove or clear saved news cards
    NewsFavorites {
        #[arg(long)]
        clear: bool,

        /// Remove the saved card with this id
        #[arg(long, value_name = "ID")]
        remove: Option<String>,

        #[arg(long)]
        html: bool,
    },
}
