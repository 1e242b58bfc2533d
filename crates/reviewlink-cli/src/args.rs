use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for reviewlink
#[derive(Debug, Parser)]
#[command(
    name = "reviewlink",
    version,
    about = "Find a business and print the link to its review page"
)]
pub struct CliArgs {
    /// Places API key (falls back to the key saved with `set-key`)
    #[arg(short = 'k', long = "api-key", env = "GOOGLE_MAPS_API_KEY", global = true)]
    pub api_key: Option<String>,

    /// Path to the JSON store (default: <config dir>/reviewlink/store.json)
    #[arg(short = 's', long = "store", global = true)]
    pub store: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a place link, place id parameter or business name
    Resolve {
        /// e.g. "https://maps.google.com/?place_id=ChIJ..." or "Joe's Pizza, Carmine St"
        input: String,
    },

    /// Print the review link for a known place id
    Link {
        /// Provider place id (e.g. ChIJN1t_tDeuEmsRUsoyG83frY4)
        place_id: String,
    },

    /// Show the last resolved place
    Last,

    /// Save an API key for later runs
    SetKey {
        key: String,
    },

    /// Remove the saved API key
    ForgetKey,
}
