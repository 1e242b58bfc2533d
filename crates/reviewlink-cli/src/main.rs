//! reviewlink — find a business and print its review link
//!
//! Usage examples
//! --------------
//!
//! - Resolve a shared maps link
//!   $ reviewlink resolve "https://maps.google.com/maps/place/Joe's+Pizza/@40.73,-74.00,17z"
//!
//! - Resolve by name (fails with guidance when the name is ambiguous)
//!   $ reviewlink resolve "Joe's Pizza, Carmine St, New York"
//!
//! - Print the link for a known place id
//!   $ reviewlink link ChIJN1t_tDeuEmsRUsoyG83frY4
//!
//! API key
//! -------
//!
//! Taken from `--api-key`, then `GOOGLE_MAPS_API_KEY`, then the key saved
//! with `reviewlink set-key`.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::{anyhow, Context};
use clap::Parser;
use reviewlink_core::prelude::*;
use reviewlink_core::store::KEY_API_KEY;
use reviewlink_cli::FileStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let store_path = args
        .store
        .clone()
        .or_else(FileStore::default_path)
        .ok_or_else(|| anyhow!("no config directory on this platform; pass --store"))?;
    let mut store = FileStore::open(&store_path)?;
    tracing::debug!(path = %store.path().display(), "opened store");

    match args.command {
        Commands::Resolve { input } => {
            let api_key = args
                .api_key
                .filter(|k| !k.trim().is_empty())
                .or_else(|| store.api_key())
                .context("no API key; pass --api-key, set GOOGLE_MAPS_API_KEY or run `reviewlink set-key`")?;

            let resolver = PlaceResolver::new(GooglePlaces::new(api_key)?);
            match resolver.resolve(&input).await {
                Ok(place) => {
                    println!("Name:    {}", place.display_name());
                    println!("Address: {}", place.formatted_address());
                    println!("Place:   {}", place.id());
                    println!("Review:  {}", place.review_url());
                    store.save_last_place(&place)?;
                }
                Err(e) if e.is_ambiguity() => {
                    eprintln!("{e}");
                    std::process::exit(2);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Link { place_id } => {
            println!("{}", review_url(&place_id));
        }

        Commands::Last => match store.last_place() {
            Some(place) => {
                println!("Name:    {}", place.display_name());
                println!("Address: {}", place.formatted_address());
                println!("Review:  {}", place.review_url());
            }
            None => println!("No place resolved yet."),
        },

        Commands::SetKey { key } => {
            if key.trim().is_empty() {
                return Err(anyhow!("refusing to save an empty API key"));
            }
            store.set(KEY_API_KEY, key.trim())?;
            println!("API key saved to {}", store.path().display());
        }

        Commands::ForgetKey => {
            store.remove(KEY_API_KEY)?;
            println!("API key removed.");
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "reviewlink_core=debug,reviewlink=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
