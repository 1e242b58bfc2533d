//! Resolve a place from the command line and print its review link.
//!
//! ```text
//! GOOGLE_MAPS_API_KEY=AIza... cargo run --example resolve_place -- "Joe's Pizza, Carmine St"
//! ```

use reviewlink_rs::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let api_key = std::env::var("GOOGLE_MAPS_API_KEY")
        .map_err(|_| Error::InvalidInput("set GOOGLE_MAPS_API_KEY".into()))?;
    let input = std::env::args().skip(1).collect::<Vec<_>>().join(" ");

    let resolver = PlaceResolver::new(GooglePlaces::new(api_key)?);
    match resolver.resolve(&input).await {
        Ok(place) => {
            println!("✓ {} ({})", place.display_name(), place.formatted_address());
            println!("  {}", place.review_url());
        }
        Err(e) if e.is_ambiguity() => println!("✗ {e}"),
        Err(e) => return Err(e),
    }
    Ok(())
}
