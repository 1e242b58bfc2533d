// crates/reviewlink-core/src/provider/google.rs

//! Places API (New) over HTTP.

use super::{LookupRequest, PlacesProvider, ProviderFuture, SearchRequest};
use crate::error::{Error, Result};
use crate::model::{PlaceCandidate, PlaceField};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://places.googleapis.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct GooglePlaces {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl GooglePlaces {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Points the provider at another host (a proxy or a test server).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::InvalidInput("API key is empty".into()));
        }
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("reviewlink/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn search(&self, request: SearchRequest) -> Result<Vec<PlaceCandidate>> {
        let url = format!("{}/v1/places:searchText", self.base_url);
        let body = serde_json::json!({
            "textQuery": request.query,
            "maxResultCount": request.max_results,
        });
        debug!(query = %request.query, max = request.max_results, "places text search");

        let response = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", field_mask(&request.fields, "places."))
            .json(&body)
            .send()
            .await?;

        let body: SearchResponse = read_json(response).await?;
        Ok(body
            .places
            .into_iter()
            .take(request.max_results)
            .map(PlaceCandidate::from)
            .collect())
    }

    async fn lookup(&self, request: LookupRequest) -> Result<PlaceCandidate> {
        let url = format!("{}/v1/places/{}", self.base_url, urlencoding::encode(&request.id));
        debug!(id = %request.id, "places lookup");

        let response = self
            .client
            .get(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", field_mask(&request.fields, ""))
            .send()
            .await?;

        let place: WirePlace = read_json(response).await?;
        Ok(place.into())
    }
}

impl PlacesProvider for GooglePlaces {
    fn text_search(&self, request: SearchRequest) -> ProviderFuture<'_, Vec<PlaceCandidate>> {
        Box::pin(self.search(request))
    }

    fn lookup_by_id(&self, request: LookupRequest) -> ProviderFuture<'_, PlaceCandidate> {
        Box::pin(self.lookup(request))
    }
}

fn field_mask(fields: &[PlaceField], prefix: &str) -> String {
    fields
        .iter()
        .map(|f| format!("{prefix}{}", f.wire_name()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Decodes a success body, or surfaces the provider's own error message.
async fn read_json<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .ok()
            .map(|e| e.error.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("places API returned status {status}"));
        return Err(Error::Provider(message));
    }
    Ok(serde_json::from_str(&text)?)
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    places: Vec<WirePlace>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePlace {
    id: String,
    display_name: Option<LocalizedText>,
    formatted_address: Option<String>,
}

#[derive(Deserialize)]
struct LocalizedText {
    text: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl From<WirePlace> for PlaceCandidate {
    fn from(p: WirePlace) -> Self {
        Self {
            id: p.id,
            display_name: p.display_name.map(|t| t.text),
            formatted_address: p.formatted_address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEFAULT_FIELDS;

    #[test]
    fn search_mask_is_prefixed() {
        assert_eq!(
            field_mask(DEFAULT_FIELDS, "places."),
            "places.id,places.displayName,places.formattedAddress"
        );
        assert_eq!(field_mask(DEFAULT_FIELDS, ""), "id,displayName,formattedAddress");
    }

    #[test]
    fn empty_key_is_rejected() {
        assert!(matches!(
            GooglePlaces::new("  "),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn wire_place_flattens_display_name() {
        let wire: WirePlace = serde_json::from_str(
            r#"{"id":"ChIJ1","displayName":{"text":"Joe's Pizza","languageCode":"en"}}"#,
        )
        .unwrap();
        let candidate = PlaceCandidate::from(wire);
        assert_eq!(candidate.display_name.as_deref(), Some("Joe's Pizza"));
        assert_eq!(candidate.formatted_address, None);
    }
}
