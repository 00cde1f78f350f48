//! HTTP client for the points-of-interest search backend.
//!
//! Issues bounded category searches against a Nominatim-compatible
//! `/search` endpoint: a free-text query constrained to a square
//! viewbox derived from a center coordinate and radius. Rows come back
//! as raw [`Venue`]s and are converted to domain candidates here.

use std::time::Duration;

use reqwest::{Client, Url};

use nearbrew_core::{Candidate, Coordinate};

use crate::error::PlacesError;
use crate::types::Venue;
use crate::window::BoundingBox;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/";

/// Maximum rows requested per search. The backend caps at 50 anyway;
/// asking for the cap keeps dense areas from being undersampled.
const RESULT_LIMIT: u32 = 50;

/// Client for bounded point-of-interest searches.
///
/// Use [`PlacesClient::new`] for the production backend or
/// [`PlacesClient::with_base_url`] to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    search_endpoint: Url,
}

impl PlacesClient {
    /// Creates a new client pointed at the production search backend.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // joining the search path appends rather than replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let search_endpoint = Url::parse(&normalised)
            .and_then(|base| base.join("search"))
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            search_endpoint,
        })
    }

    /// Searches for venues matching `query` inside a square window of
    /// side `2 * radius_miles` centered on `center`.
    ///
    /// Returns raw candidates in backend order, including rows whose
    /// coordinates could not be parsed; distance filtering and ordering
    /// are the ranking engine's job.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure.
    /// - [`PlacesError::UnexpectedStatus`] on a non-2xx response.
    /// - [`PlacesError::Deserialize`] if the response body does not match
    ///   the expected shape.
    pub async fn search(
        &self,
        query: &str,
        center: Coordinate,
        radius_miles: f64,
    ) -> Result<Vec<Candidate>, PlacesError> {
        let bbox = BoundingBox::around(center, radius_miles);
        let url = self.build_url(query, &bbox);

        tracing::debug!(query, center = %center, radius_miles, "searching for venues");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let venues: Vec<Venue> =
            serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                context: format!("venues for query '{query}'"),
                source: e,
            })?;

        tracing::debug!(query, count = venues.len(), "venue rows received");

        Ok(venues.into_iter().map(Venue::into_candidate).collect())
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters appended to the search endpoint.
    fn build_url(&self, query: &str, bbox: &BoundingBox) -> Url {
        let mut url = self.search_endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query);
            pairs.append_pair("format", "jsonv2");
            pairs.append_pair("addressdetails", "1");
            pairs.append_pair("limit", &RESULT_LIMIT.to_string());
            pairs.append_pair("viewbox", &bbox.viewbox_param());
            pairs.append_pair("bounded", "1");
        }
        url
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
