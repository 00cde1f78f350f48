//! HTTP client for the postal-code geocoding backend.
//!
//! Wraps `reqwest` around a Nominatim-compatible `/search` endpoint and
//! reduces the response to a single validated coordinate: the first
//! placemark whose lat/lon pair parses and is in range wins.

use std::time::Duration;

use reqwest::{Client, Url};

use nearbrew_core::Coordinate;

use crate::error::GeocodeError;
use crate::types::Placemark;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/";

/// Client for resolving postal codes into coordinates.
///
/// Use [`GeocodeClient::new`] for the production backend or
/// [`GeocodeClient::with_base_url`] to point at a mock server in tests.
pub struct GeocodeClient {
    client: Client,
    search_endpoint: Url,
}

impl GeocodeClient {
    /// Creates a new client pointed at the production geocoding backend.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, GeocodeError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
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
            .map_err(|e| GeocodeError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            search_endpoint,
        })
    }

    /// Resolves a postal code into a coordinate.
    ///
    /// Leading and trailing whitespace is trimmed before the lookup. The
    /// first placemark with a parsable, in-range coordinate is returned;
    /// unusable placemarks are skipped with a warning.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::EmptyPostalCode`] if the trimmed input is empty;
    ///   no request is sent in that case.
    /// - [`GeocodeError::NoMatch`] if the backend returns no usable
    ///   placemark.
    /// - [`GeocodeError::Http`] on network failure.
    /// - [`GeocodeError::UnexpectedStatus`] on a non-2xx response.
    /// - [`GeocodeError::Deserialize`] if the response body does not match
    ///   the expected shape.
    pub async fn resolve(&self, postal_code: &str) -> Result<Coordinate, GeocodeError> {
        let query = postal_code.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyPostalCode);
        }

        let url = self.build_url(&[("postalcode", query), ("format", "jsonv2")]);
        tracing::debug!(postal_code = query, "resolving postal code");

        let placemarks = self.request_placemarks(&url, query).await?;

        for mark in &placemarks {
            if let Some(coord) = mark.coordinate() {
                tracing::debug!(
                    postal_code = query,
                    place = mark.display_name.as_deref().unwrap_or(""),
                    coordinate = %coord,
                    "postal code resolved"
                );
                return Ok(coord);
            }
            tracing::warn!(
                postal_code = query,
                lat = %mark.lat,
                lon = %mark.lon,
                "skipping placemark with unusable coordinate"
            );
        }

        Err(GeocodeError::NoMatch(query.to_string()))
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters appended to the search endpoint.
    fn build_url(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.search_endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body into placemark rows.
    async fn request_placemarks(
        &self,
        url: &Url,
        query: &str,
    ) -> Result<Vec<Placemark>, GeocodeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
            context: format!("placemarks for postal code {query}"),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
