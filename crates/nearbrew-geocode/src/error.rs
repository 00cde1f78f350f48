use thiserror::Error;

/// Errors returned by the geocoding client.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The postal code was empty (or only whitespace) after trimming.
    #[error("postal code is empty")]
    EmptyPostalCode,

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx HTTP status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backend returned no usable placemark for the postal code.
    #[error("no location found for postal code '{0}'")]
    NoMatch(String),

    /// The configured base URL could not be parsed.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
