use crate::types::Coordinate;

/// Runtime configuration for the nearbrew binaries, loaded from
/// environment variables by [`crate::load_app_config`].
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub log_level: String,
    pub geocoder_base_url: String,
    pub places_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Bounded wait for a device location fix, in milliseconds.
    pub fix_wait_ms: u64,
    /// Stand-in device position for hosts without a real location
    /// service. `None` means fix requests will report failure.
    pub device_location: Option<Coordinate>,
}
