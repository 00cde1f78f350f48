use nearbrew_core::Coordinate;
use serde::Deserialize;

/// One placemark row from the geocoding backend.
///
/// The backend serializes coordinates as strings, so parsing and range
/// validation happen in [`Placemark::coordinate`] rather than in serde.
#[derive(Debug, Clone, Deserialize)]
pub struct Placemark {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Placemark {
    /// Parses the string lat/lon pair into a validated coordinate.
    ///
    /// Returns `None` when either component fails to parse or falls
    /// outside the valid degree range.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        let latitude = self.lat.parse::<f64>().ok()?;
        let longitude = self.lon.parse::<f64>().ok()?;
        Coordinate::new(latitude, longitude).ok()
    }
}
