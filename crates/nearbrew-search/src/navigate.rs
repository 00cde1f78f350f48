//! Driving-directions hand-off.
//!
//! The pipeline never launches navigation itself. It builds the payload,
//! an OpenStreetMap directions link routed with the car profile, and the
//! presentation layer decides what to do with it.

use nearbrew_core::Coordinate;

const DIRECTIONS_ENDPOINT: &str = "https://www.openstreetmap.org/directions";

/// Routing engine hint: the OSRM car profile, i.e. driving directions.
const CAR_ENGINE: &str = "fossgis_osrm_car";

/// Builds a driving-directions URL to `destination`.
///
/// The route's starting point is left blank for the navigation frontend
/// to fill with the user's own position.
#[must_use]
pub fn directions_url(destination: Coordinate, name: &str) -> String {
    tracing::debug!(place = name, %destination, "building directions hand-off");
    // The route parameter is "from;to" with the origin left blank; ';'
    // and ',' are percent-encoded the way the OSM frontend writes them.
    format!(
        "{DIRECTIONS_ENDPOINT}?engine={CAR_ENGINE}&route=%3B{}%2C{}",
        destination.latitude, destination.longitude
    )
}
