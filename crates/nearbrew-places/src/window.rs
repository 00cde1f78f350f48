//! Square search windows for bounded point-of-interest queries.
//!
//! The backend takes a lon/lat viewbox; this module derives one from a
//! center coordinate and a radius in miles. Longitude width widens with
//! latitude so the box spans the same physical distance everywhere.

use nearbrew_core::Coordinate;

const MILES_PER_LAT_DEGREE: f64 = 69.0;

/// A lon/lat rectangle in the order the search backend expects:
/// `left,top,right,bottom` (west, north, east, south).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BoundingBox {
    /// Builds a square window of side `2 * radius_miles` centered on
    /// `center`.
    ///
    /// Edges are clamped to the valid degree ranges, so boxes near the
    /// poles or the antimeridian shrink rather than wrap.
    #[must_use]
    pub fn around(center: Coordinate, radius_miles: f64) -> Self {
        let lat_delta = radius_miles / MILES_PER_LAT_DEGREE;
        let lon_delta =
            radius_miles / (MILES_PER_LAT_DEGREE * center.latitude.to_radians().cos());

        Self {
            left: (center.longitude - lon_delta).clamp(-180.0, 180.0),
            top: (center.latitude + lat_delta).clamp(-90.0, 90.0),
            right: (center.longitude + lon_delta).clamp(-180.0, 180.0),
            bottom: (center.latitude - lat_delta).clamp(-90.0, 90.0),
        }
    }

    /// Formats the box as the backend's `viewbox` query value.
    #[must_use]
    pub fn viewbox_param(&self) -> String {
        format!("{},{},{},{}", self.left, self.top, self.right, self.bottom)
    }
}
