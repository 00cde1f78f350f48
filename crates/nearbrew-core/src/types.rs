//! Domain types shared across the geocoding, search, and ranking crates.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// A WGS-84 point in decimal degrees.
///
/// Construction through [`Coordinate::new`] guarantees both components
/// are inside their valid degree ranges, so downstream distance math
/// never sees an out-of-range or NaN value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    /// Latitude in degrees, within `[-90, 90]`.
    pub latitude: f64,
    /// Longitude in degrees, within `[-180, 180]`.
    pub longitude: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting values outside the valid ranges.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] when either component is out of range
    /// or not a number.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::InvalidLatitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Validation errors for [`Coordinate::new`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum CoordinateError {
    #[error("invalid latitude {0} (must be between -90 and 90)")]
    InvalidLatitude(f64),
    #[error("invalid longitude {0} (must be between -180 and 180)")]
    InvalidLongitude(f64),
}

/// How the origin of a search run was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OriginSource {
    /// Geocoded from a caller-supplied postal code.
    PostalCode,
    /// Taken from the device's own location fix.
    DeviceLocation,
}

/// The coordinate a search run is centered on, with its provenance.
///
/// Fixed once resolved: a run never re-derives its origin mid-flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchOrigin {
    pub coordinate: Coordinate,
    pub source: OriginSource,
}

impl SearchOrigin {
    pub fn from_postal_code(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            source: OriginSource::PostalCode,
        }
    }

    pub fn from_device(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            source: OriginSource::DeviceLocation,
        }
    }
}

/// Free-form address components attached to a raw candidate.
///
/// Providers differ wildly in what they return, so every field is
/// optional and empty strings are treated as absent when formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddressParts {
    pub road: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
}

impl AddressParts {
    /// Joins road, city, and state into one display line.
    ///
    /// Returns `None` when no non-empty part is available.
    #[must_use]
    pub fn format_line(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.road, &self.city, &self.state]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// A raw, unranked venue returned by the points-of-interest client.
///
/// Rows the provider could not fully describe are kept: a missing
/// coordinate makes the candidate unrankable and the ranking engine
/// discards it there, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: Option<String>,
    pub coordinate: Option<Coordinate>,
    pub address: Option<AddressParts>,
}

/// A candidate after distance computation, filtering, and ordering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlace {
    /// Unique within a single search run; carries no meaning across runs.
    pub id: Uuid,
    pub name: String,
    pub coordinate: Coordinate,
    /// Single formatted address line, when the candidate had any parts.
    pub address_line: Option<String>,
    /// Great-circle distance in miles from the run's reference point.
    pub distance_miles: f64,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
