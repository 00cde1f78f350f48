use nearbrew_core::{AddressParts, Candidate, Coordinate};
use serde::Deserialize;

/// One venue row from the points-of-interest backend.
#[derive(Debug, Clone, Deserialize)]
pub struct Venue {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub address: Option<VenueAddress>,
}

/// Structured address fields the backend attaches when asked for
/// address details. Settlements arrive as `city`, `town`, or `village`
/// depending on the place, so conversion picks the first present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenueAddress {
    #[serde(default)]
    pub house_number: Option<String>,
    #[serde(default)]
    pub road: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
}

impl Venue {
    /// Converts the raw row into a domain candidate.
    ///
    /// Rows with unparsable coordinates are kept with `coordinate: None`
    /// so the ranking engine can account for them when it filters.
    #[must_use]
    pub fn into_candidate(self) -> Candidate {
        let coordinate = parse_coordinate(&self.lat, &self.lon);

        // Normalize name: treat empty string as absent. Rows without a
        // bare name fall back to the first display_name segment.
        let name = self
            .name
            .filter(|s| !s.trim().is_empty())
            .or_else(|| first_display_segment(self.display_name.as_deref()));

        let address = self.address.map(VenueAddress::into_parts);

        Candidate {
            name,
            coordinate,
            address,
        }
    }
}

impl VenueAddress {
    fn into_parts(self) -> AddressParts {
        // "101 N Main St" reads better than the components separately.
        let road = match (self.house_number, self.road) {
            (Some(number), Some(road)) => Some(format!("{number} {road}")),
            (None, Some(road)) => Some(road),
            (Some(number), None) => Some(number),
            (None, None) => None,
        };

        let city = self.city.or(self.town).or(self.village);

        AddressParts {
            road,
            city,
            state: self.state,
            postcode: self.postcode,
        }
    }
}

fn parse_coordinate(lat: &str, lon: &str) -> Option<Coordinate> {
    let latitude = lat.parse::<f64>().ok()?;
    let longitude = lon.parse::<f64>().ok()?;
    Coordinate::new(latitude, longitude).ok()
}

fn first_display_segment(display_name: Option<&str>) -> Option<String> {
    display_name
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue(lat: &str, lon: &str) -> Venue {
        Venue {
            lat: lat.to_string(),
            lon: lon.to_string(),
            name: Some("Methodical Coffee".to_string()),
            display_name: None,
            address: None,
        }
    }

    #[test]
    fn into_candidate_parses_coordinate() {
        let candidate = venue("34.8481", "-82.3986").into_candidate();
        let coord = candidate.coordinate.unwrap();
        assert!((coord.latitude - 34.8481).abs() < 1e-9);
        assert!((coord.longitude - -82.3986).abs() < 1e-9);
    }

    #[test]
    fn into_candidate_keeps_rows_with_bad_coordinates() {
        let candidate = venue("garbage", "-82.3986").into_candidate();
        assert!(candidate.coordinate.is_none());
        assert_eq!(candidate.name.as_deref(), Some("Methodical Coffee"));
    }

    #[test]
    fn into_candidate_treats_blank_name_as_absent() {
        let mut v = venue("34.8481", "-82.3986");
        v.name = Some("   ".to_string());
        v.display_name = None;
        assert!(v.into_candidate().name.is_none());
    }

    #[test]
    fn into_candidate_falls_back_to_display_name_segment() {
        let mut v = venue("34.8481", "-82.3986");
        v.name = None;
        v.display_name = Some("Village Grind, 1263 Pendleton St, Greenville".to_string());
        assert_eq!(v.into_candidate().name.as_deref(), Some("Village Grind"));
    }

    #[test]
    fn address_joins_house_number_and_road() {
        let address = VenueAddress {
            house_number: Some("101".to_string()),
            road: Some("N Main St".to_string()),
            city: Some("Greenville".to_string()),
            ..VenueAddress::default()
        };
        let parts = address.into_parts();
        assert_eq!(parts.road.as_deref(), Some("101 N Main St"));
        assert_eq!(parts.city.as_deref(), Some("Greenville"));
    }

    #[test]
    fn address_settlement_falls_back_to_town_then_village() {
        let town_only = VenueAddress {
            town: Some("Travelers Rest".to_string()),
            ..VenueAddress::default()
        };
        assert_eq!(
            town_only.into_parts().city.as_deref(),
            Some("Travelers Rest")
        );

        let village_only = VenueAddress {
            village: Some("Slater-Marietta".to_string()),
            ..VenueAddress::default()
        };
        assert_eq!(
            village_only.into_parts().city.as_deref(),
            Some("Slater-Marietta")
        );
    }
}
