use super::*;

#[test]
fn coordinate_accepts_range_boundaries() {
    for (lat, lon) in [(90.0, 180.0), (-90.0, -180.0), (0.0, 0.0)] {
        let coord = Coordinate::new(lat, lon).unwrap();
        assert_eq!(coord.latitude, lat);
        assert_eq!(coord.longitude, lon);
    }
}

#[test]
fn coordinate_rejects_out_of_range_latitude() {
    let err = Coordinate::new(90.0001, 0.0).unwrap_err();
    assert!(matches!(err, CoordinateError::InvalidLatitude(_)));

    let err = Coordinate::new(-91.0, 0.0).unwrap_err();
    assert!(matches!(err, CoordinateError::InvalidLatitude(_)));
}

#[test]
fn coordinate_rejects_out_of_range_longitude() {
    let err = Coordinate::new(0.0, 180.5).unwrap_err();
    assert!(matches!(err, CoordinateError::InvalidLongitude(_)));

    let err = Coordinate::new(0.0, -200.0).unwrap_err();
    assert!(matches!(err, CoordinateError::InvalidLongitude(_)));
}

#[test]
fn coordinate_rejects_nan() {
    assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    assert!(Coordinate::new(0.0, f64::NAN).is_err());
}

#[test]
fn coordinate_display_is_lat_comma_lon() {
    let coord = Coordinate::new(34.9496, -82.4354).unwrap();
    assert_eq!(coord.to_string(), "34.9496, -82.4354");
}

#[test]
fn search_origin_records_provenance() {
    let coord = Coordinate::new(34.8526, -82.394).unwrap();
    assert_eq!(
        SearchOrigin::from_postal_code(coord).source,
        OriginSource::PostalCode
    );
    assert_eq!(
        SearchOrigin::from_device(coord).source,
        OriginSource::DeviceLocation
    );
}

#[test]
fn format_line_joins_present_parts() {
    let address = AddressParts {
        road: Some("1 Main St".to_string()),
        city: Some("Greenville".to_string()),
        state: Some("SC".to_string()),
        postcode: Some("29601".to_string()),
    };
    assert_eq!(
        address.format_line().as_deref(),
        Some("1 Main St, Greenville, SC")
    );
}

#[test]
fn format_line_skips_missing_and_empty_parts() {
    let address = AddressParts {
        road: None,
        city: Some("Greenville".to_string()),
        state: Some(String::new()),
        postcode: None,
    };
    assert_eq!(address.format_line().as_deref(), Some("Greenville"));
}

#[test]
fn format_line_is_none_when_nothing_usable() {
    assert_eq!(AddressParts::default().format_line(), None);

    let all_empty = AddressParts {
        road: Some(String::new()),
        city: Some(String::new()),
        state: Some(String::new()),
        postcode: None,
    };
    assert_eq!(all_empty.format_line(), None);
}

#[test]
fn ranked_place_serializes_for_json_output() {
    let place = RankedPlace {
        id: Uuid::nil(),
        name: "Methodical Coffee".to_string(),
        coordinate: Coordinate::new(34.8481, -82.3986).unwrap(),
        address_line: Some("101 N Main St, Greenville, SC".to_string()),
        distance_miles: 0.42,
    };
    let json = serde_json::to_value(&place).unwrap();
    assert_eq!(json["name"], "Methodical Coffee");
    assert_eq!(json["distance_miles"], 0.42);
    assert_eq!(json["coordinate"]["latitude"], 34.8481);
}
