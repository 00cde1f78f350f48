use crate::app_config::AppConfig;
use crate::types::Coordinate;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64_opt = |var: &str| -> Result<Option<f64>, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .parse::<f64>()
                .map(Some)
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(None),
        }
    };

    let log_level = or_default("NEARBREW_LOG_LEVEL", "info");
    let geocoder_base_url = or_default(
        "NEARBREW_GEOCODER_URL",
        "https://nominatim.openstreetmap.org",
    );
    let places_base_url = or_default(
        "NEARBREW_PLACES_URL",
        "https://nominatim.openstreetmap.org",
    );
    let request_timeout_secs = parse_u64("NEARBREW_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("NEARBREW_USER_AGENT", "nearbrew/0.1 (coffee-search)");
    let fix_wait_ms = parse_u64("NEARBREW_FIX_WAIT_MS", "500")?;

    let device_location = match (
        parse_f64_opt("NEARBREW_DEVICE_LAT")?,
        parse_f64_opt("NEARBREW_DEVICE_LON")?,
    ) {
        (Some(lat), Some(lon)) => {
            Some(
                Coordinate::new(lat, lon).map_err(|e| ConfigError::InvalidEnvVar {
                    var: "NEARBREW_DEVICE_LAT/NEARBREW_DEVICE_LON".to_string(),
                    reason: e.to_string(),
                })?,
            )
        }
        (None, None) => None,
        (Some(_), None) => {
            return Err(ConfigError::InvalidEnvVar {
                var: "NEARBREW_DEVICE_LON".to_string(),
                reason: "must be set together with NEARBREW_DEVICE_LAT".to_string(),
            })
        }
        (None, Some(_)) => {
            return Err(ConfigError::InvalidEnvVar {
                var: "NEARBREW_DEVICE_LAT".to_string(),
                reason: "must be set together with NEARBREW_DEVICE_LON".to_string(),
            })
        }
    };

    Ok(AppConfig {
        log_level,
        geocoder_base_url,
        places_base_url,
        request_timeout_secs,
        user_agent,
        fix_wait_ms,
        device_location,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.geocoder_base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(cfg.places_base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(cfg.request_timeout_secs, 10);
        assert_eq!(cfg.user_agent, "nearbrew/0.1 (coffee-search)");
        assert_eq!(cfg.fix_wait_ms, 500);
        assert!(cfg.device_location.is_none());
    }

    #[test]
    fn build_app_config_honors_overrides() {
        let mut map = HashMap::new();
        map.insert("NEARBREW_LOG_LEVEL", "debug");
        map.insert("NEARBREW_GEOCODER_URL", "http://localhost:8080");
        map.insert("NEARBREW_PLACES_URL", "http://localhost:8081");
        map.insert("NEARBREW_REQUEST_TIMEOUT_SECS", "30");
        map.insert("NEARBREW_USER_AGENT", "custom-agent/2.0");
        map.insert("NEARBREW_FIX_WAIT_MS", "750");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.geocoder_base_url, "http://localhost:8080");
        assert_eq!(cfg.places_base_url, "http://localhost:8081");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "custom-agent/2.0");
        assert_eq!(cfg.fix_wait_ms, 750);
    }

    #[test]
    fn build_app_config_fails_with_invalid_timeout() {
        let mut map = HashMap::new();
        map.insert("NEARBREW_REQUEST_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEARBREW_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(NEARBREW_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_fix_wait() {
        let mut map = HashMap::new();
        map.insert("NEARBREW_FIX_WAIT_MS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEARBREW_FIX_WAIT_MS"),
            "expected InvalidEnvVar(NEARBREW_FIX_WAIT_MS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_reads_device_location_pair() {
        let mut map = HashMap::new();
        map.insert("NEARBREW_DEVICE_LAT", "34.8526");
        map.insert("NEARBREW_DEVICE_LON", "-82.394");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let coord = cfg.device_location.unwrap();
        assert!((coord.latitude - 34.8526).abs() < 1e-9);
        assert!((coord.longitude - -82.394).abs() < 1e-9);
    }

    #[test]
    fn build_app_config_rejects_half_set_device_location() {
        let mut map = HashMap::new();
        map.insert("NEARBREW_DEVICE_LAT", "34.8526");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEARBREW_DEVICE_LON"),
            "expected InvalidEnvVar(NEARBREW_DEVICE_LON), got: {result:?}"
        );

        let mut map = HashMap::new();
        map.insert("NEARBREW_DEVICE_LON", "-82.394");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEARBREW_DEVICE_LAT"),
            "expected InvalidEnvVar(NEARBREW_DEVICE_LAT), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_out_of_range_device_location() {
        let mut map = HashMap::new();
        map.insert("NEARBREW_DEVICE_LAT", "95.0");
        map.insert("NEARBREW_DEVICE_LON", "-82.394");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { .. })),
            "expected InvalidEnvVar, got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_unparsable_device_latitude() {
        let mut map = HashMap::new();
        map.insert("NEARBREW_DEVICE_LAT", "north-a-bit");
        map.insert("NEARBREW_DEVICE_LON", "-82.394");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEARBREW_DEVICE_LAT"),
            "expected InvalidEnvVar(NEARBREW_DEVICE_LAT), got: {result:?}"
        );
    }
}
