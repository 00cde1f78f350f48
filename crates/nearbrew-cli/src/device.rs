//! Stand-in location service for headless hosts.
//!
//! Real deployments would back [`LocationService`] with an OS location
//! API. Here the "device" position comes from configuration, which is
//! enough to exercise the full device-location flow end to end: a
//! configured coordinate answers fix requests, an unconfigured one makes
//! them fail the way a fixless device would.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use nearbrew_core::{AppConfig, Coordinate};
use nearbrew_search::{AuthorizationState, LocationEvent, LocationProvider, LocationService};

/// Event channel capacity; traffic is one event per fix request.
const EVENT_CAPACITY: usize = 16;

pub(crate) struct EnvLocationService {
    device_location: Option<Coordinate>,
    events: broadcast::Sender<LocationEvent>,
}

impl EnvLocationService {
    pub(crate) fn new(device_location: Option<Coordinate>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            device_location,
            events,
        }
    }
}

impl LocationService for EnvLocationService {
    fn request_fix(&self) {
        let event = match self.device_location {
            Some(coordinate) => {
                tracing::debug!(%coordinate, "answering fix request from configuration");
                LocationEvent::FixReceived(coordinate)
            }
            None => LocationEvent::FixFailed("no device location configured".to_string()),
        };
        // No subscribers just means nobody was waiting on this fix.
        let _ = self.events.send(event);
    }

    fn authorization(&self) -> AuthorizationState {
        if self.device_location.is_some() {
            AuthorizationState::Authorized
        } else {
            AuthorizationState::NotDetermined
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<LocationEvent> {
        self.events.subscribe()
    }
}

/// `locate` command: report authorization and one bounded fix attempt.
pub(crate) async fn run_locate(config: &AppConfig) -> anyhow::Result<()> {
    let provider = LocationProvider::new(Arc::new(EnvLocationService::new(
        config.device_location,
    )));

    println!("Authorization: {}", provider.authorization());

    match provider
        .acquire_fix(Duration::from_millis(config.fix_wait_ms))
        .await
    {
        Ok(coordinate) => println!("Device location: {coordinate}"),
        Err(e) => println!("No fix: {e}"),
    }

    Ok(())
}
