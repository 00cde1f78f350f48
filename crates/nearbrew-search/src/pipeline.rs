//! The search orchestrator.
//!
//! One entry point sequences a whole run: pick an origin, query the
//! points-of-interest backend around it, rank by distance, and publish
//! progress after every phase. Runs are serialized by a generation
//! counter rather than a lock: each invocation takes the next generation
//! and the publish guard drops anything a newer run has already
//! overtaken, so the published state can never move backwards.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use uuid::Uuid;

use nearbrew_core::{Coordinate, RankedPlace, SearchOrigin};
use nearbrew_geocode::GeocodeClient;
use nearbrew_places::PlacesClient;

use crate::location::{AuthorizationState, LocationError, LocationProvider};
use crate::rank::rank;
use crate::status::SearchStatus;
use crate::{MAX_RADIUS_MILES, SEARCH_CATEGORY};

/// The area a consumer should recenter its map on: the run's origin plus
/// the fixed search radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchRegion {
    pub center: Coordinate,
    pub radius_miles: f64,
}

/// Everything a consumer needs to render the current search state.
///
/// Published as one value so observers never see a status from one run
/// next to places from another.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchSnapshot {
    /// Which run produced this snapshot. Monotonically increasing.
    pub generation: u64,
    pub status: SearchStatus,
    /// Ranked places, nearest first. Empty outside `Success`.
    pub places: Vec<RankedPlace>,
    /// The place currently highlighted, when any are published.
    pub focused: Option<Uuid>,
    /// Where to recenter the map for this run, once an origin is known.
    pub region: Option<SearchRegion>,
    /// Advisory text raised by origin failures. Replaced wholesale on the
    /// next publish, so consumers show it once and move on.
    pub alert: Option<String>,
}

/// A fatal origin-resolution failure, with the optional advisory that
/// accompanies location troubles.
struct OriginFailure {
    reason: String,
    alert: Option<String>,
}

/// Sequences search runs and publishes their state.
///
/// Cheap to share behind an `Arc`; all methods take `&self` and
/// concurrent runs sort themselves out through the generation guard.
pub struct SearchPipeline {
    geocoder: GeocodeClient,
    places: PlacesClient,
    location: LocationProvider,
    fix_wait: Duration,
    generation: AtomicU64,
    state: watch::Sender<SearchSnapshot>,
}

impl SearchPipeline {
    #[must_use]
    pub fn new(
        geocoder: GeocodeClient,
        places: PlacesClient,
        location: LocationProvider,
        fix_wait: Duration,
    ) -> Self {
        let (state, _) = watch::channel(SearchSnapshot::default());
        Self {
            geocoder,
            places,
            location,
            fix_wait,
            generation: AtomicU64::new(0),
            state,
        }
    }

    /// Subscribes to published snapshots. The receiver starts with the
    /// current snapshot already marked seen.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.state.subscribe()
    }

    /// The currently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SearchSnapshot {
        self.state.borrow().clone()
    }

    /// Runs one search and returns its terminal status.
    ///
    /// With a non-blank `postal_code` the origin is geocoded from it;
    /// otherwise the device location is used, preferring the last-known
    /// coordinate and falling back to a bounded wait for a fresh fix.
    ///
    /// The run publishes `ResolvingOrigin`, `Searching`, and a terminal
    /// snapshot as it goes. A run started later supersedes this one: the
    /// later run's snapshots win and this run's remaining publishes are
    /// discarded, though its terminal status is still returned to the
    /// direct caller.
    pub async fn run_search(&self, postal_code: Option<&str>) -> SearchStatus {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let postal_code = postal_code.map(str::trim).filter(|code| !code.is_empty());
        tracing::info!(
            generation,
            postal_code = postal_code.unwrap_or("<device>"),
            "starting search run"
        );

        // A new run starts from a clean slate; stale places must not
        // linger next to this run's progress states.
        self.publish(SearchSnapshot {
            generation,
            status: SearchStatus::ResolvingOrigin,
            ..SearchSnapshot::default()
        });

        let origin = match self.resolve_origin(postal_code).await {
            Ok(origin) => origin,
            Err(failure) => {
                let status = SearchStatus::Failed(failure.reason);
                self.publish(SearchSnapshot {
                    generation,
                    status: status.clone(),
                    alert: failure.alert,
                    ..SearchSnapshot::default()
                });
                return status;
            }
        };
        tracing::info!(
            generation,
            origin = %origin.coordinate,
            source = ?origin.source,
            "search origin resolved"
        );

        let region = SearchRegion {
            center: origin.coordinate,
            radius_miles: MAX_RADIUS_MILES,
        };
        self.publish(SearchSnapshot {
            generation,
            status: SearchStatus::Searching,
            region: Some(region),
            ..SearchSnapshot::default()
        });

        let candidates = match self
            .places
            .search(SEARCH_CATEGORY, origin.coordinate, MAX_RADIUS_MILES)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(generation, error = %e, "venue search failed");
                let status = SearchStatus::Failed(e.to_string());
                self.publish(SearchSnapshot {
                    generation,
                    status: status.clone(),
                    region: Some(region),
                    ..SearchSnapshot::default()
                });
                return status;
            }
        };

        // Distances are measured from the device's true position whenever
        // one is known, even for postal-code searches; the geocoded origin
        // is only the fallback reference.
        let reference = self.location.last_known().unwrap_or(origin.coordinate);
        let places = rank(&candidates, reference, MAX_RADIUS_MILES);

        let status = if places.is_empty() {
            SearchStatus::Empty
        } else {
            SearchStatus::Success(places.len())
        };
        let focused = places.first().map(|place| place.id);
        tracing::info!(generation, status = %status, "search run finished");
        self.publish(SearchSnapshot {
            generation,
            status: status.clone(),
            places,
            focused,
            region: Some(region),
            alert: None,
        });
        status
    }

    /// Resets the published state to `Idle` with an empty result set.
    ///
    /// Takes a fresh generation, so an in-flight run is superseded and
    /// its late snapshots are discarded.
    pub fn clear(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(generation, "clearing search state");
        self.publish(SearchSnapshot {
            generation,
            ..SearchSnapshot::default()
        });
    }

    /// Moves the focused selection to `id`.
    ///
    /// Returns whether the published focus changed; ids not in the
    /// published result set are ignored.
    pub fn focus(&self, id: Uuid) -> bool {
        self.state.send_if_modified(|current| {
            if !current.places.iter().any(|place| place.id == id) {
                tracing::debug!(%id, "ignoring focus on an unpublished place");
                return false;
            }
            if current.focused == Some(id) {
                return false;
            }
            current.focused = Some(id);
            true
        })
    }

    async fn resolve_origin(
        &self,
        postal_code: Option<&str>,
    ) -> Result<SearchOrigin, OriginFailure> {
        if let Some(code) = postal_code {
            return match self.geocoder.resolve(code).await {
                Ok(coordinate) => Ok(SearchOrigin::from_postal_code(coordinate)),
                Err(e) => {
                    tracing::warn!(postal_code = code, error = %e, "postal code did not resolve");
                    Err(OriginFailure {
                        reason: e.to_string(),
                        alert: None,
                    })
                }
            };
        }

        if let Some(coordinate) = self.location.last_known() {
            tracing::debug!(%coordinate, "using last known device location");
            return Ok(SearchOrigin::from_device(coordinate));
        }

        match self.location.acquire_fix(self.fix_wait).await {
            Ok(coordinate) => Ok(SearchOrigin::from_device(coordinate)),
            Err(e) => {
                tracing::warn!(error = %e, "no usable search origin");
                Err(OriginFailure {
                    reason: format!("no search origin: {e}"),
                    alert: Some(origin_alert(&e, self.location.authorization())),
                })
            }
        }
    }

    /// Publishes a snapshot unless a newer run already owns the state.
    ///
    /// The generation comparison happens inside the watch channel's
    /// closure, so a superseded run can never slip in between the check
    /// and the write.
    fn publish(&self, snapshot: SearchSnapshot) {
        self.state.send_if_modified(|current| {
            if snapshot.generation < current.generation {
                tracing::debug!(
                    stale = snapshot.generation,
                    current = current.generation,
                    "discarding snapshot from a superseded run"
                );
                return false;
            }
            *current = snapshot;
            true
        });
    }
}

/// Advisory text shown when no search origin could be found without a
/// postal code. Worded per authorization state, since what the user can
/// do about it differs.
fn origin_alert(error: &LocationError, authorization: AuthorizationState) -> String {
    match (error, authorization) {
        (LocationError::PermissionDenied, _) | (_, AuthorizationState::Denied) => {
            "Location access is denied. Enable location access or search by postal code."
                .to_string()
        }
        (_, AuthorizationState::NotDetermined) => {
            "Couldn't determine your location. Enter a postal code to search.".to_string()
        }
        (_, AuthorizationState::Authorized) => {
            "Couldn't get a location fix. Try again or enter a postal code.".to_string()
        }
    }
}
