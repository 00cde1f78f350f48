//! Device location access with a bounded wait for the first fix.
//!
//! Platform location backends are callback-shaped and push fixes whenever
//! they feel like it. [`LocationService`] models that push side as an
//! event stream, and [`LocationProvider`] layers the pull side on top: a
//! cached last-known coordinate plus [`LocationProvider::acquire_fix`],
//! which turns "request a fix and hope" into a future that resolves with
//! the first fix or gives up after a deadline.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use nearbrew_core::Coordinate;

/// Whether the user has allowed this program to read the device location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationState {
    /// The user has not been asked yet, or the platform cannot say.
    NotDetermined,
    /// Location access is granted.
    Authorized,
    /// Location access is denied or restricted.
    Denied,
}

impl std::fmt::Display for AuthorizationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::NotDetermined => "not determined",
            Self::Authorized => "authorized",
            Self::Denied => "denied",
        };
        f.write_str(text)
    }
}

/// One push from the location backend.
#[derive(Debug, Clone)]
pub enum LocationEvent {
    /// The user granted or revoked access.
    AuthorizationChanged(AuthorizationState),
    /// A position fix arrived.
    FixReceived(Coordinate),
    /// The backend tried for a fix and gave up.
    FixFailed(String),
}

/// A source of device location events.
///
/// Implementations wrap whatever the host platform offers. `request_fix`
/// must not block: the answer comes back through the event stream, never
/// through the call itself.
pub trait LocationService: Send + Sync {
    /// Asks the backend to produce a fix. Fire and forget.
    fn request_fix(&self);

    /// Current authorization as the backend reports it.
    fn authorization(&self) -> AuthorizationState;

    /// Subscribes to the backend's event stream.
    fn subscribe(&self) -> broadcast::Receiver<LocationEvent>;
}

/// Why a location fix could not be produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// The user has denied location access.
    #[error("location access is denied")]
    PermissionDenied,

    /// No fix event arrived before the deadline.
    #[error("no location fix within {waited_ms} ms")]
    FixTimeout { waited_ms: u64 },

    /// The backend reported that it could not produce a fix.
    #[error("location fix failed: {0}")]
    FixFailed(String),

    /// The backend's event stream closed.
    #[error("location service stopped")]
    ServiceStopped,
}

/// Pull-shaped access to a push-shaped [`LocationService`].
///
/// Keeps the most recent fix cached for the provider's whole lifetime, so
/// a fix that arrives after a caller stopped waiting still benefits the
/// next search.
pub struct LocationProvider {
    service: Arc<dyn LocationService>,
    last_known: Arc<RwLock<Option<Coordinate>>>,
}

impl LocationProvider {
    /// Wraps a service and starts the background listener that keeps the
    /// last-known coordinate fresh. Must be called inside a Tokio runtime.
    ///
    /// The listener runs until the service drops its event channel.
    #[must_use]
    pub fn new(service: Arc<dyn LocationService>) -> Self {
        let last_known = Arc::new(RwLock::new(None));
        let cache = Arc::clone(&last_known);
        let mut events = service.subscribe();

        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(LocationEvent::FixReceived(coordinate)) => {
                        *cache.write().unwrap() = Some(coordinate);
                        tracing::debug!(%coordinate, "location fix recorded");
                    }
                    Ok(LocationEvent::FixFailed(reason)) => {
                        tracing::warn!(%reason, "location fix failed");
                    }
                    Ok(LocationEvent::AuthorizationChanged(state)) => {
                        tracing::info!(%state, "location authorization changed");
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "location event stream lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        Self {
            service,
            last_known,
        }
    }

    /// The most recent fix seen over the provider's lifetime, if any.
    #[must_use]
    pub fn last_known(&self) -> Option<Coordinate> {
        *self.last_known.read().unwrap()
    }

    /// Current authorization as the backend reports it.
    #[must_use]
    pub fn authorization(&self) -> AuthorizationState {
        self.service.authorization()
    }

    /// Requests a fresh fix and waits for the first fix event, bounded
    /// by `wait`.
    ///
    /// The wait is best effort: timing out does not cancel the underlying
    /// request, and a fix that lands later still updates the last-known
    /// coordinate through the background listener.
    ///
    /// # Errors
    ///
    /// - [`LocationError::PermissionDenied`] immediately when access is
    ///   already denied, or when a denial arrives mid-wait.
    /// - [`LocationError::FixFailed`] when the backend reports failure.
    /// - [`LocationError::FixTimeout`] when nothing arrives in time.
    /// - [`LocationError::ServiceStopped`] when the event stream closes.
    pub async fn acquire_fix(&self, wait: Duration) -> Result<Coordinate, LocationError> {
        if self.authorization() == AuthorizationState::Denied {
            return Err(LocationError::PermissionDenied);
        }

        // Subscribe before triggering the request so the first fix event
        // cannot slip through between the two calls.
        let mut events = self.service.subscribe();
        self.service.request_fix();

        let deadline = tokio::time::Instant::now() + wait;
        loop {
            let Ok(event) = tokio::time::timeout_at(deadline, events.recv()).await else {
                let waited_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX);
                tracing::debug!(waited_ms, "gave up waiting for a fix");
                return Err(LocationError::FixTimeout { waited_ms });
            };
            match event {
                Ok(LocationEvent::FixReceived(coordinate)) => {
                    // Record eagerly; the background listener will observe
                    // the same event a tick later.
                    *self.last_known.write().unwrap() = Some(coordinate);
                    return Ok(coordinate);
                }
                Ok(LocationEvent::FixFailed(reason)) => {
                    return Err(LocationError::FixFailed(reason));
                }
                Ok(LocationEvent::AuthorizationChanged(AuthorizationState::Denied)) => {
                    return Err(LocationError::PermissionDenied);
                }
                Ok(LocationEvent::AuthorizationChanged(_)) => {}
                Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => return Err(LocationError::ServiceStopped),
            }
        }
    }
}

#[cfg(test)]
#[path = "location_test.rs"]
mod tests;
