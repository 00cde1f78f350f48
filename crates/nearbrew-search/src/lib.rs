//! Location resolution and the ranked-search pipeline.
//!
//! [`SearchPipeline`] sequences a whole run: resolve an origin (a postal
//! code through the geocoder, or the device's own position), query the
//! points-of-interest backend around it, rank candidates by distance,
//! and publish every state transition through a watch channel. The
//! [`location`] module wraps a pluggable [`LocationService`] with a
//! bounded first-fix-or-timeout wait, and [`rank`] holds the pure
//! distance and ordering pass.

pub mod location;
pub mod navigate;
pub mod pipeline;
pub mod rank;
pub mod status;

pub use location::{
    AuthorizationState, LocationError, LocationEvent, LocationProvider, LocationService,
};
pub use navigate::directions_url;
pub use pipeline::{SearchPipeline, SearchRegion, SearchSnapshot};
pub use rank::{distance_miles, rank, METERS_PER_MILE};
pub use status::SearchStatus;

/// Category term every search uses. The product looks for one kind of
/// place; arbitrary query terms are not part of the surface.
pub const SEARCH_CATEGORY: &str = "coffee";

/// Fixed search radius in miles: the provider-side search window and the
/// hard cap on published distances.
pub const MAX_RADIUS_MILES: f64 = 10.0;
