pub mod client;
pub mod error;
pub mod types;
pub mod window;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use types::{Venue, VenueAddress};
pub use window::BoundingBox;
