//! Search run status and its user-facing narrative.

use std::fmt;

use serde::Serialize;

use crate::{MAX_RADIUS_MILES, SEARCH_CATEGORY};

/// Phase of the current search run, published with every snapshot.
///
/// A run moves `ResolvingOrigin` to `Searching` to one of the three
/// terminal states; `Idle` means no run's results are on display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum SearchStatus {
    /// No search underway and no results on display.
    #[default]
    Idle,
    /// Deciding which coordinate to search from.
    ResolvingOrigin,
    /// Origin known; the points-of-interest backend is being queried.
    Searching,
    /// Finished with this many places inside the radius.
    Success(usize),
    /// Finished cleanly, but nothing was inside the radius.
    Empty,
    /// The run could not complete; the payload is the human-readable cause.
    Failed(String),
}

impl SearchStatus {
    /// True for states that end a run. Only a new search (or a clear)
    /// moves the published state past a terminal one.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Empty | Self::Failed(_))
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Ready to search."),
            Self::ResolvingOrigin => write!(f, "Working out where to search from..."),
            Self::Searching => {
                write!(f, "Searching for {SEARCH_CATEGORY} within {MAX_RADIUS_MILES} miles...")
            }
            Self::Success(1) => write!(f, "Found 1 {SEARCH_CATEGORY} place nearby."),
            Self::Success(count) => write!(f, "Found {count} {SEARCH_CATEGORY} places nearby."),
            Self::Empty => {
                write!(f, "No {SEARCH_CATEGORY} places within {MAX_RADIUS_MILES} miles.")
            }
            Self::Failed(reason) => write!(f, "Search failed: {reason}"),
        }
    }
}
