//! Stop records and the structured composite stop key.

use super::ids::{ParentStationId, RouteId, StopId};

/// Separator MBTA uses between the parts of a stop description,
/// e.g. "Bowdoin - Blue Line - Wonderland".
const DESCRIPTION_SEPARATOR: &str = " - ";

/// A stop as reported by the data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopRecord {
    pub id: StopId,
    /// Full display name, e.g. "Braintree - Red Line".
    pub description: String,
    /// Bare station name, e.g. "Braintree".
    pub name: String,
    pub parent_station: Option<ParentStationId>,
}

impl StopRecord {
    /// Build a record, deriving the bare station name from the description.
    pub fn new(
        id: StopId,
        description: impl Into<String>,
        parent_station: Option<ParentStationId>,
    ) -> Self {
        let description = description.into();
        let name = station_name_from_description(&description).to_string();
        Self {
            id,
            description,
            name,
            parent_station,
        }
    }

    /// Replace the derived station name with one supplied by the source.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// The station part of a description: everything before the first `" - "`.
pub fn station_name_from_description(description: &str) -> &str {
    description
        .split(DESCRIPTION_SEPARATOR)
        .next()
        .unwrap_or(description)
        .trim()
}

/// Composite stop identity: `(stop id, display name, owning route)`.
///
/// Stops are route-scoped in the network model, so the same platform id can
/// appear under more than one route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopKey {
    pub stop_id: StopId,
    pub display_name: String,
    pub route_id: RouteId,
}
