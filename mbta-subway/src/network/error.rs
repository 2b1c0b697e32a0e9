//! Errors from building and querying the network snapshot.

use crate::domain::{RouteId, StopId, TripId};
use crate::mbta::MbtaError;

/// Failure while building a [`NetworkSnapshot`](super::NetworkSnapshot).
///
/// No partial snapshot is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The data source failed
    #[error("failed to fetch network data: {0}")]
    Fetch(#[from] MbtaError),

    /// A route pattern referenced a route missing from the route list
    #[error("route pattern references unknown route {0}")]
    UnknownRoute(RouteId),

    /// A trip has no stops
    #[error("trip {0} has no stops")]
    EmptyTrip(TripId),

    /// The batched stop lookup did not return every requested stop
    #[error("stop lookup did not return {} stop(s): {}", .0.len(), join(.0))]
    MissingStops(Vec<StopId>),
}

/// Failure while answering a query against a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// No station name matched
    #[error("no station matches {0:?}")]
    StationNotFound(String),

    /// Several stations matched and none exactly
    #[error("{query:?} matches several stations: {}", .candidates.join(", "))]
    AmbiguousStation {
        query: String,
        candidates: Vec<String>,
    },

    /// No single trip serves both stations
    #[error("no single trip serves both {from:?} and {to:?}")]
    PathNotFound { from: String, to: String },

    /// A stop was expected on a trip but is not there
    #[error("stop {stop} is not on trip {trip}")]
    StopNotOnTrip { stop: StopId, trip: TripId },

    /// Extrema requested over a network with no trips
    #[error("network has no trips")]
    EmptyNetwork,
}

fn join(ids: &[StopId]) -> String {
    ids.iter()
        .map(StopId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SnapshotError::MissingStops(vec![
            StopId::parse("70105").unwrap(),
            StopId::parse("70038").unwrap(),
        ]);
        assert_eq!(
            err.to_string(),
            "stop lookup did not return 2 stop(s): 70105, 70038"
        );

        let err = SnapshotError::Fetch(MbtaError::RateLimited);
        assert_eq!(
            err.to_string(),
            "failed to fetch network data: rate limited by MBTA API"
        );

        let err = QueryError::AmbiguousStation {
            query: "park".into(),
            candidates: vec!["Park Street".into(), "Fenway Park".into()],
        };
        assert_eq!(
            err.to_string(),
            "\"park\" matches several stations: Park Street, Fenway Park"
        );

        let err = QueryError::PathNotFound {
            from: "Davis".into(),
            to: "Wonderland".into(),
        };
        assert_eq!(
            err.to_string(),
            "no single trip serves both \"Davis\" and \"Wonderland\""
        );

        assert_eq!(QueryError::EmptyNetwork.to_string(), "network has no trips");
    }
}
