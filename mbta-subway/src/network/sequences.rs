//! Stop sequences of trips.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::domain::{RouteId, StopId, TripId};
use crate::mbta::MbtaError;

use super::catalog::TripIndex;
use super::error::SnapshotError;
use super::source::NetworkSource;

/// A representative trip with its resolved stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub id: TripId,
    pub route_id: RouteId,
    /// Stop ids in travel order. Never empty.
    pub stops: Vec<StopId>,
}

impl Trip {
    /// Whether the trip calls at a stop.
    pub fn serves(&self, stop: &StopId) -> bool {
        self.stops.contains(stop)
    }
}

/// Fetch the stops of a trip in the order supplied by the source.
///
/// The source order is taken as the travel order; nothing is re-sorted.
pub async fn resolve_stops<S: NetworkSource>(
    source: &S,
    trip: &TripId,
) -> Result<Vec<StopId>, MbtaError> {
    let stops = source.trip_stops(trip).await?;
    trace!(%trip, stops = stops.len(), "resolved trip stops");
    Ok(stops)
}

/// Resolved trips, in trip index order, one entry per distinct trip id.
#[derive(Debug, Clone, Default)]
pub struct StopSequences {
    trips: Vec<Trip>,
    by_id: HashMap<TripId, usize>,
}

impl StopSequences {
    /// Build from already resolved trips. A repeated trip id keeps its first
    /// occurrence.
    pub fn from_trips(trips: impl IntoIterator<Item = Trip>) -> Result<Self, SnapshotError> {
        let mut sequences = Self::default();
        for trip in trips {
            if trip.stops.is_empty() {
                return Err(SnapshotError::EmptyTrip(trip.id));
            }
            if sequences.by_id.contains_key(&trip.id) {
                continue;
            }
            sequences.by_id.insert(trip.id.clone(), sequences.trips.len());
            sequences.trips.push(trip);
        }
        Ok(sequences)
    }

    /// Resolve every trip of the index, one request per distinct trip id.
    pub async fn resolve_all<S: NetworkSource>(
        source: &S,
        index: &TripIndex,
    ) -> Result<Self, SnapshotError> {
        let mut sequences = Self::default();

        for (route, trip) in index.trips() {
            if sequences.by_id.contains_key(trip) {
                debug!(%trip, "trip listed more than once; already resolved");
                continue;
            }

            let stops = resolve_stops(source, trip).await?;
            if stops.is_empty() {
                return Err(SnapshotError::EmptyTrip(trip.clone()));
            }

            sequences.by_id.insert(trip.clone(), sequences.trips.len());
            sequences.trips.push(Trip {
                id: trip.clone(),
                route_id: route.clone(),
                stops,
            });
        }

        Ok(sequences)
    }

    pub fn get(&self, trip: &TripId) -> Option<&Trip> {
        self.by_id.get(trip).map(|&i| &self.trips[i])
    }

    pub fn stops_of(&self, trip: &TripId) -> Option<&[StopId]> {
        self.get(trip).map(|t| t.stops.as_slice())
    }

    /// Trips in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Trip> {
        self.trips.iter()
    }

    pub fn as_slice(&self) -> &[Trip] {
        &self.trips
    }

    /// `(trip id, stops)` pairs, in index order.
    pub fn entries(&self) -> impl Iterator<Item = (&TripId, &[StopId])> {
        self.trips.iter().map(|t| (&t.id, t.stops.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RAIL_TYPES, RouteType};
    use crate::mbta::MockMbtaClient;
    use crate::network::load_rail_network;

    fn ids(stops: &[StopId]) -> Vec<&str> {
        stops.iter().map(|s| s.as_str()).collect()
    }

    #[tokio::test]
    async fn resolve_stops_preserves_order_and_length() {
        let source = MockMbtaClient::new().with_trip("Red", "R1", &["70061", "70063", "70065"]);

        let stops = resolve_stops(&source, &TripId::parse("R1").unwrap())
            .await
            .unwrap();

        assert_eq!(ids(&stops), ["70061", "70063", "70065"]);
    }

    #[tokio::test]
    async fn resolve_all_fetches_each_trip_once() {
        let source = MockMbtaClient::new()
            .with_route("Red", "Red Line", RouteType::HeavyRail)
            .with_trip("Red", "R1", &["a", "b"])
            .with_trip("Red", "R2", &["b", "a"])
            .with_trip("Red", "R1", &["a", "b"]);
        let network = load_rail_network(&source, &RAIL_TYPES).await.unwrap();

        let sequences = StopSequences::resolve_all(&source, &network.trips)
            .await
            .unwrap();

        assert_eq!(sequences.len(), 2);
        assert_eq!(source.call_counts().trip_stops, 2);
        let r2 = sequences.get(&TripId::parse("R2").unwrap()).unwrap();
        assert_eq!(r2.route_id.as_str(), "Red");
        assert_eq!(ids(&r2.stops), ["b", "a"]);
    }

    #[tokio::test]
    async fn empty_trip_is_rejected() {
        let source = MockMbtaClient::new()
            .with_route("Red", "Red Line", RouteType::HeavyRail)
            .with_trip("Red", "R1", &[]);
        let network = load_rail_network(&source, &RAIL_TYPES).await.unwrap();

        let err = StopSequences::resolve_all(&source, &network.trips)
            .await
            .unwrap_err();
        assert!(matches!(err, SnapshotError::EmptyTrip(t) if t.as_str() == "R1"));
    }

    #[test]
    fn from_trips_rejects_empty() {
        let trip = Trip {
            id: TripId::parse("T").unwrap(),
            route_id: RouteId::parse("Red").unwrap(),
            stops: vec![],
        };
        assert!(StopSequences::from_trips([trip]).is_err());
    }
}
