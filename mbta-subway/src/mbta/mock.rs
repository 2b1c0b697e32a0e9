//! In-memory MBTA data source for testing without API access.
//!
//! Serves routes, patterns, trips and stops registered up front, and counts
//! calls per operation so tests can check how many requests a build makes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{
    ParentStationId, Route, RouteId, RoutePattern, RouteType, StopId, StopRecord, TripId,
};
use crate::network::NetworkSource;

use super::error::MbtaError;

/// Number of calls made to each operation of a [`MockMbtaClient`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub list_routes: usize,
    pub list_route_patterns: usize,
    pub trip_stops: usize,
    pub stop: usize,
    pub stops: usize,
}

#[derive(Debug, Default)]
struct Counters {
    list_routes: AtomicUsize,
    list_route_patterns: AtomicUsize,
    trip_stops: AtomicUsize,
    stop: AtomicUsize,
    stops: AtomicUsize,
}

/// Mock data source backed by in-memory fixtures.
///
/// # Panics
///
/// The builder methods panic on empty fixture identifiers.
#[derive(Debug, Default)]
pub struct MockMbtaClient {
    routes: Vec<Route>,
    patterns: Vec<RoutePattern>,
    trips: HashMap<TripId, Vec<StopId>>,
    stops: HashMap<StopId, StopRecord>,
    failure: Option<u16>,
    counters: Counters,
}

impl MockMbtaClient {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route.
    pub fn with_route(mut self, id: &str, long_name: &str, route_type: RouteType) -> Self {
        self.routes.push(Route::new(parse(id), long_name, route_type));
        self
    }

    /// Add a representative trip for a route, with its stops in travel order.
    pub fn with_trip(mut self, route: &str, trip: &str, stops: &[&str]) -> Self {
        let trip_id: TripId = parse(trip);
        self.patterns.push(RoutePattern {
            route_id: parse(route),
            representative_trip_id: trip_id.clone(),
        });
        self.trips
            .insert(trip_id, stops.iter().map(|s| parse(s)).collect());
        self
    }

    /// Add a stop record.
    pub fn with_stop(mut self, id: &str, description: &str, parent: Option<&str>) -> Self {
        let stop_id: StopId = parse(id);
        let parent = parent.map(|p| parse::<ParentStationId>(p));
        self.stops
            .insert(stop_id.clone(), StopRecord::new(stop_id, description, parent));
        self
    }

    /// Make every call fail with the given status code.
    pub fn failing_with(mut self, status: u16) -> Self {
        self.failure = Some(status);
        self
    }

    /// Calls made so far.
    pub fn call_counts(&self) -> CallCounts {
        let c = &self.counters;
        CallCounts {
            list_routes: c.list_routes.load(Ordering::Relaxed),
            list_route_patterns: c.list_route_patterns.load(Ordering::Relaxed),
            trip_stops: c.trip_stops.load(Ordering::Relaxed),
            stop: c.stop.load(Ordering::Relaxed),
            stops: c.stops.load(Ordering::Relaxed),
        }
    }

    fn check_failure(&self) -> Result<(), MbtaError> {
        match self.failure {
            Some(status) => Err(MbtaError::Api {
                status,
                message: "mock failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Parse a fixture identifier. Fixtures are written by hand, so an empty id
/// is a bug in the test.
fn parse<T: FixtureId>(s: &str) -> T {
    T::from_fixture(s)
}

trait FixtureId {
    fn from_fixture(s: &str) -> Self;
}

macro_rules! fixture_id {
    ($($ty:ty),*) => {
        $(impl FixtureId for $ty {
            fn from_fixture(s: &str) -> Self {
                <$ty>::parse(s).unwrap_or_else(|e| panic!("bad fixture id {s:?}: {e}"))
            }
        })*
    };
}

fixture_id!(RouteId, TripId, StopId, ParentStationId);

impl NetworkSource for MockMbtaClient {
    async fn list_routes(&self, types: &[RouteType]) -> Result<Vec<Route>, MbtaError> {
        self.counters.list_routes.fetch_add(1, Ordering::Relaxed);
        self.check_failure()?;
        Ok(self
            .routes
            .iter()
            .filter(|r| types.contains(&r.route_type))
            .cloned()
            .collect())
    }

    async fn list_route_patterns(
        &self,
        types: &[RouteType],
    ) -> Result<Vec<RoutePattern>, MbtaError> {
        self.counters
            .list_route_patterns
            .fetch_add(1, Ordering::Relaxed);
        self.check_failure()?;
        Ok(self
            .patterns
            .iter()
            .filter(|p| {
                self.routes
                    .iter()
                    .any(|r| r.id == p.route_id && types.contains(&r.route_type))
            })
            .cloned()
            .collect())
    }

    async fn trip_stops(&self, trip: &TripId) -> Result<Vec<StopId>, MbtaError> {
        self.counters.trip_stops.fetch_add(1, Ordering::Relaxed);
        self.check_failure()?;
        self.trips
            .get(trip)
            .cloned()
            .ok_or_else(|| MbtaError::NotFound(format!("/trips/{trip}")))
    }

    async fn stop(&self, id: &StopId) -> Result<StopRecord, MbtaError> {
        self.counters.stop.fetch_add(1, Ordering::Relaxed);
        self.check_failure()?;
        self.stops
            .get(id)
            .cloned()
            .ok_or_else(|| MbtaError::NotFound(format!("/stops/{id}")))
    }

    /// Returns known stops in request order; unknown ids are omitted, as the
    /// real filter endpoint does.
    async fn stops(&self, ids: &[StopId]) -> Result<Vec<StopRecord>, MbtaError> {
        self.counters.stops.fetch_add(1, Ordering::Relaxed);
        self.check_failure()?;
        Ok(ids.iter().filter_map(|id| self.stops.get(id).cloned()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RAIL_TYPES;

    fn sample() -> MockMbtaClient {
        MockMbtaClient::new()
            .with_route("Red", "Red Line", RouteType::HeavyRail)
            .with_route("CR-Fairmount", "Fairmount Line", RouteType::CommuterRail)
            .with_trip("Red", "R1", &["70105", "70104"])
            .with_trip("CR-Fairmount", "F1", &["place-FB-0109"])
            .with_stop("70105", "Braintree - Red Line", Some("place-brntn"))
            .with_stop("70038", "Bowdoin - Blue Line - Wonderland", Some("place-bomnl"))
    }

    #[tokio::test]
    async fn filters_by_route_type() {
        let mock = sample();
        let routes = mock.list_routes(&RAIL_TYPES).await.unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].long_name, "Red Line");

        let patterns = mock.list_route_patterns(&RAIL_TYPES).await.unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].representative_trip_id.as_str(), "R1");
    }

    #[tokio::test]
    async fn batched_lookup_keeps_request_order() {
        let mock = sample();
        let ids = [
            StopId::parse("70105").unwrap(),
            StopId::parse("70038").unwrap(),
        ];

        let stops = mock.stops(&ids).await.unwrap();

        assert_eq!(stops[0].id.as_str(), "70105");
        assert_eq!(stops[0].description, "Braintree - Red Line");
        assert_eq!(
            stops[0].parent_station.as_ref().map(|p| p.as_str()),
            Some("place-brntn")
        );
        assert_eq!(stops[1].id.as_str(), "70038");
        assert_eq!(stops[1].description, "Bowdoin - Blue Line - Wonderland");
        assert_eq!(
            stops[1].parent_station.as_ref().map(|p| p.as_str()),
            Some("place-bomnl")
        );
        assert_eq!(mock.call_counts().stops, 1);
        assert_eq!(mock.call_counts().stop, 0);
    }

    #[tokio::test]
    async fn unknown_trip_is_not_found() {
        let mock = sample();
        let err = mock
            .trip_stops(&TripId::parse("nope").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(404));
    }

    #[tokio::test]
    async fn failing_mock_reports_status() {
        let mock = sample().failing_with(503);
        let err = mock.list_routes(&RAIL_TYPES).await.unwrap_err();
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(mock.call_counts().list_routes, 1);
    }
}
