//! Route catalog and trip index.
//!
//! These are the two independently fetched roots of the network model: the
//! routes themselves, and the representative trips of each route.

use std::collections::HashMap;

use tracing::info;

use crate::domain::{Route, RouteId, RoutePattern, RouteType, TripId};

use super::error::SnapshotError;
use super::source::NetworkSource;

/// Route id → route, in source order.
#[derive(Debug, Clone, Default)]
pub struct RouteCatalog {
    routes: Vec<Route>,
    by_id: HashMap<RouteId, usize>,
}

impl RouteCatalog {
    /// Build a catalog. A repeated route id keeps its first occurrence.
    pub fn new(routes: impl IntoIterator<Item = Route>) -> Self {
        let mut catalog = Self::default();
        for route in routes {
            if catalog.by_id.contains_key(&route.id) {
                continue;
            }
            catalog.by_id.insert(route.id.clone(), catalog.routes.len());
            catalog.routes.push(route);
        }
        catalog
    }

    pub fn get(&self, id: &RouteId) -> Option<&Route> {
        self.by_id.get(id).map(|&i| &self.routes[i])
    }

    /// The long name of a route, e.g. "Red Line".
    pub fn name_of(&self, id: &RouteId) -> Option<&str> {
        self.get(id).map(|r| r.long_name.as_str())
    }

    pub fn contains(&self, id: &RouteId) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Route id → representative trip ids.
///
/// Routes keep first-appearance order and trips keep source order. Duplicate
/// trip ids are kept: two patterns may legitimately share a trip.
#[derive(Debug, Clone, Default)]
pub struct TripIndex {
    routes: Vec<(RouteId, Vec<TripId>)>,
    position: HashMap<RouteId, usize>,
}

impl TripIndex {
    /// Group route patterns by route.
    pub fn from_patterns(patterns: impl IntoIterator<Item = RoutePattern>) -> Self {
        let mut index = Self::default();
        for pattern in patterns {
            let slot = match index.position.get(&pattern.route_id) {
                Some(&i) => i,
                None => {
                    index
                        .position
                        .insert(pattern.route_id.clone(), index.routes.len());
                    index.routes.push((pattern.route_id, Vec::new()));
                    index.routes.len() - 1
                }
            };
            index.routes[slot].1.push(pattern.representative_trip_id);
        }
        index
    }

    /// Trip ids of a route; empty for unknown routes.
    pub fn trips_for(&self, route: &RouteId) -> &[TripId] {
        self.position
            .get(route)
            .map(|&i| self.routes[i].1.as_slice())
            .unwrap_or(&[])
    }

    /// Routes and their trips, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&RouteId, &[TripId])> {
        self.routes.iter().map(|(r, t)| (r, t.as_slice()))
    }

    /// Every `(route, trip)` pair, in index order.
    pub fn trips(&self) -> impl Iterator<Item = (&RouteId, &TripId)> {
        self.routes
            .iter()
            .flat_map(|(route, trips)| trips.iter().map(move |t| (route, t)))
    }

    /// The first route listing a trip.
    pub fn route_of(&self, trip: &TripId) -> Option<&RouteId> {
        self.trips().find(|(_, t)| *t == trip).map(|(r, _)| r)
    }

    /// Number of `(route, trip)` entries, duplicates included.
    pub fn trip_count(&self) -> usize {
        self.routes.iter().map(|(_, t)| t.len()).sum()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }
}

/// The routes of a network and their representative trips.
#[derive(Debug, Clone)]
pub struct RailNetwork {
    pub routes: RouteCatalog,
    pub trips: TripIndex,
}

/// Fetch routes of the given types and the representative trips of each.
///
/// Fails if the source fails, or if a pattern names a route that was not
/// listed.
pub async fn load_rail_network<S: NetworkSource>(
    source: &S,
    types: &[RouteType],
) -> Result<RailNetwork, SnapshotError> {
    let routes = RouteCatalog::new(source.list_routes(types).await?);
    let patterns = source.list_route_patterns(types).await?;

    if let Some(unknown) = patterns.iter().find(|p| !routes.contains(&p.route_id)) {
        return Err(SnapshotError::UnknownRoute(unknown.route_id.clone()));
    }

    let trips = TripIndex::from_patterns(patterns);
    info!(
        routes = routes.len(),
        trips = trips.trip_count(),
        "loaded rail network"
    );

    Ok(RailNetwork { routes, trips })
}
