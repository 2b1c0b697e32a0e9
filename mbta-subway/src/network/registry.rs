//! Stop registry, populated with a single batched lookup.
//!
//! The registry maps every stop seen on any trip to its display name,
//! owning route(s) and parent station. All stop records are fetched in one
//! `stops` call keyed by the full id set, so a build makes one stop request
//! no matter how many stops the network has.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use tracing::{debug, info, warn};

use crate::domain::{ParentStationId, RouteId, StopId, StopKey, StopRecord};

use super::catalog::TripIndex;
use super::error::SnapshotError;
use super::sequences::StopSequences;
use super::source::NetworkSource;

/// How owning routes are assigned to a stop visited by trips of several
/// routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteAttribution {
    /// Register the stop once under every route visiting it.
    #[default]
    AllRoutes,
    /// Keep only the route of the last trip (in trip index order) visiting it.
    LastVisit,
    /// Keep only the route of the first trip visiting it.
    FirstVisit,
}

/// Error returned when parsing an unknown attribution policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route attribution {0:?} (expected all, last or first)")]
pub struct UnknownAttribution(String);

impl FromStr for RouteAttribution {
    type Err = UnknownAttribution;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(RouteAttribution::AllRoutes),
            "last" => Ok(RouteAttribution::LastVisit),
            "first" => Ok(RouteAttribution::FirstVisit),
            _ => Err(UnknownAttribution(s.to_string())),
        }
    }
}

/// Stop ids in first-encounter order, with the routes attributed to each.
#[derive(Debug, Clone, Default)]
pub struct Attribution {
    pub stop_ids: Vec<StopId>,
    pub routes: HashMap<StopId, Vec<RouteId>>,
}

/// Walk trips in index order, collecting distinct stop ids and their routes.
pub fn attribute_routes(
    index: &TripIndex,
    sequences: &StopSequences,
    policy: RouteAttribution,
) -> Attribution {
    let mut attribution = Attribution::default();

    for (route, trip) in index.trips() {
        let Some(stops) = sequences.stops_of(trip) else {
            continue;
        };

        for stop in stops {
            if !attribution.routes.contains_key(stop) {
                attribution.stop_ids.push(stop.clone());
            }
            let routes = attribution.routes.entry(stop.clone()).or_default();

            match policy {
                RouteAttribution::AllRoutes => {
                    if !routes.contains(route) {
                        routes.push(route.clone());
                    }
                }
                RouteAttribution::LastVisit => {
                    routes.clear();
                    routes.push(route.clone());
                }
                RouteAttribution::FirstVisit => {
                    if routes.is_empty() {
                        routes.push(route.clone());
                    }
                }
            }
        }
    }

    attribution
}

/// A stop registered under one owning route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredStop {
    pub key: StopKey,
    /// Bare station name used for name lookup, e.g. "Davis".
    pub station_name: String,
    pub parent_station: Option<ParentStationId>,
}

/// `(stop id, display name, route) → parent station` for every stop of the
/// network.
///
/// `(stop id, route)` is unique within the registry.
#[derive(Debug, Clone, Default)]
pub struct StopRegistry {
    entries: Vec<RegisteredStop>,
    by_stop: HashMap<StopId, Vec<usize>>,
}

impl StopRegistry {
    /// Fetch every stop of every trip in one batched call and register it
    /// under its attributed route(s).
    pub async fn populate<S: NetworkSource>(
        source: &S,
        index: &TripIndex,
        sequences: &StopSequences,
        policy: RouteAttribution,
    ) -> Result<Self, SnapshotError> {
        let attribution = attribute_routes(index, sequences, policy);
        debug!(
            stops = attribution.stop_ids.len(),
            ?policy,
            "fetching stops in one batch"
        );

        let records = source.stops(&attribution.stop_ids).await?;
        let registry = Self::from_records(records, &attribution)?;

        info!(
            stops = attribution.stop_ids.len(),
            entries = registry.len(),
            "populated stop registry"
        );
        Ok(registry)
    }

    /// Register fetched records under their attributed routes.
    ///
    /// Every attributed stop must have a record. Records for stops that
    /// were not requested are ignored.
    pub fn from_records(
        records: Vec<StopRecord>,
        attribution: &Attribution,
    ) -> Result<Self, SnapshotError> {
        let mut registry = Self::default();
        let mut seen: HashSet<StopId> = HashSet::new();

        for record in records {
            let Some(routes) = attribution.routes.get(&record.id) else {
                warn!(stop = %record.id, "stop lookup returned an unrequested stop");
                continue;
            };
            if !seen.insert(record.id.clone()) {
                continue;
            }

            for route in routes {
                registry.insert(RegisteredStop {
                    key: StopKey {
                        stop_id: record.id.clone(),
                        display_name: record.description.clone(),
                        route_id: route.clone(),
                    },
                    station_name: record.name.clone(),
                    parent_station: record.parent_station.clone(),
                });
            }
        }

        let missing: Vec<StopId> = attribution
            .stop_ids
            .iter()
            .filter(|id| !seen.contains(*id))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(SnapshotError::MissingStops(missing));
        }

        Ok(registry)
    }

    fn insert(&mut self, stop: RegisteredStop) {
        let slots = self.by_stop.entry(stop.key.stop_id.clone()).or_default();
        if slots
            .iter()
            .any(|&i| self.entries[i].key.route_id == stop.key.route_id)
        {
            return;
        }
        slots.push(self.entries.len());
        self.entries.push(stop);
    }

    /// Every registered stop, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredStop> {
        self.entries.iter()
    }

    /// Entries for a stop id, one per attributed route.
    pub fn entries_for(&self, stop: &StopId) -> impl Iterator<Item = &RegisteredStop> {
        self.by_stop
            .get(stop)
            .into_iter()
            .flatten()
            .map(|&i| &self.entries[i])
    }

    /// The entry for a stop under a specific route.
    pub fn get(&self, stop: &StopId, route: &RouteId) -> Option<&RegisteredStop> {
        self.entries_for(stop).find(|e| &e.key.route_id == route)
    }

    /// Display name of a stop, e.g. "Davis - Red Line - Ashmont/Braintree".
    pub fn display_name(&self, stop: &StopId) -> Option<&str> {
        self.entries_for(stop)
            .next()
            .map(|e| e.key.display_name.as_str())
    }

    /// Routes a stop is registered under.
    pub fn routes_of(&self, stop: &StopId) -> Vec<&RouteId> {
        self.entries_for(stop).map(|e| &e.key.route_id).collect()
    }

    /// Number of `(stop, route)` entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
