//! The immutable network snapshot.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::{RAIL_TYPES, Route, RouteType, TripId};

use super::catalog::{RouteCatalog, TripIndex, load_rail_network};
use super::error::{QueryError, SnapshotError};
use super::extrema::{Extrema, find_extrema};
use super::path::{Path, resolve_path};
use super::registry::{RouteAttribution, StopRegistry};
use super::sequences::StopSequences;
use super::source::NetworkSource;
use super::stations::StationIndex;
use super::transfers::TransferIndex;

/// Options controlling how a snapshot is built.
#[derive(Debug, Clone)]
pub struct SnapshotOptions {
    /// Route types to include.
    pub types: Vec<RouteType>,
    pub attribution: RouteAttribution,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            types: RAIL_TYPES.to_vec(),
            attribution: RouteAttribution::default(),
        }
    }
}

impl SnapshotOptions {
    pub fn with_attribution(mut self, attribution: RouteAttribution) -> Self {
        self.attribution = attribution;
        self
    }
}

/// Everything known about the network at one point in time.
///
/// Built once, then only read.
#[derive(Debug, Clone)]
pub struct NetworkSnapshot {
    routes: RouteCatalog,
    trips: TripIndex,
    sequences: StopSequences,
    registry: StopRegistry,
    transfers: TransferIndex,
    stations: StationIndex,
    fetched_at: DateTime<Utc>,
}

impl NetworkSnapshot {
    /// Fetch and index the network.
    ///
    /// Requests are made in dependency order: routes and patterns, then one
    /// request per distinct trip, then a single batched stop lookup. Any
    /// failure aborts the build.
    pub async fn build<S: NetworkSource>(
        source: &S,
        options: &SnapshotOptions,
    ) -> Result<Self, SnapshotError> {
        let fetched_at = Utc::now();

        let network = load_rail_network(source, &options.types).await?;
        let sequences = StopSequences::resolve_all(source, &network.trips).await?;
        let registry =
            StopRegistry::populate(source, &network.trips, &sequences, options.attribution)
                .await?;

        let transfers = TransferIndex::from_registry(&registry);
        let stations = StationIndex::from_registry(&registry);

        info!(
            routes = network.routes.len(),
            trips = sequences.len(),
            stops = registry.len(),
            transfers = transfers.len(),
            stations = stations.len(),
            "built network snapshot"
        );

        Ok(Self {
            routes: network.routes,
            trips: network.trips,
            sequences,
            registry,
            transfers,
            stations,
            fetched_at,
        })
    }

    pub fn routes(&self) -> &RouteCatalog {
        &self.routes
    }

    pub fn trips(&self) -> &TripIndex {
        &self.trips
    }

    pub fn sequences(&self) -> &StopSequences {
        &self.sequences
    }

    pub fn registry(&self) -> &StopRegistry {
        &self.registry
    }

    pub fn transfers(&self) -> &TransferIndex {
        &self.transfers
    }

    pub fn stations(&self) -> &StationIndex {
        &self.stations
    }

    /// When the build started.
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Trips with the most and fewest stops.
    pub fn extrema(&self) -> Result<Extrema, QueryError> {
        find_extrema(self.sequences.entries())
    }

    /// The route owning a trip.
    pub fn route_for_trip(&self, trip: &TripId) -> Option<&Route> {
        let route = self
            .sequences
            .get(trip)
            .map(|t| &t.route_id)
            .or_else(|| self.trips.route_of(trip))?;
        self.routes.get(route)
    }

    /// Stops between two named stations on a single trip.
    pub fn resolve_path(&self, from: &str, to: &str) -> Result<Path, QueryError> {
        resolve_path(&self.stations, &self.sequences, &self.registry, from, to)
    }
}
