//! The data source the network model is built from.

use crate::domain::{Route, RoutePattern, RouteType, StopId, StopRecord, TripId};
use crate::mbta::MbtaError;

/// Trait for providing raw network data.
///
/// This abstraction allows the snapshot to be built from the live API, a
/// cached client, or mock data in tests. Every call either returns
/// well-formed records or fails with an [`MbtaError`].
#[allow(async_fn_in_trait)]
pub trait NetworkSource {
    /// Routes of the given types.
    async fn list_routes(&self, types: &[RouteType]) -> Result<Vec<Route>, MbtaError>;

    /// Route patterns of routes of the given types. A route usually has
    /// several.
    async fn list_route_patterns(&self, types: &[RouteType])
    -> Result<Vec<RoutePattern>, MbtaError>;

    /// Stop ids of a trip, in travel order.
    async fn trip_stops(&self, trip: &TripId) -> Result<Vec<StopId>, MbtaError>;

    /// A single stop.
    async fn stop(&self, id: &StopId) -> Result<StopRecord, MbtaError>;

    /// Many stops in one request. Prefer this over repeated [`stop`] calls.
    ///
    /// Ids unknown to the source are omitted from the result.
    ///
    /// [`stop`]: NetworkSource::stop
    async fn stops(&self, ids: &[StopId]) -> Result<Vec<StopRecord>, MbtaError>;
}
