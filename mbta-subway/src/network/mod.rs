//! The rail network model and the queries answered over it.
//!
//! A [`NetworkSnapshot`] is built once from a [`NetworkSource`]:
//!
//! - [`RouteCatalog`] and [`TripIndex`]: the rail routes and their
//!   representative trips
//! - [`StopSequences`]: the stops of every trip, in travel order
//! - [`StopRegistry`]: every stop under its owning route(s), filled by one
//!   batched lookup
//! - [`TransferIndex`] and [`StationIndex`]: derived groupings by parent
//!   station and by station name
//!
//! Queries (extrema, path resolution) then read the snapshot without further
//! network access.

mod catalog;
mod error;
mod extrema;
mod path;
mod registry;
mod sequences;
mod snapshot;
mod source;
mod stations;
mod transfers;


pub use catalog::{RailNetwork, RouteCatalog, TripIndex, load_rail_network};
pub use error::{QueryError, SnapshotError};
pub use extrema::{Extrema, find_extrema};
pub use path::{CommonTrip, Path, PathStop, extract_ordered_subpath, find_common_trip, resolve_path};
pub use registry::{
    Attribution, RegisteredStop, RouteAttribution, StopRegistry, UnknownAttribution,
    attribute_routes,
};
pub use sequences::{StopSequences, Trip, resolve_stops};
pub use snapshot::{NetworkSnapshot, SnapshotOptions};
pub use source::NetworkSource;
pub use stations::{Platform, Station, StationIndex, normalize_name};
pub use transfers::{TransferIndex, TransferStation};
