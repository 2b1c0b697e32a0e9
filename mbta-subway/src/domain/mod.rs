//! Domain types for the subway network model.
//!
//! Identifiers are validated at construction time, so code that receives
//! these types can trust they are non-empty.

mod ids;
mod route;
mod stop;

pub use ids::{InvalidId, ParentStationId, RouteId, StopId, TripId};
pub use route::{RAIL_TYPES, Route, RoutePattern, RouteType};
pub use stop::{StopKey, StopRecord, station_name_from_description};
