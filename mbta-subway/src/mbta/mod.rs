//! MBTA v3 API client.
//!
//! This module provides an HTTP client for the MBTA v3 JSON:API, plus an
//! in-memory mock with the same interface.
//!
//! Key characteristics of the API:
//! - Every response is a JSON:API document; related resources are linked
//!   through `relationships` and side-loaded with `include`
//! - A trip's `stops` relationship lists its stops in travel order
//! - `filter[id]` accepts a comma-separated id list, so many stops can be
//!   fetched in a single request

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{DEFAULT_BASE_URL, MbtaClient, MbtaConfig};
pub use convert::ConversionError;
pub use error::MbtaError;
pub use mock::{CallCounts, MockMbtaClient};
pub use types::{
    IncludedResource, Relationship, ResourceIdentifier, RouteResource, RoutesDocument,
    StopDocument, StopResource, StopsDocument, TripDocument, TripResource,
};
