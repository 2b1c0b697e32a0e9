//! MBTA subway network model.
//!
//! Builds an in-memory snapshot of the light and heavy rail network from the
//! MBTA v3 API and answers questions about it: which routes exist, which
//! have the most and fewest stops, where routes meet, and which stops lie
//! between two stations on a single trip.

pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod mbta;
pub mod network;
pub mod report;
pub mod trip_request;

pub use error::Error;
