//! Top-level error for the command-line tool.

use crate::config::ConfigError;
use crate::mbta::MbtaError;
use crate::network::{QueryError, SnapshotError};
use crate::trip_request::TripRequestError;

/// Any failure that stops a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    TripRequest(#[from] TripRequestError),

    #[error(transparent)]
    Mbta(#[from] MbtaError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Query(#[from] QueryError),

    /// Reports could not be written
    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_transparently() {
        let err: Error = QueryError::StationNotFound("Riverside".into()).into();
        assert_eq!(err.to_string(), "no station matches \"Riverside\"");

        let err: Error = TripRequestError::MissingKey("to").into();
        assert!(matches!(err, Error::TripRequest(_)));
    }
}
