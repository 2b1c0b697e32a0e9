//! Trips with the most and fewest stops.

use crate::domain::{StopId, TripId};

use super::error::QueryError;

/// The longest and shortest trips by stop count. Ties are all kept, in input
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extrema {
    pub max_trips: Vec<TripId>,
    pub max_len: usize,
    pub min_trips: Vec<TripId>,
    pub min_len: usize,
}

/// Find the trips with the most and fewest stops.
///
/// Fails with [`QueryError::EmptyNetwork`] when there are no trips.
pub fn find_extrema<'a>(
    trips: impl IntoIterator<Item = (&'a TripId, &'a [StopId])>,
) -> Result<Extrema, QueryError> {
    let mut trips = trips.into_iter();
    let (first, stops) = trips.next().ok_or(QueryError::EmptyNetwork)?;

    let mut extrema = Extrema {
        max_trips: vec![first.clone()],
        max_len: stops.len(),
        min_trips: vec![first.clone()],
        min_len: stops.len(),
    };

    for (trip, stops) in trips {
        let len = stops.len();

        if len > extrema.max_len {
            extrema.max_len = len;
            extrema.max_trips = vec![trip.clone()];
        } else if len == extrema.max_len {
            extrema.max_trips.push(trip.clone());
        }

        if len < extrema.min_len {
            extrema.min_len = len;
            extrema.min_trips = vec![trip.clone()];
        } else if len == extrema.min_len {
            extrema.min_trips.push(trip.clone());
        }
    }

    Ok(extrema)
}
