//! Point-to-point resolution along a single trip.
//!
//! A path is found in three stages, each of which fails hard:
//!
//! 1. both names are resolved to stations through the [`StationIndex`];
//! 2. the first trip (in trip index order) calling at a platform of each
//!    station is chosen;
//! 3. the stops between the two platforms are sliced out of that trip,
//!    reversed if the trip runs the other way.
//!
//! Journeys needing a change of trip are not searched; they fail with
//! [`QueryError::PathNotFound`].

use tracing::debug;

use crate::domain::{RouteId, StopId, TripId};

use super::error::QueryError;
use super::registry::StopRegistry;
use super::sequences::{StopSequences, Trip};
use super::stations::StationIndex;

/// One stop of a resolved path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStop {
    pub stop_id: StopId,
    /// e.g. "Central - Red Line - Ashmont/Braintree"
    pub display_name: String,
}

/// The stops from one station to another along a single trip, inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub trip_id: TripId,
    pub route_id: RouteId,
    pub stops: Vec<PathStop>,
}

impl Path {
    pub fn first(&self) -> Option<&PathStop> {
        self.stops.first()
    }

    pub fn last(&self) -> Option<&PathStop> {
        self.stops.last()
    }

    /// Number of stops travelled through, both ends included.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// A trip calling at both ends of a requested path.
#[derive(Debug, Clone, Copy)]
pub struct CommonTrip<'a> {
    pub trip: &'a Trip,
    /// The "from" platform the trip calls at.
    pub from: &'a StopId,
    /// The "to" platform the trip calls at.
    pub to: &'a StopId,
}

/// Slice `sequence` from the first occurrence of `from` to the first
/// occurrence of `to`, both inclusive.
///
/// The result always starts at `from` and ends at `to`: it is reversed when
/// `to` comes first. Returns `None` if either stop is absent.
pub fn extract_ordered_subpath(
    sequence: &[StopId],
    from: &StopId,
    to: &StopId,
) -> Option<Vec<StopId>> {
    let start = sequence.iter().position(|s| s == from)?;
    let end = sequence.iter().position(|s| s == to)?;

    if start <= end {
        Some(sequence[start..=end].to_vec())
    } else {
        Some(sequence[end..=start].iter().rev().cloned().collect())
    }
}

/// The first trip calling at any of `from` and any of `to`.
///
/// Candidates are tried in the order given, so the first matching platform
/// of each station is reported.
pub fn find_common_trip<'a>(
    trips: &'a [Trip],
    from: &'a [StopId],
    to: &'a [StopId],
) -> Option<CommonTrip<'a>> {
    trips.iter().find_map(move |trip| {
        let origin = from.iter().find(|s| trip.serves(s))?;
        let destination = to.iter().find(|s| trip.serves(s))?;
        Some(CommonTrip {
            trip,
            from: origin,
            to: destination,
        })
    })
}

/// Resolve two station names to the stops between them on a single trip.
pub fn resolve_path(
    stations: &StationIndex,
    sequences: &StopSequences,
    registry: &StopRegistry,
    from_name: &str,
    to_name: &str,
) -> Result<Path, QueryError> {
    let from_station = stations.resolve(from_name)?;
    let to_station = stations.resolve(to_name)?;
    debug!(
        from = %from_station.name,
        to = %to_station.name,
        "resolved station names"
    );

    let from_stops = from_station.stop_ids();
    let to_stops = to_station.stop_ids();
    let common = find_common_trip(sequences.as_slice(), &from_stops, &to_stops).ok_or_else(
        || QueryError::PathNotFound {
            from: from_station.name.clone(),
            to: to_station.name.clone(),
        },
    )?;
    debug!(trip = %common.trip.id, route = %common.trip.route_id, "found common trip");

    let stop_ids = extract_ordered_subpath(&common.trip.stops, common.from, common.to)
        .ok_or_else(|| QueryError::StopNotOnTrip {
            stop: common.from.clone(),
            trip: common.trip.id.clone(),
        })?;

    let stops = stop_ids
        .into_iter()
        .map(|stop_id| {
            let display_name = registry
                .get(&stop_id, &common.trip.route_id)
                .map(|e| e.key.display_name.as_str())
                .or_else(|| registry.display_name(&stop_id))
                .unwrap_or(stop_id.as_str())
                .to_string();
            PathStop {
                stop_id,
                display_name,
            }
        })
        .collect();

    Ok(Path {
        trip_id: common.trip.id.clone(),
        route_id: common.trip.route_id.clone(),
        stops,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// A sequence of distinct stop ids and two indices into it.
    fn sequence_and_ends() -> impl Strategy<Value = (Vec<StopId>, usize, usize)> {
        (1usize..30).prop_flat_map(|n| {
            let seq: Vec<StopId> = (0..n)
                .map(|i| StopId::parse(&format!("s{i}")).unwrap())
                .collect();
            (Just(seq), 0..n, 0..n)
        })
    }

    proptest! {
        /// The subpath starts at `from`, ends at `to`, and is a contiguous run
        /// of the sequence in one direction or the other.
        #[test]
        fn subpath_is_contiguous((seq, i, j) in sequence_and_ends()) {
            let path = extract_ordered_subpath(&seq, &seq[i], &seq[j]).unwrap();

            prop_assert_eq!(path.first(), Some(&seq[i]));
            prop_assert_eq!(path.last(), Some(&seq[j]));
            prop_assert_eq!(path.len(), i.abs_diff(j) + 1);

            let (lo, hi) = (i.min(j), i.max(j));
            let mut forward = path.clone();
            if i > j {
                forward.reverse();
            }
            prop_assert_eq!(forward.as_slice(), &seq[lo..=hi]);
        }
    }
}
