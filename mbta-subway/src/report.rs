//! Plain-text rendering of snapshot answers.

use std::fmt;
use std::io;

use crate::Error;
use crate::domain::{RouteId, StopId, TripId};
use crate::network::{Extrema, NetworkSnapshot, Path};

/// Write every report, path last.
///
/// The network answers are written before the path is resolved, so a
/// failed path lookup still leaves them on `out`.
pub fn write_reports(
    out: &mut impl io::Write,
    snapshot: &NetworkSnapshot,
    from: &str,
    to: &str,
) -> Result<(), Error> {
    write!(out, "{}", Header(snapshot))?;
    writeln!(out)?;
    write!(out, "{}", RouteList(snapshot))?;
    writeln!(out)?;

    let extrema = snapshot.extrema()?;
    write!(
        out,
        "{}",
        ExtremaReport {
            snapshot,
            extrema: &extrema,
        }
    )?;
    writeln!(out)?;
    write!(out, "{}", TransferReport(snapshot))?;
    writeln!(out)?;

    let path = snapshot.resolve_path(from, to)?;
    write!(
        out,
        "{}",
        PathReport {
            snapshot,
            path: &path,
        }
    )?;
    Ok(())
}

/// Header line with the snapshot time.
pub struct Header<'a>(pub &'a NetworkSnapshot);

impl fmt::Display for Header<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "MBTA rail network as of {}",
            self.0.fetched_at().format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

/// Long names of every route.
pub struct RouteList<'a>(pub &'a NetworkSnapshot);

impl fmt::Display for RouteList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let routes = self.0.routes();
        writeln!(f, "Routes ({}):", routes.len())?;
        for route in routes.iter() {
            writeln!(f, "  {}", route.long_name)?;
        }
        Ok(())
    }
}

/// The routes with the most and fewest stops, with the stops of the first
/// such trip in its direction of travel.
pub struct ExtremaReport<'a> {
    pub snapshot: &'a NetworkSnapshot,
    pub extrema: &'a Extrema,
}

impl ExtremaReport<'_> {
    fn trip(&self, f: &mut fmt::Formatter<'_>, label: &str, trips: &[TripId]) -> fmt::Result {
        let Some(trip) = trips.first() else {
            return Ok(());
        };
        let route_name = self
            .snapshot
            .route_for_trip(trip)
            .map(|r| r.long_name.as_str())
            .unwrap_or("unknown route");
        let stops = self.snapshot.sequences().get(trip);

        writeln!(
            f,
            "{label}: {route_name} ({} stops, trip {trip})",
            stops.map(|t| t.stops.len()).unwrap_or(0)
        )?;
        if trips.len() > 1 {
            writeln!(f, "  ({} trips tie)", trips.len())?;
        }
        if let Some(trip) = stops {
            for stop in &trip.stops {
                writeln!(f, "  {}", display_name(self.snapshot, stop, &trip.route_id))?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ExtremaReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.trip(f, "Most stops", &self.extrema.max_trips)?;
        self.trip(f, "Fewest stops", &self.extrema.min_trips)
    }
}

/// Transfer stations, grouped by parent station.
pub struct TransferReport<'a>(pub &'a NetworkSnapshot);

impl fmt::Display for TransferReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        let transfers = snapshot.transfers();
        writeln!(f, "Transfer stations ({}):", transfers.len())?;

        for station in transfers.iter() {
            let routes: Vec<&str> = station
                .routes
                .iter()
                .map(|r| route_name(snapshot, r))
                .collect();
            writeln!(f, "  {}: {}", station.parent_station, routes.join(", "))?;
            for key in &station.stops {
                writeln!(
                    f,
                    "    {} | {} | {}",
                    route_name(snapshot, &key.route_id),
                    key.display_name,
                    key.stop_id
                )?;
            }
        }
        Ok(())
    }
}

/// A resolved path between two stations.
pub struct PathReport<'a> {
    pub snapshot: &'a NetworkSnapshot,
    pub path: &'a Path,
}

impl fmt::Display for PathReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path;
        writeln!(
            f,
            "Path on {} (trip {}), {} stops:",
            route_name(self.snapshot, &path.route_id),
            path.trip_id,
            path.len()
        )?;
        for (i, stop) in path.stops.iter().enumerate() {
            writeln!(f, "  {:>2}. {}", i + 1, stop.display_name)?;
        }
        Ok(())
    }
}

fn route_name<'a>(snapshot: &'a NetworkSnapshot, route: &'a RouteId) -> &'a str {
    snapshot.routes().name_of(route).unwrap_or(route.as_str())
}

fn display_name<'a>(snapshot: &'a NetworkSnapshot, stop: &'a StopId, route: &RouteId) -> &'a str {
    let registry = snapshot.registry();
    registry
        .get(stop, route)
        .map(|e| e.key.display_name.as_str())
        .or_else(|| registry.display_name(stop))
        .unwrap_or(stop.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteType;
    use crate::mbta::MockMbtaClient;
    use crate::network::SnapshotOptions;

    async fn snapshot() -> NetworkSnapshot {
        let source = MockMbtaClient::new()
            .with_route("Red", "Red Line", RouteType::HeavyRail)
            .with_route("Mattapan", "Mattapan Trolley", RouteType::LightRail)
            .with_trip("Red", "R1", &["70094", "70096", "70061"])
            .with_trip("Mattapan", "M1", &["70261", "70094"])
            .with_stop("70094", "Ashmont - Red Line", Some("place-asmnl"))
            .with_stop("70096", "Shawmut - Red Line", Some("place-smmnl"))
            .with_stop("70061", "Alewife - Red Line", Some("place-alfcl"))
            .with_stop("70261", "Mattapan - Mattapan Trolley", Some("place-matt"));
        NetworkSnapshot::build(&source, &SnapshotOptions::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn route_list() {
        let snapshot = snapshot().await;
        assert_eq!(
            RouteList(&snapshot).to_string(),
            "Routes (2):\n  Red Line\n  Mattapan Trolley\n"
        );
    }

    #[tokio::test]
    async fn extrema_report() {
        let snapshot = snapshot().await;
        let extrema = snapshot.extrema().unwrap();

        let text = ExtremaReport {
            snapshot: &snapshot,
            extrema: &extrema,
        }
        .to_string();

        assert_eq!(
            text,
            "Most stops: Red Line (3 stops, trip R1)\n\
             \x20 Ashmont - Red Line\n\
             \x20 Shawmut - Red Line\n\
             \x20 Alewife - Red Line\n\
             Fewest stops: Mattapan Trolley (2 stops, trip M1)\n\
             \x20 Mattapan - Mattapan Trolley\n\
             \x20 Ashmont - Red Line\n"
        );
    }

    #[tokio::test]
    async fn transfer_report() {
        let snapshot = snapshot().await;
        let text = TransferReport(&snapshot).to_string();

        assert_eq!(
            text,
            "Transfer stations (1):\n\
             \x20 place-asmnl: Red Line, Mattapan Trolley\n\
             \x20   Red Line | Ashmont - Red Line | 70094\n\
             \x20   Mattapan Trolley | Ashmont - Red Line | 70094\n"
        );
    }

    #[tokio::test]
    async fn path_report() {
        let snapshot = snapshot().await;
        let path = snapshot.resolve_path("Alewife", "Ashmont").unwrap();

        let text = PathReport {
            snapshot: &snapshot,
            path: &path,
        }
        .to_string();

        assert_eq!(
            text,
            "Path on Red Line (trip R1), 3 stops:\n\
             \x20  1. Alewife - Red Line\n\
             \x20  2. Shawmut - Red Line\n\
             \x20  3. Ashmont - Red Line\n"
        );
    }

    #[tokio::test]
    async fn all_reports_in_order() {
        let snapshot = snapshot().await;
        let mut out = Vec::new();

        write_reports(&mut out, &snapshot, "Alewife", "Ashmont").unwrap();

        let text = String::from_utf8(out).unwrap();
        let routes = text.find("Routes (2):").unwrap();
        let most = text.find("Most stops:").unwrap();
        let transfers = text.find("Transfer stations (1):").unwrap();
        let path = text.find("Path on Red Line").unwrap();
        assert!(routes < most && most < transfers && transfers < path);
    }

    #[tokio::test]
    async fn failed_path_keeps_network_answers() {
        let snapshot = snapshot().await;
        let mut out = Vec::new();

        let err = write_reports(&mut out, &snapshot, "Alewife", "Mattapan").unwrap_err();

        assert!(matches!(
            err,
            Error::Query(crate::network::QueryError::PathNotFound { .. })
        ));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Routes (2):\n  Red Line\n  Mattapan Trolley\n"));
        assert!(text.contains("Most stops: Red Line"));
        assert!(text.contains("Transfer stations (1):"));
        assert!(!text.contains("Path on"));
    }

    #[tokio::test]
    async fn header_mentions_time() {
        let snapshot = snapshot().await;
        let text = Header(&snapshot).to_string();
        assert!(text.starts_with("MBTA rail network as of "));
        assert!(text.ends_with(" UTC\n"));
    }
}
