//! Station name lookup.
//!
//! Stations are keyed by normalized name. A query resolves to exactly one
//! station or fails; overlapping names are reported as ambiguous instead of
//! being disambiguated by iteration order.

use std::collections::HashMap;

use crate::domain::{RouteId, StopId};

use super::error::QueryError;
use super::registry::StopRegistry;

/// A route-scoped stop belonging to a named station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub stop_id: StopId,
    pub route_id: RouteId,
}

/// All platforms registered under one station name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    /// Name as first seen, e.g. "Kendall/MIT".
    pub name: String,
    /// Platforms in registry order.
    pub platforms: Vec<Platform>,
}

impl Station {
    /// Distinct stop ids of the station's platforms.
    pub fn stop_ids(&self) -> Vec<StopId> {
        let mut ids: Vec<StopId> = Vec::with_capacity(self.platforms.len());
        for platform in &self.platforms {
            if !ids.contains(&platform.stop_id) {
                ids.push(platform.stop_id.clone());
            }
        }
        ids
    }
}

/// Normalize a station name for lookup: trim, collapse whitespace, lowercase.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Canonical station index keyed by normalized name.
#[derive(Debug, Clone, Default)]
pub struct StationIndex {
    stations: Vec<Station>,
    by_name: HashMap<String, usize>,
}

impl StationIndex {
    pub fn from_registry(registry: &StopRegistry) -> Self {
        let mut index = Self::default();

        for entry in registry.iter() {
            let key = normalize_name(&entry.station_name);
            if key.is_empty() {
                continue;
            }

            let slot = match index.by_name.get(&key) {
                Some(&i) => i,
                None => {
                    index.by_name.insert(key, index.stations.len());
                    index.stations.push(Station {
                        name: entry.station_name.trim().to_string(),
                        platforms: Vec::new(),
                    });
                    index.stations.len() - 1
                }
            };

            index.stations[slot].platforms.push(Platform {
                stop_id: entry.key.stop_id.clone(),
                route_id: entry.key.route_id.clone(),
            });
        }

        index
    }

    /// Resolve a free-text station name.
    ///
    /// An exact (normalized) match wins. Otherwise the query must be a
    /// substring of exactly one station name.
    pub fn resolve(&self, query: &str) -> Result<&Station, QueryError> {
        let key = normalize_name(query);
        if key.is_empty() {
            return Err(QueryError::StationNotFound(query.to_string()));
        }

        if let Some(&i) = self.by_name.get(&key) {
            return Ok(&self.stations[i]);
        }

        let matches: Vec<&Station> = self
            .stations
            .iter()
            .filter(|s| normalize_name(&s.name).contains(&key))
            .collect();

        match matches.as_slice() {
            [] => Err(QueryError::StationNotFound(query.to_string())),
            [station] => Ok(*station),
            _ => Err(QueryError::AmbiguousStation {
                query: query.to_string(),
                candidates: matches.iter().map(|s| s.name.clone()).collect(),
            }),
        }
    }

    /// Resolve a station name to its first platform's `(stop, route)`.
    pub fn resolve_stop_and_route(&self, query: &str) -> Result<(StopId, RouteId), QueryError> {
        let station = self.resolve(query)?;
        station
            .platforms
            .first()
            .map(|p| (p.stop_id.clone(), p.route_id.clone()))
            .ok_or_else(|| QueryError::StationNotFound(query.to_string()))
    }

    /// Exact lookup by normalized name.
    pub fn get(&self, name: &str) -> Option<&Station> {
        self.by_name
            .get(&normalize_name(name))
            .map(|&i| &self.stations[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StopRecord;
    use crate::network::registry::Attribution;

    fn index(rows: &[(&str, &str, &str)]) -> StationIndex {
        let mut attribution = Attribution::default();
        let mut records = Vec::new();
        for (id, description, route) in rows {
            let stop = StopId::parse(id).unwrap();
            attribution.stop_ids.push(stop.clone());
            attribution
                .routes
                .insert(stop.clone(), vec![RouteId::parse(route).unwrap()]);
            records.push(StopRecord::new(stop, *description, None));
        }
        let registry = StopRegistry::from_records(records, &attribution).unwrap();
        StationIndex::from_registry(&registry)
    }

    fn sample() -> StationIndex {
        index(&[
            ("70063", "Davis - Red Line - Ashmont/Braintree", "Red"),
            ("70064", "Davis - Red Line - Alewife", "Red"),
            ("70072", "Kendall/MIT - Red Line - Ashmont/Braintree", "Red"),
            ("70075", "Park Street - Red Line - Ashmont/Braintree", "Red"),
            ("70200", "Park Street - Green Line - Westbound", "Green-B"),
            ("70150", "Fenway Park - Green Line", "Green-D"),
        ])
    }

    #[test]
    fn normalize() {
        assert_eq!(normalize_name("  Park   Street "), "park street");
        assert_eq!(normalize_name("Kendall/MIT"), "kendall/mit");
        assert_eq!(normalize_name("   "), "");
    }

    #[test]
    fn groups_platforms_by_name() {
        let index = sample();
        assert_eq!(index.len(), 4);

        let davis = index.get("davis").unwrap();
        assert_eq!(davis.platforms.len(), 2);

        let park = index.get("Park Street").unwrap();
        let routes: Vec<&str> = park.platforms.iter().map(|p| p.route_id.as_str()).collect();
        assert_eq!(routes, ["Red", "Green-B"]);
    }

    #[test]
    fn substring_match_resolves_unique_station() {
        let index = sample();
        assert_eq!(index.resolve("Kendall").unwrap().name, "Kendall/MIT");
        assert_eq!(index.resolve("DAVIS").unwrap().name, "Davis");
    }

    #[test]
    fn exact_match_beats_substring() {
        let index = index(&[
            ("70067", "Harvard - Red Line - Ashmont/Braintree", "Red"),
            ("70130", "Harvard Avenue - Green Line - Boston College", "Green-B"),
        ]);
        assert_eq!(index.resolve("Harvard").unwrap().name, "Harvard");
        assert_eq!(index.resolve("harvard ave").unwrap().name, "Harvard Avenue");
    }

    #[test]
    fn ambiguous_substring_is_error() {
        let index = sample();
        let err = index.resolve("Park").unwrap_err();
        assert_eq!(
            err,
            QueryError::AmbiguousStation {
                query: "Park".into(),
                candidates: vec!["Park Street".into(), "Fenway Park".into()],
            }
        );
    }

    #[test]
    fn unknown_and_blank_names_not_found() {
        let index = sample();
        assert_eq!(
            index.resolve("Wonderland").unwrap_err(),
            QueryError::StationNotFound("Wonderland".into())
        );
        assert!(matches!(
            index.resolve("  "),
            Err(QueryError::StationNotFound(_))
        ));
    }

    #[test]
    fn resolve_to_first_platform() {
        let index = sample();
        let (stop, route) = index.resolve_stop_and_route("Davis").unwrap();
        assert_eq!(stop.as_str(), "70063");
        assert_eq!(route.as_str(), "Red");
    }

    #[test]
    fn stop_ids_are_distinct() {
        let station = Station {
            name: "Kenmore".into(),
            platforms: vec![
                Platform {
                    stop_id: StopId::parse("71151").unwrap(),
                    route_id: RouteId::parse("Green-B").unwrap(),
                },
                Platform {
                    stop_id: StopId::parse("71151").unwrap(),
                    route_id: RouteId::parse("Green-C").unwrap(),
                },
            ],
        };
        assert_eq!(station.stop_ids(), [StopId::parse("71151").unwrap()]);
    }
}
