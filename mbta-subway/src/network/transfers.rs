//! Transfer stations: parent stations served by two or more routes.

use std::collections::HashMap;

use crate::domain::{ParentStationId, RouteId, StopKey};

use super::registry::StopRegistry;

/// Minimum number of distinct routes for a parent station to be a transfer.
const MIN_TRANSFER_ROUTES: usize = 2;

/// A parent station shared by several routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferStation {
    pub parent_station: ParentStationId,
    /// Distinct routes, in encounter order.
    pub routes: Vec<RouteId>,
    /// Every registered stop under this station, in encounter order.
    pub stops: Vec<StopKey>,
}

/// Index of transfer stations, grouped by parent station.
#[derive(Debug, Clone, Default)]
pub struct TransferIndex {
    stations: Vec<TransferStation>,
    by_parent: HashMap<ParentStationId, usize>,
}

impl TransferIndex {
    /// Group registry entries by parent station and keep the groups with at
    /// least two distinct routes. Stops without a parent station are ignored.
    pub fn from_registry(registry: &StopRegistry) -> Self {
        let mut groups: Vec<TransferStation> = Vec::new();
        let mut position: HashMap<&ParentStationId, usize> = HashMap::new();

        for entry in registry.iter() {
            let Some(parent) = entry.parent_station.as_ref() else {
                continue;
            };

            let slot = *position.entry(parent).or_insert_with(|| {
                groups.push(TransferStation {
                    parent_station: parent.clone(),
                    routes: Vec::new(),
                    stops: Vec::new(),
                });
                groups.len() - 1
            });

            let group = &mut groups[slot];
            if !group.routes.contains(&entry.key.route_id) {
                group.routes.push(entry.key.route_id.clone());
            }
            group.stops.push(entry.key.clone());
        }

        let stations: Vec<TransferStation> = groups
            .into_iter()
            .filter(|g| g.routes.len() >= MIN_TRANSFER_ROUTES)
            .collect();
        let by_parent = stations
            .iter()
            .enumerate()
            .map(|(i, s)| (s.parent_station.clone(), i))
            .collect();

        Self {
            stations,
            by_parent,
        }
    }

    /// Whether a parent station is a transfer station.
    pub fn is_transfer(&self, parent: &ParentStationId) -> bool {
        self.by_parent.contains_key(parent)
    }

    /// Routes serving a transfer station; empty for non-transfer stations.
    pub fn routes_at(&self, parent: &ParentStationId) -> &[RouteId] {
        self.get(parent).map(|s| s.routes.as_slice()).unwrap_or(&[])
    }

    pub fn get(&self, parent: &ParentStationId) -> Option<&TransferStation> {
        self.by_parent.get(parent).map(|&i| &self.stations[i])
    }

    /// Transfer stations in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = &TransferStation> {
        self.stations.iter()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
