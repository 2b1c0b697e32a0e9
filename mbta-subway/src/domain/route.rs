//! Routes and route patterns.

use std::fmt;

use super::ids::{RouteId, TripId};

/// GTFS route type, as reported in the `type` attribute of MBTA routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RouteType {
    /// Streetcar / light rail (Green Line, Mattapan Trolley).
    LightRail,
    /// Subway / heavy rail (Red, Orange, Blue).
    HeavyRail,
    CommuterRail,
    Bus,
    Ferry,
}

/// The route types that make up the subway network.
pub const RAIL_TYPES: [RouteType; 2] = [RouteType::LightRail, RouteType::HeavyRail];

impl RouteType {
    /// The numeric code used by `filter[type]`.
    pub fn code(self) -> u8 {
        match self {
            RouteType::LightRail => 0,
            RouteType::HeavyRail => 1,
            RouteType::CommuterRail => 2,
            RouteType::Bus => 3,
            RouteType::Ferry => 4,
        }
    }

    /// Map a numeric code back to a route type.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(RouteType::LightRail),
            1 => Some(RouteType::HeavyRail),
            2 => Some(RouteType::CommuterRail),
            3 => Some(RouteType::Bus),
            4 => Some(RouteType::Ferry),
            _ => None,
        }
    }

    /// Format a set of types as a `filter[type]` value, e.g. `"0,1"`.
    pub fn filter_value(types: &[RouteType]) -> String {
        types
            .iter()
            .map(|t| t.code().to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RouteType::LightRail => "light rail",
            RouteType::HeavyRail => "heavy rail",
            RouteType::CommuterRail => "commuter rail",
            RouteType::Bus => "bus",
            RouteType::Ferry => "ferry",
        };
        f.write_str(name)
    }
}

/// A rail line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub id: RouteId,
    /// Display name, e.g. "Red Line".
    pub long_name: String,
    pub route_type: RouteType,
}

impl Route {
    pub fn new(id: RouteId, long_name: impl Into<String>, route_type: RouteType) -> Self {
        Self {
            id,
            long_name: long_name.into(),
            route_type,
        }
    }
}

/// A route pattern's link between a route and its representative trip.
///
/// A route usually has several patterns (one per direction and branch
/// variant), so several of these share a `route_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    pub route_id: RouteId,
    pub representative_trip_id: TripId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_roundtrip() {
        for t in [
            RouteType::LightRail,
            RouteType::HeavyRail,
            RouteType::CommuterRail,
            RouteType::Bus,
            RouteType::Ferry,
        ] {
            assert_eq!(RouteType::from_code(t.code()), Some(t));
        }
        assert_eq!(RouteType::from_code(7), None);
    }

    #[test]
    fn rail_filter_value() {
        assert_eq!(RouteType::filter_value(&RAIL_TYPES), "0,1");
        assert_eq!(RouteType::filter_value(&[]), "");
    }
}
