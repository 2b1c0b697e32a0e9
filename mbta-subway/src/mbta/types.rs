//! MBTA v3 API response DTOs.
//!
//! The API speaks JSON:API: every resource has an `id`, a `type`, an
//! `attributes` object and a `relationships` object whose entries wrap
//! resource identifiers in `data`. Relationships are frequently absent or
//! `null`, so they are modelled with `Option` and `#[serde(default)]`.

use serde::Deserialize;

/// A JSON:API resource identifier: `{"id": "70105", "type": "stop"}`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ResourceIdentifier {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A relationship entry. `data` is `null` or missing when the link is absent.
#[derive(Debug, Clone, Deserialize)]
pub struct Relationship<T> {
    pub data: Option<T>,
}

impl<T> Default for Relationship<T> {
    fn default() -> Self {
        Self { data: None }
    }
}

/// Response from `GET /routes`, optionally with `include=route_patterns`.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutesDocument {
    pub data: Vec<RouteResource>,

    /// Side-loaded resources; route patterns when requested.
    #[serde(default)]
    pub included: Vec<IncludedResource>,
}

/// A route resource.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResource {
    /// Route id, e.g. "Red".
    pub id: String,
    pub attributes: RouteAttributes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteAttributes {
    /// e.g. "Red Line".
    pub long_name: String,

    /// GTFS route type code.
    #[serde(rename = "type")]
    pub route_type: u8,
}

/// A side-loaded resource from the `included` array.
///
/// Only route patterns are requested, but other types are tolerated and
/// filtered out during conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct IncludedResource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub relationships: RoutePatternRelationships,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoutePatternRelationships {
    #[serde(default)]
    pub route: Relationship<ResourceIdentifier>,
    #[serde(default)]
    pub representative_trip: Relationship<ResourceIdentifier>,
}

/// Response from `GET /trips/{id}?include=stops`.
#[derive(Debug, Clone, Deserialize)]
pub struct TripDocument {
    pub data: TripResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripResource {
    pub id: String,
    #[serde(default)]
    pub relationships: TripRelationships,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripRelationships {
    /// Stops in travel order.
    #[serde(default)]
    pub stops: Relationship<Vec<ResourceIdentifier>>,
}

/// Response from `GET /stops/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StopDocument {
    pub data: StopResource,
}

/// Response from `GET /stops?filter[id]=...`.
#[derive(Debug, Clone, Deserialize)]
pub struct StopsDocument {
    pub data: Vec<StopResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopResource {
    pub id: String,
    #[serde(default)]
    pub attributes: StopAttributes,
    #[serde(default)]
    pub relationships: StopRelationships,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopAttributes {
    /// e.g. "Braintree - Red Line". Null for some non-rail stops.
    pub description: Option<String>,
    /// e.g. "Braintree".
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopRelationships {
    #[serde(default)]
    pub parent_station: Relationship<ResourceIdentifier>,
}
