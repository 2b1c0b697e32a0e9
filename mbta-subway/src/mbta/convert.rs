//! Conversion from MBTA DTOs to domain types.

use crate::domain::{
    ParentStationId, Route, RouteId, RoutePattern, RouteType, StopId, StopRecord, TripId,
};

use super::types::{IncludedResource, RouteResource, StopResource, TripResource};

/// JSON:API type name of route pattern resources.
const ROUTE_PATTERN_TYPE: &str = "route_pattern";

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// An identifier was empty
    #[error("invalid {kind} id: {value:?}")]
    InvalidId { kind: &'static str, value: String },

    /// Route type code outside the GTFS range
    #[error("unknown route type {0}")]
    UnknownRouteType(u8),

    /// Missing required field
    #[error("missing required field {field} on {resource}")]
    MissingField {
        field: &'static str,
        resource: String,
    },
}

/// Convert a route resource.
pub fn convert_route(resource: &RouteResource) -> Result<Route, ConversionError> {
    let id = RouteId::parse(&resource.id).map_err(|_| ConversionError::InvalidId {
        kind: "route",
        value: resource.id.clone(),
    })?;
    let route_type = RouteType::from_code(resource.attributes.route_type)
        .ok_or(ConversionError::UnknownRouteType(resource.attributes.route_type))?;

    Ok(Route::new(id, resource.attributes.long_name.clone(), route_type))
}

/// Extract route patterns from a routes document's `included` array.
///
/// Resources of other types are ignored. A route pattern without a route or
/// representative trip is an error.
pub fn convert_route_patterns(
    included: &[IncludedResource],
) -> Result<Vec<RoutePattern>, ConversionError> {
    included
        .iter()
        .filter(|r| r.kind == ROUTE_PATTERN_TYPE)
        .map(|r| {
            let route = r
                .relationships
                .route
                .data
                .as_ref()
                .ok_or_else(|| ConversionError::MissingField {
                    field: "route",
                    resource: r.id.clone(),
                })?;
            let trip = r
                .relationships
                .representative_trip
                .data
                .as_ref()
                .ok_or_else(|| ConversionError::MissingField {
                    field: "representative_trip",
                    resource: r.id.clone(),
                })?;

            Ok(RoutePattern {
                route_id: RouteId::parse(&route.id).map_err(|_| ConversionError::InvalidId {
                    kind: "route",
                    value: route.id.clone(),
                })?,
                representative_trip_id: TripId::parse(&trip.id).map_err(|_| {
                    ConversionError::InvalidId {
                        kind: "trip",
                        value: trip.id.clone(),
                    }
                })?,
            })
        })
        .collect()
}

/// Extract the ordered stop ids of a trip.
///
/// Order is taken as-is from the response: it is the travel order.
pub fn convert_trip_stops(trip: &TripResource) -> Result<Vec<StopId>, ConversionError> {
    let stops = trip
        .relationships
        .stops
        .data
        .as_ref()
        .ok_or_else(|| ConversionError::MissingField {
            field: "stops",
            resource: trip.id.clone(),
        })?;

    stops
        .iter()
        .map(|s| {
            StopId::parse(&s.id).map_err(|_| ConversionError::InvalidId {
                kind: "stop",
                value: s.id.clone(),
            })
        })
        .collect()
}

/// Convert a stop resource.
///
/// The display name is the `description`, falling back to `name` when the
/// description is null or blank.
pub fn convert_stop(resource: &StopResource) -> Result<StopRecord, ConversionError> {
    let id = StopId::parse(&resource.id).map_err(|_| ConversionError::InvalidId {
        kind: "stop",
        value: resource.id.clone(),
    })?;

    let attributes = &resource.attributes;
    let name = attributes.name.as_deref().filter(|n| !n.trim().is_empty());
    let description = attributes
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .or(name)
        .ok_or_else(|| ConversionError::MissingField {
            field: "description",
            resource: resource.id.clone(),
        })?;

    let parent_station = match &resource.relationships.parent_station.data {
        Some(parent) => Some(ParentStationId::parse(&parent.id).map_err(|_| {
            ConversionError::InvalidId {
                kind: "parent station",
                value: parent.id.clone(),
            }
        })?),
        None => None,
    };

    let record = StopRecord::new(id, description, parent_station);
    Ok(match name {
        Some(name) => record.with_name(name),
        None => record,
    })
}
