//! Identifier types for MBTA resources.
//!
//! MBTA identifiers are opaque strings ("Red", "70105", "place-brntn").
//! Each kind gets its own newtype so a trip id can never be passed where a
//! stop id is expected.

use std::fmt;

/// Error returned when parsing an empty or blank identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} id: must not be empty")]
pub struct InvalidId {
    kind: &'static str,
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Parse an identifier, rejecting empty or whitespace-only input.
            ///
            /// Surrounding whitespace is trimmed.
            pub fn parse(s: &str) -> Result<Self, InvalidId> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(InvalidId { kind: $kind });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// A route identifier, e.g. `Red` or `Green-B`.
    RouteId,
    "route"
);

string_id!(
    /// A trip identifier, e.g. `41527109`.
    TripId,
    "trip"
);

string_id!(
    /// A route-scoped stop (platform) identifier, e.g. `70105`.
    StopId,
    "stop"
);

string_id!(
    /// A parent station identifier, e.g. `place-brntn`.
    ///
    /// Parent stations group the platforms of one physical station, possibly
    /// across several routes.
    ParentStationId,
    "parent station"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_ids() {
        assert_eq!(RouteId::parse("Red").unwrap().as_str(), "Red");
        assert_eq!(TripId::parse("41527109").unwrap().as_str(), "41527109");
        assert_eq!(StopId::parse("70105").unwrap().as_str(), "70105");
        assert_eq!(
            ParentStationId::parse("place-brntn").unwrap().as_str(),
            "place-brntn"
        );
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(StopId::parse("  70038 ").unwrap().as_str(), "70038");
    }

    #[test]
    fn reject_empty() {
        assert!(RouteId::parse("").is_err());
        assert!(StopId::parse("   ").is_err());
    }

    #[test]
    fn error_names_kind() {
        let err = ParentStationId::parse("").unwrap_err();
        assert_eq!(err.to_string(), "invalid parent station id: must not be empty");
    }

    #[test]
    fn display_and_debug() {
        let stop = StopId::parse("70105").unwrap();
        assert_eq!(format!("{stop}"), "70105");
        assert_eq!(format!("{stop:?}"), "StopId(70105)");
    }
}
