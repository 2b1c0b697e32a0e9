//! Application configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `MBTA_API_KEY` | none (anonymous, rate limited) |
//! | `MBTA_BASE_URL` | `https://api-v3.mbta.com` |
//! | `MBTA_TIMEOUT_SECS` | 30 |
//! | `MBTA_TRIP_FILE` | `trip.txt` |
//! | `MBTA_ROUTE_ATTRIBUTION` | `all` |
//! | `MBTA_CACHE_TTL_SECS` | 3600 |
//! | `MBTA_CACHE_CAPACITY` | 10000 |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::mbta::MbtaConfig;
use crate::network::{RouteAttribution, SnapshotOptions};

/// Default trip request file.
const DEFAULT_TRIP_FILE: &str = "trip.txt";

/// Error reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set to a value that could not be parsed
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Everything the binary needs to run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mbta: MbtaConfig,
    pub cache: CacheConfig,
    pub trip_file: PathBuf,
    pub attribution: RouteAttribution,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through a lookup function. Unset and empty
    /// variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let mut mbta = MbtaConfig::new(get("MBTA_API_KEY"));
        if let Some(url) = get("MBTA_BASE_URL") {
            mbta = mbta.with_base_url(url);
        }
        if let Some(secs) = parse_var::<u64>(&get, "MBTA_TIMEOUT_SECS")? {
            mbta = mbta.with_timeout(secs);
        }

        let mut cache = CacheConfig::default();
        if let Some(secs) = parse_var::<u64>(&get, "MBTA_CACHE_TTL_SECS")? {
            cache.ttl = Duration::from_secs(secs);
        }
        if let Some(capacity) = parse_var::<u64>(&get, "MBTA_CACHE_CAPACITY")? {
            cache.max_capacity = capacity;
        }

        let trip_file = get("MBTA_TRIP_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TRIP_FILE));
        let attribution =
            parse_var::<RouteAttribution>(&get, "MBTA_ROUTE_ATTRIBUTION")?.unwrap_or_default();

        Ok(Self {
            mbta,
            cache,
            trip_file,
            attribution,
        })
    }

    /// Snapshot options for the configured attribution policy.
    pub fn snapshot_options(&self) -> SnapshotOptions {
        SnapshotOptions::default().with_attribution(self.attribution)
    }
}

fn parse_var<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match get(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mbta::DEFAULT_BASE_URL;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.mbta.api_key, None);
        assert_eq!(config.mbta.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.trip_file, PathBuf::from("trip.txt"));
        assert_eq!(config.attribution, RouteAttribution::AllRoutes);
        assert_eq!(config.cache.ttl, CacheConfig::default().ttl);
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("MBTA_API_KEY", "secret"),
            ("MBTA_BASE_URL", "http://localhost:8080"),
            ("MBTA_TIMEOUT_SECS", "5"),
            ("MBTA_TRIP_FILE", "/tmp/request.txt"),
            ("MBTA_ROUTE_ATTRIBUTION", "last"),
            ("MBTA_CACHE_TTL_SECS", "10"),
            ("MBTA_CACHE_CAPACITY", "50"),
        ])
        .unwrap();

        assert_eq!(config.mbta.api_key.as_deref(), Some("secret"));
        assert_eq!(config.mbta.base_url, "http://localhost:8080");
        assert_eq!(config.mbta.timeout_secs, 5);
        assert_eq!(config.trip_file, PathBuf::from("/tmp/request.txt"));
        assert_eq!(config.attribution, RouteAttribution::LastVisit);
        assert_eq!(config.cache.ttl, Duration::from_secs(10));
        assert_eq!(config.cache.max_capacity, 50);
        assert_eq!(
            config.snapshot_options().attribution,
            RouteAttribution::LastVisit
        );
    }

    #[test]
    fn empty_values_take_defaults() {
        let config = config(&[("MBTA_API_KEY", ""), ("MBTA_TRIP_FILE", "  ")]).unwrap();
        assert_eq!(config.mbta.api_key, None);
        assert_eq!(config.trip_file, PathBuf::from("trip.txt"));
    }

    #[test]
    fn invalid_values() {
        let err = config(&[("MBTA_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value for MBTA_TIMEOUT_SECS: \"soon\""
        );

        assert!(config(&[("MBTA_ROUTE_ATTRIBUTION", "most")]).is_err());
    }
}
