//! MBTA v3 HTTP client.
//!
//! Provides async methods for the handful of endpoints the network model
//! needs. Handles authentication, status mapping, and conversion to domain
//! types. Requests are issued one at a time; there is no retry.

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::domain::{Route, RoutePattern, RouteType, StopId, StopRecord, TripId};
use crate::network::NetworkSource;

use super::convert::{
    ConversionError, convert_route, convert_route_patterns, convert_stop, convert_trip_stops,
};
use super::error::MbtaError;
use super::types::{RoutesDocument, StopDocument, StopsDocument, TripDocument};

/// Default base URL for the MBTA v3 API.
pub const DEFAULT_BASE_URL: &str = "https://api-v3.mbta.com";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// JSON:API media type.
const JSON_API: &str = "application/vnd.api+json";

/// Maximum number of body characters kept in parse errors.
const ERROR_BODY_CHARS: usize = 500;

/// Configuration for the MBTA client.
#[derive(Debug, Clone)]
pub struct MbtaConfig {
    /// API key sent as `x-api-key`. The API works without one at a lower
    /// rate limit.
    pub api_key: Option<String>,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MbtaConfig {
    /// Create a new config with an optional API key.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for MbtaConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

/// MBTA v3 API client.
#[derive(Debug, Clone)]
pub struct MbtaClient {
    http: reqwest::Client,
    base_url: String,
}

impl MbtaClient {
    /// Create a new client with the given configuration.
    pub fn new(config: MbtaConfig) -> Result<Self, MbtaError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_API));

        if let Some(key) = config.api_key.as_deref().filter(|k| !k.is_empty()) {
            let value = HeaderValue::from_str(key)
                .map_err(|_| MbtaError::InvalidConfig("invalid API key format".to_string()))?;
            headers.insert(HeaderName::from_static("x-api-key"), value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Issue a GET and parse the JSON:API document.
    async fn get_document<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, MbtaError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, ?query, "MBTA request");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        trace!(%url, status = status.as_u16(), "MBTA response");

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(MbtaError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MbtaError::RateLimited);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(MbtaError::NotFound(path.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MbtaError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| MbtaError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(ERROR_BODY_CHARS).collect()),
        })
    }

    /// Fetch routes of the given types, with their route patterns side-loaded.
    async fn get_routes(
        &self,
        types: &[RouteType],
        include_patterns: bool,
    ) -> Result<RoutesDocument, MbtaError> {
        let mut query = vec![("filter[type]", RouteType::filter_value(types))];
        if include_patterns {
            query.push(("include", "route_patterns".to_string()));
        }
        self.get_document("/routes", &query).await
    }
}

fn conversion_failed(e: ConversionError) -> MbtaError {
    MbtaError::Json {
        message: e.to_string(),
        body: None,
    }
}

impl NetworkSource for MbtaClient {
    async fn list_routes(&self, types: &[RouteType]) -> Result<Vec<Route>, MbtaError> {
        let doc = self.get_routes(types, false).await?;
        doc.data
            .iter()
            .map(convert_route)
            .collect::<Result<_, _>>()
            .map_err(conversion_failed)
    }

    async fn list_route_patterns(
        &self,
        types: &[RouteType],
    ) -> Result<Vec<RoutePattern>, MbtaError> {
        let doc = self.get_routes(types, true).await?;
        convert_route_patterns(&doc.included).map_err(conversion_failed)
    }

    async fn trip_stops(&self, trip: &TripId) -> Result<Vec<StopId>, MbtaError> {
        let path = format!("/trips/{}", trip.as_str());
        let doc: TripDocument = self
            .get_document(&path, &[("include", "stops".to_string())])
            .await?;
        convert_trip_stops(&doc.data).map_err(conversion_failed)
    }

    async fn stop(&self, id: &StopId) -> Result<StopRecord, MbtaError> {
        let path = format!("/stops/{}", id.as_str());
        let doc: StopDocument = self.get_document(&path, &[]).await?;
        convert_stop(&doc.data).map_err(conversion_failed)
    }

    async fn stops(&self, ids: &[StopId]) -> Result<Vec<StopRecord>, MbtaError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let filter = ids
            .iter()
            .map(StopId::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let doc: StopsDocument = self
            .get_document("/stops", &[("filter[id]", filter)])
            .await?;

        doc.data
            .iter()
            .map(convert_stop)
            .collect::<Result<_, _>>()
            .map_err(conversion_failed)
    }
}
