//! GraphHopper routing client.

use tracing::debug;

use crate::domain::GeoPoint;
use crate::hazard::HazardZone;

use super::error::RoutingError;
use super::types::{Route, RouteResponseDto, convert_response};

/// Default base URL for the GraphHopper routing API.
const DEFAULT_BASE_URL: &str = "https://graphhopper.com/api/1";

/// Configuration for the routing client.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RoutingConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Client for the GraphHopper routing API.
#[derive(Debug, Clone)]
pub struct RoutingClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RoutingClient {
    /// Create a new routing client.
    pub fn new(config: RoutingConfig) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Fetch a route from `from` to `to`.
    ///
    /// When `avoid` is set, the provider is asked to keep the path outside
    /// the hazard polygon. Geometry is requested unencoded so coordinates
    /// come back as plain `[lon, lat]` pairs.
    pub async fn route(
        &self,
        from: &GeoPoint,
        to: &GeoPoint,
        avoid: Option<&HazardZone>,
    ) -> Result<Route, RoutingError> {
        let url = format!("{}/route", self.base_url);

        let mut params: Vec<(&str, String)> = vec![
            ("point", from.to_string()),
            ("point", to.to_string()),
            ("points_encoded", "false".to_string()),
            ("key", self.api_key.clone()),
        ];
        if let Some(zone) = avoid {
            params.push(("avoid", zone.avoid_parameter()));
        }

        debug!(%from, %to, avoiding = avoid.is_some(), "requesting route");

        let response = self.http.get(&url).query(&params).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(RoutingError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RoutingError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let dto: RouteResponseDto = serde_json::from_str(&body).map_err(|e| RoutingError::Json {
            message: e.to_string(),
        })?;

        convert_response(dto)
    }
}
