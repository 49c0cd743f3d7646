//! Nominatim geocoding client.

use serde::Deserialize;
use tracing::debug;

use crate::domain::GeoPoint;

use super::error::GeocodeError;
use super::{Geocoder, Suggestion};

/// Default base URL for the Nominatim search API.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Queries shorter than this return no suggestions without hitting the
/// provider; they are too ambiguous to geocode usefully.
pub const MIN_QUERY_LEN: usize = 3;

/// A place as returned by Nominatim. Coordinates arrive as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDto {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
}

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct GeocodeConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent sent with every request (Nominatim requires one)
    pub user_agent: String,
}

impl GeocodeConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: concat!("fireside-server/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Client for the Nominatim search API.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeocodeClient {
    /// Create a new geocoding client.
    pub fn new(config: GeocodeConfig) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    async fn fetch(&self, query: &str) -> Result<Vec<Suggestion>, GeocodeError> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("format", "json"), ("q", query)])
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let places: Vec<PlaceDto> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
            })?;

        Ok(convert_places(places))
    }
}

impl Geocoder for GeocodeClient {
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, GeocodeError> {
        self.fetch(query).await
    }
}

/// Convert provider places into validated suggestions.
///
/// Places with unparseable or out-of-range coordinates are dropped; a bad
/// hit in the provider's list must not fail the whole query.
fn convert_places(places: Vec<PlaceDto>) -> Vec<Suggestion> {
    let total = places.len();

    let suggestions: Vec<Suggestion> = places
        .into_iter()
        .filter_map(|place| {
            let lat = place.lat.parse::<f64>().ok()?;
            let lon = place.lon.parse::<f64>().ok()?;
            let point = GeoPoint::new(lat, lon).ok()?;
            Some(Suggestion {
                point,
                label: place.display_name,
            })
        })
        .collect();

    if suggestions.len() < total {
        debug!(
            dropped = total - suggestions.len(),
            "dropped geocoder hits with invalid coordinates"
        );
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(name: &str, lat: &str, lon: &str) -> PlaceDto {
        PlaceDto {
            display_name: name.to_string(),
            lat: lat.to_string(),
            lon: lon.to_string(),
        }
    }

    #[test]
    fn config_defaults() {
        let config = GeocodeConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("fireside-server/"));
    }

    #[test]
    fn config_with_base_url() {
        let config = GeocodeConfig::default().with_base_url("http://localhost:8080");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn convert_parses_string_coordinates() {
        let suggestions = convert_places(vec![place(
            "Los Angeles, California",
            "34.0522",
            "-118.2437",
        )]);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].label, "Los Angeles, California");
        assert_eq!(suggestions[0].point.latitude(), 34.0522);
        assert_eq!(suggestions[0].point.longitude(), -118.2437);
    }

    #[test]
    fn convert_drops_unparseable_coordinates() {
        let suggestions = convert_places(vec![
            place("good", "34.0522", "-118.2437"),
            place("not a number", "north-ish", "-118.2437"),
            place("out of range", "134.0", "-118.2437"),
        ]);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].label, "good");
    }

    #[test]
    fn nominatim_response_parses() {
        let body = r#"[
            {
                "display_name": "Los Angeles, Los Angeles County, California, United States",
                "lat": "34.0536909",
                "lon": "-118.242766",
                "place_id": 287781008,
                "type": "city"
            }
        ]"#;

        let places: Vec<PlaceDto> = serde_json::from_str(body).unwrap();
        assert_eq!(places.len(), 1);

        let suggestions = convert_places(places);
        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].label.starts_with("Los Angeles"));
    }
}
