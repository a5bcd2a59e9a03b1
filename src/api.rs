//! weatherapi.com client

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::state::WeatherReading;
use crate::theme::FALLBACK_TEMPERATURE_C;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// Why a weather request produced no reading
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("API key not set")]
    MissingApiKey,
    #[error("Failed to fetch weather (HTTP {0}). Please ensure the location is correct.")]
    Status(u16),
    #[error("Could not fetch weather for this city: {0}")]
    Request(String),
    #[error("Could not read weather response: {0}")]
    Parse(String),
}

// ============================================================================
// Response payload
// ============================================================================

/// Body of `current.json`. Every field is optional so a partial body still
/// yields a reading.
#[derive(Debug, Deserialize)]
struct CurrentResponse {
    location: Option<LocationPayload>,
    current: Option<CurrentPayload>,
}

#[derive(Debug, Deserialize)]
struct LocationPayload {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    temp_c: Option<f32>,
    condition: Option<ConditionPayload>,
}

#[derive(Debug, Deserialize)]
struct ConditionPayload {
    text: Option<String>,
    icon: Option<String>,
}

/// Parse a `current.json` body. `city` names the reading when the body
/// carries no location.
pub fn parse_current(body: &str, city: &str) -> Result<WeatherReading, FetchError> {
    let data: CurrentResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    let location_name = data
        .location
        .and_then(|l| l.name)
        .unwrap_or_else(|| city.to_string());
    let (temp_c, condition) = match data.current {
        Some(current) => (current.temp_c, current.condition),
        None => (None, None),
    };
    let (condition_text, condition_icon) = match condition {
        Some(c) => (c.text.unwrap_or_default(), c.icon),
        None => (String::new(), None),
    };

    Ok(WeatherReading {
        location_name,
        temperature_c: temp_c.unwrap_or(FALLBACK_TEMPERATURE_C),
        condition_text,
        condition_icon,
    })
}

// ============================================================================
// Client
// ============================================================================

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl WeatherClient {
    /// A blank key counts as missing.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn current_url(&self, api_key: &str, city: &str) -> String {
        format!(
            "{}/current.json?key={}&q={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(api_key),
            urlencoding::encode(city)
        )
    }

    /// Fetch current conditions for `city`. Sends nothing without a key.
    #[instrument(skip(self))]
    pub async fn fetch_current(&self, city: &str) -> Result<WeatherReading, FetchError> {
        let api_key = self.api_key.as_deref().ok_or(FetchError::MissingApiKey)?;
        let url = self.current_url(api_key, city);

        debug!("requesting current conditions");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.without_url().to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), "response received");
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Request(e.without_url().to_string()))?;
        parse_current(&body, city).inspect_err(|e| warn!(error = %e, "unreadable body"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_body() {
        let body = r#"{
            "location": { "name": "Paris", "country": "France" },
            "current": {
                "temp_c": 22.0,
                "condition": {
                    "text": "Partly cloudy",
                    "icon": "//cdn.weatherapi.com/weather/64x64/day/116.png",
                    "code": 1003
                }
            }
        }"#;

        let reading = parse_current(body, "paris").unwrap();

        assert_eq!(
            reading,
            WeatherReading {
                location_name: "Paris".into(),
                temperature_c: 22.0,
                condition_text: "Partly cloudy".into(),
                condition_icon: Some("//cdn.weatherapi.com/weather/64x64/day/116.png".into()),
            }
        );
    }

    #[test]
    fn test_parse_missing_fields_uses_defaults() {
        let reading = parse_current(r#"{ "current": { "condition": {} } }"#, "Quito").unwrap();

        assert_eq!(reading.location_name, "Quito");
        assert_eq!(reading.temperature_c, FALLBACK_TEMPERATURE_C);
        assert_eq!(reading.condition_text, "");
        assert_eq!(reading.condition_icon, None);

        let reading = parse_current("{}", "Quito").unwrap();
        assert_eq!(reading.temperature_c, 20.0);
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(matches!(
            parse_current("<html>oops</html>", "Paris"),
            Err(FetchError::Parse(_))
        ));
        assert!(matches!(
            parse_current(r#"{ "current": { "temp_c": "warm" } }"#, "Paris"),
            Err(FetchError::Parse(_))
        ));
    }

    #[test]
    fn test_current_url_encodes_city() {
        let client = WeatherClient::new("https://api.weatherapi.com/v1/", Some("k3y".into()));

        assert_eq!(
            client.current_url("k3y", "São Paulo"),
            "https://api.weatherapi.com/v1/current.json?key=k3y&q=S%C3%A3o%20Paulo"
        );
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        assert!(!WeatherClient::new(DEFAULT_BASE_URL, None).has_api_key());
        assert!(!WeatherClient::new(DEFAULT_BASE_URL, Some("  ".into())).has_api_key());
        assert!(WeatherClient::new(DEFAULT_BASE_URL, Some("abc".into())).has_api_key());
    }

    #[tokio::test]
    async fn test_fetch_without_key_sends_nothing() {
        // Unroutable base URL: reaching the network would surface as Request.
        let client = WeatherClient::new("http://127.0.0.1:9", None);

        let result = client.fetch_current("Paris").await;

        assert_eq!(result, Err(FetchError::MissingApiKey));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(FetchError::MissingApiKey.to_string(), "API key not set");
        assert_eq!(
            FetchError::Status(404).to_string(),
            "Failed to fetch weather (HTTP 404). Please ensure the location is correct."
        );
    }
}
