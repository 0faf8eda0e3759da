//! OpenWeatherMap request URLs and response bodies.
//!
//! The DTOs here only mirror the provider's JSON. Conversion into
//! [`crate::model::WeatherObservation`] lives in [`crate::mapper`].

use reqwest::Url;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Weather,
    Forecast,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Weather => "weather",
            Endpoint::Forecast => "forecast",
        }
    }
}

/// `{base_url}/{endpoint}?q={location}`, without credentials.
///
/// This is the URL the response cache is keyed on.
pub fn request_url(base_url: &str, endpoint: Endpoint, location: &str) -> Result<Url, url::ParseError> {
    let base = base_url.trim_end_matches('/');
    Url::parse_with_params(&format!("{base}/{}", endpoint.path()), &[("q", location)])
}

/// The request URL with the `APPID` credential appended.
pub fn with_app_id(url: &Url, app_id: &str) -> Url {
    let mut url = url.clone();
    url.query_pairs_mut().append_pair("APPID", app_id);
    url
}

#[derive(Debug, Deserialize)]
pub struct OwCondition {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

/// `/weather` body. Coordinates, main readings, wind, clouds, rain and snow
/// are present upstream but not needed.
#[derive(Debug, Deserialize)]
pub struct OwCurrentResponse {
    #[serde(default)]
    pub weather: Vec<OwCondition>,
    pub dt: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct OwForecastEntry {
    pub dt: Option<i64>,
    #[serde(default)]
    pub weather: Vec<OwCondition>,
}

/// `/forecast` body: three-hourly slots under `list` (older payloads used `forecasts`).
/// The `city` wrapper is not needed.
#[derive(Debug, Deserialize)]
pub struct OwForecastResponse {
    #[serde(alias = "forecasts")]
    pub list: Vec<OwForecastEntry>,
}
