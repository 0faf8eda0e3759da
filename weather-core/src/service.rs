//! Cache-then-fetch orchestration for the two public queries.

use anyhow::Context;
use chrono::Local;
use tracing::debug;

use crate::{
    cache::ResponseCache,
    config::Config,
    error::{MappingError, TransportError, WeatherError},
    mapper,
    model::{Operation, WeatherObservation},
    provider::{
        Endpoint, Fetch, HttpFetcher,
        openweather::{request_url, with_app_id},
    },
    window,
};

#[derive(Debug)]
pub struct WeatherQueryService<F = HttpFetcher> {
    fetcher: F,
    cache: ResponseCache,
    base_url: String,
    app_id: String,
}

impl<F: Fetch> WeatherQueryService<F> {
    pub fn new(fetcher: F, cache: ResponseCache, base_url: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            fetcher,
            cache,
            base_url: base_url.into(),
            app_id: app_id.into(),
        }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Weather right now at `location`.
    pub async fn current_weather(&self, location: &str) -> Result<WeatherObservation, WeatherError> {
        let op = Operation::Current;
        let body = self.resolve(op, location).await?;
        mapper::map_current(&body).map_err(|source| malformed(op, location, source))
    }

    /// Every forecast slot the provider returns for `location`.
    pub async fn forecast(&self, location: &str) -> Result<Vec<WeatherObservation>, WeatherError> {
        self.forecast_for(Operation::Forecast, location).await
    }

    /// Forecast slots falling on tomorrow's local calendar day.
    pub async fn next_day_forecast(&self, location: &str) -> Result<Vec<WeatherObservation>, WeatherError> {
        let all = self.forecast_for(Operation::Tomorrow, location).await?;
        let day = window::tomorrow(Local::now());

        let selected = window::select_day(&all, day);
        debug!(%location, %day, total = all.len(), selected = selected.len(), "selected forecast window");
        Ok(selected)
    }

    async fn forecast_for(&self, op: Operation, location: &str) -> Result<Vec<WeatherObservation>, WeatherError> {
        let body = self.resolve(op, location).await?;
        mapper::map_forecast(&body).map_err(|source| malformed(op, location, source))
    }

    /// Fresh cached body, or a fetched one written back to the cache.
    async fn resolve(&self, op: Operation, location: &str) -> Result<String, WeatherError> {
        let endpoint = match op {
            Operation::Current => Endpoint::Weather,
            Operation::Forecast | Operation::Tomorrow => Endpoint::Forecast,
        };

        let url = request_url(&self.base_url, endpoint, location).map_err(|source| {
            transport(
                op,
                location,
                TransportError::InvalidUrl { url: self.base_url.clone(), source },
            )
        })?;

        if let Some(body) = self.cache.get(url.as_str()) {
            debug!(%location, operation = %op, "serving response from cache");
            return Ok(body);
        }

        let body = self
            .fetcher
            .get(&with_app_id(&url, &self.app_id))
            .await
            .map_err(|source| transport(op, location, source))?;

        self.cache.put(url.as_str(), &body);
        Ok(body)
    }
}

impl WeatherQueryService<HttpFetcher> {
    /// Service backed by the real provider, with base URL and cache directory from `config`.
    pub fn from_config(config: &Config, app_id: impl Into<String>) -> anyhow::Result<Self> {
        let fetcher = HttpFetcher::new().context("Failed to build HTTP client")?;
        let cache = ResponseCache::new(config.cache_dir()?);
        Ok(Self::new(fetcher, cache, config.base_url(), app_id))
    }
}

fn transport(operation: Operation, location: &str, source: TransportError) -> WeatherError {
    WeatherError::Transport { operation, location: location.to_string(), source }
}

fn malformed(operation: Operation, location: &str, source: MappingError) -> WeatherError {
    WeatherError::MalformedResponse { operation, location: location.to_string(), source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reqwest::Url;
    use std::{
        fs::File,
        sync::Mutex,
        time::{Duration, SystemTime},
    };

    const BASE: &str = "http://weather.test/data/2.5";

    const CURRENT_RAIN: &str =
        r#"{"weather":[{"main":"Rain","description":"light rain","icon":"10d"}],"dt":1524473400}"#;
    const CURRENT_SUN: &str =
        r#"{"weather":[{"main":"Clear","description":"clear sky","icon":"01d"}],"dt":1524480000}"#;

    /// Serves canned bodies in order and records every URL requested.
    #[derive(Debug, Default)]
    struct FakeFetcher {
        bodies: Mutex<Vec<Result<String, TransportError>>>,
        requested: Mutex<Vec<String>>,
    }

    impl FakeFetcher {
        fn serving(bodies: Vec<Result<String, TransportError>>) -> Self {
            Self { bodies: Mutex::new(bodies), requested: Mutex::default() }
        }

        fn calls(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetch for FakeFetcher {
        async fn get(&self, url: &Url) -> Result<String, TransportError> {
            self.requested.lock().unwrap().push(url.to_string());
            let mut bodies = self.bodies.lock().unwrap();
            if bodies.is_empty() {
                return Err(TransportError::Status { status: 599, body: "no canned body".into() });
            }
            bodies.remove(0)
        }
    }

    fn service(dir: &tempfile::TempDir, bodies: Vec<Result<String, TransportError>>) -> WeatherQueryService<FakeFetcher> {
        WeatherQueryService::new(
            FakeFetcher::serving(bodies),
            ResponseCache::new(dir.path()),
            BASE,
            "KEY",
        )
    }

    fn cached_url(endpoint: Endpoint, location: &str) -> String {
        request_url(BASE, endpoint, location).unwrap().to_string()
    }

    #[tokio::test]
    async fn miss_fetches_with_app_id_and_stores_body() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir, vec![Ok(CURRENT_RAIN.into())]);

        let obs = svc.current_weather("London,uk").await.unwrap();

        assert_eq!(obs.description, "Rain");
        assert_eq!(obs.icon_code, "10d");
        assert_eq!(
            svc.fetcher.calls(),
            ["http://weather.test/data/2.5/weather?q=London%2Cuk&APPID=KEY"]
        );
        assert_eq!(svc.cache().get(&cached_url(Endpoint::Weather, "London,uk")).as_deref(), Some(CURRENT_RAIN));
    }

    #[tokio::test]
    async fn fresh_cache_entry_skips_the_network() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir, vec![Ok(CURRENT_RAIN.into()), Ok(CURRENT_SUN.into())]);

        let first = svc.current_weather("London,uk").await.unwrap();
        let second = svc.current_weather("London,uk").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(svc.fetcher.calls().len(), 1);
    }

    #[tokio::test]
    async fn stale_cache_entry_is_refetched_and_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir, vec![Ok(CURRENT_SUN.into())]);
        let url = cached_url(Endpoint::Weather, "London,uk");

        svc.cache().put(&url, CURRENT_RAIN);
        let file = File::options().write(true).open(svc.cache().entry_path(&url)).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(301)).unwrap();

        let obs = svc.current_weather("London,uk").await.unwrap();

        assert_eq!(obs.description, "Clear");
        assert_eq!(svc.fetcher.calls().len(), 1);
        assert_eq!(svc.cache().get(&url).as_deref(), Some(CURRENT_SUN));
    }

    #[tokio::test]
    async fn current_and_forecast_are_cached_separately() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir, vec![Ok(CURRENT_RAIN.into()), Ok(r#"{"list":[]}"#.into())]);

        svc.current_weather("London,uk").await.unwrap();
        let slots = svc.forecast("London,uk").await.unwrap();

        assert!(slots.is_empty());
        let calls = svc.fetcher.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[1].starts_with("http://weather.test/data/2.5/forecast?q=London%2Cuk"));
    }

    #[tokio::test]
    async fn transport_failure_carries_operation_and_location() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(
            &dir,
            vec![Err(TransportError::Status { status: 401, body: "Invalid API key".into() })],
        );

        let err = svc.current_weather("Glasgow,uk").await.unwrap_err();

        assert!(matches!(
            &err,
            WeatherError::Transport { source: TransportError::Status { status: 401, .. }, .. }
        ));
        assert_eq!(err.operation(), Operation::Current);
        assert_eq!(err.location(), "Glasgow,uk");
        assert_eq!(svc.cache().get(&cached_url(Endpoint::Weather, "Glasgow,uk")), None);
    }

    #[tokio::test]
    async fn malformed_body_fails_the_query() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir, vec![Ok(r#"{"weather":[],"dt":1}"#.into())]);

        let err = svc.current_weather("London,uk").await.unwrap_err();

        assert!(matches!(
            err,
            WeatherError::MalformedResponse { source: MappingError::EmptyConditions { .. }, .. }
        ));
    }

    #[tokio::test]
    async fn next_day_forecast_keeps_only_tomorrow() {
        let dir = tempfile::tempdir().unwrap();

        let tomorrow = window::tomorrow(Local::now());
        let win = window::DayWindow::for_day(tomorrow);
        let today_noon = (win.start - chrono::Duration::hours(12)).timestamp();
        let tomorrow_9 = (win.start + chrono::Duration::hours(9)).timestamp();
        let tomorrow_21 = (win.start + chrono::Duration::hours(21)).timestamp();
        let after = win.end.timestamp();

        let body = serde_json::json!({
            "city": {"name": "London", "country": "GB"},
            "list": [
                {"dt": today_noon, "weather": [{"main": "Clouds", "description": "few clouds", "icon": "02d"}]},
                {"dt": tomorrow_9, "weather": [{"main": "Rain", "description": "light rain", "icon": "10d"}]},
                {"dt": tomorrow_21, "weather": [{"main": "Clear", "description": "clear sky", "icon": "01n"}]},
                {"dt": after, "weather": [{"main": "Snow", "description": "snow", "icon": "13n"}]}
            ]
        });
        let svc = service(&dir, vec![Ok(body.to_string())]);

        let slots = svc.next_day_forecast("London,uk").await.unwrap();

        let icons: Vec<&str> = slots.iter().map(|o| o.icon_code.as_str()).collect();
        assert_eq!(icons, ["10d", "01n"]);
    }

    #[tokio::test]
    async fn invalid_base_url_is_a_transport_error() {
        let dir = tempfile::tempdir().unwrap();
        let svc = WeatherQueryService::new(
            FakeFetcher::default(),
            ResponseCache::new(dir.path()),
            "not a url",
            "KEY",
        );

        let err = svc.forecast("London,uk").await.unwrap_err();

        assert!(matches!(err, WeatherError::Transport { source: TransportError::InvalidUrl { .. }, .. }));
        assert!(svc.fetcher.calls().is_empty());
    }
}
