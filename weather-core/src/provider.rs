use async_trait::async_trait;
use reqwest::{Client, Url};
use std::{fmt::Debug, time::Duration};
use tracing::debug;

use crate::error::TransportError;

pub mod openweather;

pub use openweather::{DEFAULT_BASE_URL, Endpoint};

/// Plain HTTP GET capability used by the query service.
#[async_trait]
pub trait Fetch: Send + Sync + Debug {
    /// GET `url` and return the body of a successful response.
    async fn get(&self, url: &Url) -> Result<String, TransportError>;
}

/// reqwest-backed [`Fetch`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    pub const TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new() -> Result<Self, TransportError> {
        let http = Client::builder().timeout(Self::TIMEOUT).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get(&self, url: &Url) -> Result<String, TransportError> {
        debug!(host = url.host_str().unwrap_or_default(), path = url.path(), "fetching from provider");

        let res = self.http.get(url.clone()).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
