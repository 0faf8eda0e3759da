//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - A short-lived, file-backed cache of raw provider responses
//! - Decoding of OpenWeatherMap bodies and mapping into [`WeatherObservation`]
//! - Selection of the forecast slots belonging to one calendar day
//! - [`WeatherQueryService`], tying the above to an HTTP fetcher
//! - Configuration handling
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod cache;
pub mod config;
pub mod error;
pub mod mapper;
pub mod model;
pub mod provider;
pub mod service;
pub mod window;

pub use cache::ResponseCache;
pub use config::Config;
pub use error::{MappingError, TransportError, WeatherError};
pub use model::{Operation, SchemaKind, WeatherObservation};
pub use provider::{Fetch, HttpFetcher};
pub use service::WeatherQueryService;
pub use window::DayWindow;
