use std::{io, path::PathBuf};

use thiserror::Error;

use crate::model::{Operation, SchemaKind};

/// Failure of a public query operation.
///
/// Cache faults never show up here: the cache only ever degrades to a miss.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("{operation} request for '{location}' failed")]
    Transport {
        operation: Operation,
        location: String,
        #[source]
        source: TransportError,
    },

    #[error("{operation} response for '{location}' could not be read")]
    MalformedResponse {
        operation: Operation,
        location: String,
        #[source]
        source: MappingError,
    },
}

impl WeatherError {
    pub fn operation(&self) -> Operation {
        match self {
            WeatherError::Transport { operation, .. }
            | WeatherError::MalformedResponse { operation, .. } => *operation,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            WeatherError::Transport { location, .. }
            | WeatherError::MalformedResponse { location, .. } => location,
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid request URL '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to reach weather provider")]
    Request(#[from] reqwest::Error),

    #[error("weather provider returned status {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("{schema} response is not valid JSON for the expected schema")]
    Json {
        schema: SchemaKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("{schema} response has an empty weather condition list{}", slot_suffix(.slot))]
    EmptyConditions {
        schema: SchemaKind,
        slot: Option<usize>,
    },
}

fn slot_suffix(slot: &Option<usize>) -> String {
    slot.map(|i| format!(" (forecast slot {i})")).unwrap_or_default()
}

/// Local cache store failures. Recovered inside [`crate::cache::ResponseCache`].
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to read cache entry {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write cache entry {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
