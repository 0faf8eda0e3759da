//! Raw provider body -> [`WeatherObservation`].

use chrono::{DateTime, Local};

use crate::{
    error::MappingError,
    model::{SchemaKind, WeatherObservation},
    provider::openweather::{OwCondition, OwCurrentResponse, OwForecastResponse},
};

/// Normalize a raw body of the given shape.
///
/// The current-weather shape always yields exactly one observation; the
/// forecast shape yields one per slot, in provider order.
pub fn map(raw: &str, kind: SchemaKind) -> Result<Vec<WeatherObservation>, MappingError> {
    match kind {
        SchemaKind::Current => map_current(raw).map(|obs| vec![obs]),
        SchemaKind::Forecast => map_forecast(raw),
    }
}

pub fn map_current(raw: &str) -> Result<WeatherObservation, MappingError> {
    let parsed: OwCurrentResponse = serde_json::from_str(raw)
        .map_err(|source| MappingError::Json { schema: SchemaKind::Current, source })?;

    let condition = parsed
        .weather
        .first()
        .ok_or(MappingError::EmptyConditions { schema: SchemaKind::Current, slot: None })?;

    Ok(observation(condition, parsed.dt))
}

pub fn map_forecast(raw: &str) -> Result<Vec<WeatherObservation>, MappingError> {
    let parsed: OwForecastResponse = serde_json::from_str(raw)
        .map_err(|source| MappingError::Json { schema: SchemaKind::Forecast, source })?;

    parsed
        .list
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let condition = entry.weather.first().ok_or(MappingError::EmptyConditions {
                schema: SchemaKind::Forecast,
                slot: Some(i),
            })?;
            Ok(observation(condition, entry.dt))
        })
        .collect()
}

fn observation(condition: &OwCondition, dt: Option<i64>) -> WeatherObservation {
    WeatherObservation {
        description: condition.main.clone(),
        detail: condition.description.clone(),
        icon_code: condition.icon.clone(),
        observed_at: dt.and_then(unix_to_local),
    }
}

pub fn unix_to_local(ts: i64) -> Option<DateTime<Local>> {
    DateTime::from_timestamp(ts, 0).map(|utc| utc.with_timezone(&Local))
}
