use chrono::{DateTime, Local};

/// One normalized weather sample: either "now" or a single forecast slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherObservation {
    /// Short condition group, e.g. "Rain" or "Clouds".
    pub description: String,
    /// Longer provider text, e.g. "light intensity drizzle rain".
    pub detail: String,
    /// Provider icon code, e.g. "10d".
    pub icon_code: String,
    /// Absent when the provider body carried no timestamp.
    pub observed_at: Option<DateTime<Local>>,
}

/// Which provider body shape a raw response is expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Current,
    Forecast,
}

impl SchemaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::Current => "current weather",
            SchemaKind::Forecast => "forecast",
        }
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public query operation, carried by errors so users know what to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Current,
    Forecast,
    Tomorrow,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Current => "current weather",
            Operation::Forecast => "forecast",
            Operation::Tomorrow => "tomorrow's forecast",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
