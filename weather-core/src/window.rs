//! Calendar-day selection over forecast slots.

use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::model::WeatherObservation;

/// Half-open local-time interval `[start, end)` covering one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl DayWindow {
    pub fn for_day(day: NaiveDate) -> Self {
        let next = day.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX);
        Self {
            start: local_midnight(day),
            end: local_midnight(next),
        }
    }

    pub fn contains(&self, at: &DateTime<Local>) -> bool {
        self.start <= *at && *at < self.end
    }
}

/// First instant of `day` in local time.
///
/// Where midnight falls into a DST gap, the first valid instant after it.
fn local_midnight(day: NaiveDate) -> DateTime<Local> {
    let midnight = day.and_time(NaiveTime::MIN);

    first_valid_minute(midnight, |candidate| Local.from_local_datetime(candidate).earliest())
        .unwrap_or_else(|| Local.from_utc_datetime(&midnight))
}

/// Walks forward minute by minute from `start` (for at most a day) until
/// `resolve` maps the wall-clock time to a real instant.
fn first_valid_minute<T>(start: NaiveDateTime, resolve: impl Fn(&NaiveDateTime) -> Option<T>) -> Option<T> {
    (0..=24 * 60).find_map(|minutes| {
        let candidate = start.checked_add_signed(chrono::Duration::minutes(minutes))?;
        resolve(&candidate)
    })
}

/// The day after `now`'s local date.
pub fn tomorrow(now: DateTime<Local>) -> NaiveDate {
    let today = now.date_naive();
    today.succ_opt().unwrap_or(today)
}

/// Observations falling inside `reference_day`, in their original order.
///
/// Observations without a timestamp never match.
pub fn select_day(observations: &[WeatherObservation], reference_day: NaiveDate) -> Vec<WeatherObservation> {
    let window = DayWindow::for_day(reference_day);

    observations
        .iter()
        .filter(|obs| obs.observed_at.as_ref().is_some_and(|at| window.contains(at)))
        .cloned()
        .collect()
}
