//! Daily forecast derived from the provider's 3-hour slots

use chrono::DateTime;

use crate::api::{primary_condition, ForecastResponse};
use crate::state::ForecastEntry;

/// Slots whose timestamp text contains this represent their day.
pub const MIDDAY_MARKER: &str = "12:00:00";

/// Maximum number of forecast days rendered.
pub const FORECAST_DAYS: usize = 5;

/// Round to the nearest whole degree, halves rounding up (`-2.5` → `-2`).
pub fn round_temperature(celsius: f64) -> i32 {
    (celsius + 0.5).floor() as i32
}

/// Short English weekday for a unix timestamp, evaluated in UTC.
pub fn day_label(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%a").to_string())
        .unwrap_or_else(|| "---".to_string())
}

/// One entry per day (the midday slot), at most [`FORECAST_DAYS`].
pub fn daily_entries(forecast: &ForecastResponse) -> Vec<ForecastEntry> {
    forecast
        .list
        .iter()
        .filter(|item| item.dt_txt.contains(MIDDAY_MARKER))
        .take(FORECAST_DAYS)
        .map(|item| {
            let (description, icon) = primary_condition(&item.weather);
            ForecastEntry {
                timestamp: item.dt,
                day: day_label(item.dt),
                temperature: round_temperature(item.main.temp),
                description,
                icon,
            }
        })
        .collect()
}
