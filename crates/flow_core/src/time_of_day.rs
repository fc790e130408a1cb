//! Minute-of-day arithmetic, clock formatting, and the slider's time filter state.

use chrono::{NaiveDateTime, Timelike};

pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// Slider value that stands for "any time of day".
pub const ANY_TIME_SLIDER_VALUE: i32 = -1;

/// Last selectable minute on the slider (11:59 PM).
pub const LAST_MINUTE_OF_DAY: i32 = MINUTES_PER_DAY - 1;

/// Half-width of the window kept around the selected minute, inclusive.
pub const FILTER_WINDOW_MINUTES: i32 = 60;

/// Selected time of day, or no filtering at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeFilter {
    #[default]
    Any,
    Minute(u16),
}

impl TimeFilter {
    /// Interpret a raw slider value. Anything outside `0..=1439` is the sentinel.
    pub fn from_slider_value(value: i32) -> Self {
        if (0..=LAST_MINUTE_OF_DAY).contains(&value) {
            TimeFilter::Minute(value as u16)
        } else {
            TimeFilter::Any
        }
    }

    pub fn slider_value(self) -> i32 {
        match self {
            TimeFilter::Any => ANY_TIME_SLIDER_VALUE,
            TimeFilter::Minute(minute) => minute as i32,
        }
    }

    pub fn is_filtered(self) -> bool {
        matches!(self, TimeFilter::Minute(_))
    }
}

/// Minutes since midnight, ignoring the date and seconds.
pub fn minutes_since_midnight(timestamp: &NaiveDateTime) -> u32 {
    timestamp.hour() * 60 + timestamp.minute()
}

/// Format a minute-of-day as a short 12-hour clock string, e.g. `7:30 AM`.
///
/// Values outside a single day wrap around, so `1440` is midnight again and
/// `-30` is `11:30 PM`.
pub fn format_time(minutes: i32) -> String {
    let minute_of_day = minutes.rem_euclid(MINUTES_PER_DAY);
    let hour = minute_of_day / 60;
    let minute = minute_of_day % 60;
    let period = if hour < 12 { "AM" } else { "PM" };
    let hour_12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour_12}:{minute:02} {period}")
}
