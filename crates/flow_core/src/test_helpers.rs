//! Fixture builders shared by unit tests, integration tests and benches.

use chrono::{NaiveDate, NaiveDateTime};

use crate::station::{Station, Trip};

/// Day every fixture trip happens on.
pub fn fixture_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 14).expect("fixture date should be valid")
}

/// Timestamp on the fixture day at `minute` past midnight.
pub fn at_minute(minute: u32) -> NaiveDateTime {
    fixture_day()
        .and_hms_opt(minute / 60 % 24, minute % 60, 0)
        .expect("fixture minute should be valid")
}

/// Station with the given code, placed around Kendall Square.
pub fn station(code: &str) -> Station {
    let offset = code.bytes().map(|b| b as f64).sum::<f64>() * 1e-4;
    Station::new(code, -71.09 + offset, 42.36 + offset)
}

/// Trip between two station codes at the given minutes of the fixture day.
pub fn trip_at(start: &str, end: &str, start_minute: u32, end_minute: u32) -> Trip {
    Trip::new(start, end, at_minute(start_minute), at_minute(end_minute))
}
