//! Stations and trips as loaded from the bike-share feeds.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::time_of_day::minutes_since_midnight;

/// Geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// A dock location. `short_name` is the code trips refer to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub short_name: String,
    #[serde(default)]
    pub station_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub lat: f64,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub lon: f64,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub arrivals: u32,
    #[serde(default)]
    pub departures: u32,
    #[serde(default)]
    pub total_traffic: u32,
}

impl Station {
    pub fn new(short_name: impl Into<String>, lng: f64, lat: f64) -> Self {
        Self {
            short_name: short_name.into(),
            station_id: None,
            name: None,
            lat,
            lon: lng,
            capacity: None,
            arrivals: 0,
            departures: 0,
            total_traffic: 0,
        }
    }

    pub fn code(&self) -> &str {
        &self.short_name
    }

    pub fn position(&self) -> LngLat {
        LngLat::new(self.lon, self.lat)
    }

    /// Hover text shown next to the station marker.
    pub fn traffic_summary(&self) -> String {
        format!(
            "{} trips ({} departures, {} arrivals)",
            self.total_traffic, self.departures, self.arrivals
        )
    }
}

/// A single rental. Timestamps that could not be parsed are kept as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub ride_id: Option<String>,
    pub start_station_id: String,
    pub end_station_id: String,
    pub started_at: Option<NaiveDateTime>,
    pub ended_at: Option<NaiveDateTime>,
}

impl Trip {
    pub fn new(
        start_station_id: impl Into<String>,
        end_station_id: impl Into<String>,
        started_at: NaiveDateTime,
        ended_at: NaiveDateTime,
    ) -> Self {
        Self {
            ride_id: None,
            start_station_id: start_station_id.into(),
            end_station_id: end_station_id.into(),
            started_at: Some(started_at),
            ended_at: Some(ended_at),
        }
    }

    pub fn start_minute(&self) -> Option<u32> {
        self.started_at.as_ref().map(minutes_since_midnight)
    }

    pub fn end_minute(&self) -> Option<u32> {
        self.ended_at.as_ref().map(minutes_since_midnight)
    }
}

/// Station feeds publish coordinates both as JSON numbers and as strings.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Coordinate {
        Number(f64),
        Text(String),
    }

    match Coordinate::deserialize(deserializer)? {
        Coordinate::Number(value) => Ok(value),
        Coordinate::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|err| serde::de::Error::custom(format!("invalid coordinate {text:?}: {err}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_numeric_and_string_coordinates() {
        let json = r#"[
            {"short_name": "A32000", "name": "Kendall T", "lat": 42.3625, "lon": -71.0843, "capacity": 19},
            {"short_name": "B32006", "lat": "42.35", "lon": " -71.1 "}
        ]"#;
        let stations: Vec<Station> = serde_json::from_str(json).expect("stations should parse");
        assert_eq!(stations[0].code(), "A32000");
        assert_eq!(stations[0].capacity, Some(19));
        assert_eq!(stations[1].position(), LngLat::new(-71.1, 42.35));
        assert_eq!(stations[1].total_traffic, 0);
    }

    #[test]
    fn rejects_non_numeric_coordinate_text() {
        let json = r#"{"short_name": "A", "lat": "north", "lon": 0}"#;
        assert!(serde_json::from_str::<Station>(json).is_err());
    }

    #[test]
    fn summary_lists_departures_before_arrivals() {
        let mut station = Station::new("A", 0.0, 0.0);
        station.arrivals = 2;
        station.departures = 5;
        station.total_traffic = 7;
        assert_eq!(
            station.traffic_summary(),
            "7 trips (5 departures, 2 arrivals)"
        );
    }
}
