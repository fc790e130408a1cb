use flow_core::data::Dataset;
use flow_core::station::{Station, Trip};
use flow_core::test_helpers::{station, trip_at};

pub const STATION_FEED: &str = r#"{
  "last_updated": 1710000000,
  "ttl": 5,
  "data": {
    "stations": [
      {"short_name": "A32000", "station_id": "a1", "name": "Kendall T", "lat": 42.3625, "lon": -71.0843, "capacity": 19},
      {"short_name": "M32006", "station_id": "m6", "name": "MIT at Mass Ave", "lat": "42.3581", "lon": "-71.0936"},
      {"short_name": "D32011", "name": "Central Square", "lat": 42.3653, "lon": -71.1030}
    ]
  }
}"#;

pub const TRIP_TABLE: &str = "\
ride_id,rideable_type,started_at,ended_at,start_station_id,end_station_id,member_casual
r1,classic_bike,2024-03-14 07:55:10.120,2024-03-14 08:10:02.000,A32000,M32006,member
r2,electric_bike,2024-03-14 08:20:00,2024-03-14 08:31:45,M32006,A32000,casual
r3,classic_bike,2024-03-14 17:40:00,2024-03-14 18:05:00,D32011,A32000,member
r4,classic_bike,2024-03-14 23:30:00,2024-03-15 00:10:00,A32000,Z99999,member
";

/// Stations A, B, C with a morning commute pattern and one evening trip.
pub fn commute_dataset() -> Dataset {
    Dataset {
        stations: vec![station("A"), station("B"), station("C")],
        trips: commute_trips(),
    }
}

pub fn commute_trips() -> Vec<Trip> {
    vec![
        trip_at("A", "B", 7 * 60 + 30, 7 * 60 + 50),
        trip_at("A", "B", 8 * 60, 8 * 60 + 15),
        trip_at("C", "B", 8 * 60 + 5, 8 * 60 + 25),
        trip_at("B", "A", 17 * 60 + 30, 17 * 60 + 55),
        trip_at("B", "C", 22 * 60, 22 * 60 + 10),
    ]
}

pub fn stations_by_code<'a>(stations: &'a [Station], code: &str) -> &'a Station {
    stations
        .iter()
        .find(|station| station.code() == code)
        .unwrap_or_else(|| panic!("station {code} should exist"))
}
