mod support;

use std::fs;

use flow_core::data::{load_dataset, load_stations, load_trips, DataSource, LoadError};
use flow_core::traffic::compute_station_traffic;

use support::fixtures::{stations_by_code, STATION_FEED, TRIP_TABLE};

fn write_fixture(dir: &tempfile::TempDir, name: &str, contents: &str) -> DataSource {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("fixture should be written");
    DataSource::File(path)
}

#[test]
fn loads_both_feeds_from_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let stations = write_fixture(&dir, "stations.json", STATION_FEED);
    let trips = write_fixture(&dir, "trips.csv", TRIP_TABLE);

    let dataset = load_dataset(&stations, &trips).expect("dataset loads");
    assert_eq!(dataset.stations.len(), 3);
    assert_eq!(dataset.trips.len(), 4);

    let stations = compute_station_traffic(&dataset.stations, &dataset.trips);
    let kendall = stations_by_code(&stations, "A32000");
    assert_eq!((kendall.departures, kendall.arrivals), (2, 2));
    let mit = stations_by_code(&stations, "M32006");
    assert_eq!(mit.position().lat, 42.3581);
    assert_eq!(mit.total_traffic, 2);
}

#[test]
fn missing_trip_table_degrades_to_empty_trips() {
    let dir = tempfile::tempdir().expect("temp dir");
    let stations = write_fixture(&dir, "stations.json", STATION_FEED);
    let trips = DataSource::File(dir.path().join("missing.csv"));

    let dataset = load_dataset(&stations, &trips).expect("stations alone are enough");
    assert_eq!(dataset.stations.len(), 3);
    assert!(dataset.trips.is_empty());
}

#[test]
fn malformed_trip_table_degrades_to_empty_trips() {
    let dir = tempfile::tempdir().expect("temp dir");
    let stations = write_fixture(&dir, "stations.json", STATION_FEED);
    let trips = write_fixture(&dir, "trips.csv", "started_at\n2024-03-14 08:00:00\n");
    assert!(matches!(load_trips(&trips), Err(LoadError::UnexpectedShape(_))));

    let dataset = load_dataset(&stations, &trips).expect("stations alone are enough");
    assert!(dataset.trips.is_empty());
}

#[test]
fn one_ragged_trip_row_keeps_the_rest() {
    let dir = tempfile::tempdir().expect("temp dir");
    let stations = write_fixture(&dir, "stations.json", STATION_FEED);
    let ragged = format!("{TRIP_TABLE}r5,classic_bike,2024-03-14 09:00:00\n");
    let trips = write_fixture(&dir, "trips.csv", &ragged);

    let dataset = load_dataset(&stations, &trips).expect("dataset loads");
    assert_eq!(dataset.trips.len(), 4);
    let stations = compute_station_traffic(&dataset.stations, &dataset.trips);
    assert_eq!(stations_by_code(&stations, "A32000").total_traffic, 4);
}

#[test]
fn station_failure_is_fatal() {
    let dir = tempfile::tempdir().expect("temp dir");
    let stations = write_fixture(&dir, "stations.json", r#"{"stations": []}"#);
    let trips = write_fixture(&dir, "trips.csv", TRIP_TABLE);

    let result = load_dataset(&stations, &trips);
    assert!(matches!(result, Err(LoadError::UnexpectedShape(_))));

    let missing = DataSource::File(dir.path().join("nope.json"));
    assert!(matches!(load_stations(&missing), Err(LoadError::Io(_))));
}

#[test]
fn load_errors_describe_their_cause() {
    let err = LoadError::UnexpectedShape("missing data.stations".to_string());
    assert_eq!(err.to_string(), "unexpected data shape: missing data.stations");
}
