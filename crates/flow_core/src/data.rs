//! Loading the station feed (JSON) and the trip table (CSV).
//!
//! Sources are either `http(s)://` URLs or local paths. A station failure is
//! returned to the caller; a trip failure is logged and replaced by an empty
//! trip list so the map still shows every station.

use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;

use crate::station::{Station, Trip};

#[cfg(feature = "fetch")]
const FETCH_TIMEOUT_SECS: u64 = 30;

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Http(String),
    Json(serde_json::Error),
    Csv(csv::Error),
    UnexpectedShape(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "io error: {err}"),
            LoadError::Http(message) => write!(f, "http error: {message}"),
            LoadError::Json(err) => write!(f, "invalid json: {err}"),
            LoadError::Csv(err) => write!(f, "invalid csv: {err}"),
            LoadError::UnexpectedShape(message) => write!(f, "unexpected data shape: {message}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Json(err) => Some(err),
            LoadError::Csv(err) => Some(err),
            LoadError::Http(_) | LoadError::UnexpectedShape(_) => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Json(err)
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::Csv(err)
    }
}

#[cfg(feature = "fetch")]
impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        LoadError::Http(err.to_string())
    }
}

/// Where a feed is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            DataSource::Url(location.to_string())
        } else {
            DataSource::File(PathBuf::from(location))
        }
    }

    pub fn read_to_string(&self) -> Result<String, LoadError> {
        self.read_to_string_with_timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
    }

    /// Like [`DataSource::read_to_string`]; `timeout` bounds URL fetches only.
    pub fn read_to_string_with_timeout(&self, timeout: Duration) -> Result<String, LoadError> {
        match self {
            DataSource::File(path) => Ok(std::fs::read_to_string(path)?),
            DataSource::Url(url) => fetch_text(url, timeout),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(feature = "fetch")]
fn fetch_text(url: &str, timeout: Duration) -> Result<String, LoadError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?;
    let response = client.get(url).send()?;
    if !response.status().is_success() {
        return Err(LoadError::Http(format!("status {} for {url}", response.status())));
    }
    Ok(response.text()?)
}

#[cfg(not(feature = "fetch"))]
fn fetch_text(url: &str, _timeout: Duration) -> Result<String, LoadError> {
    Err(LoadError::Http(format!(
        "cannot fetch {url}: built without the `fetch` feature"
    )))
}

/// Everything the map needs, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub stations: Vec<Station>,
    pub trips: Vec<Trip>,
}

/// Parse a feed shaped like `{ "data": { "stations": [...] } }`.
pub fn parse_station_feed(json: &str) -> Result<Vec<Station>, LoadError> {
    let mut value: serde_json::Value = serde_json::from_str(json)?;
    let stations = value
        .get_mut("data")
        .and_then(|data| data.get_mut("stations"))
        .map(serde_json::Value::take)
        .ok_or_else(|| LoadError::UnexpectedShape("missing data.stations".to_string()))?;
    if !stations.is_array() {
        return Err(LoadError::UnexpectedShape(
            "data.stations is not an array".to_string(),
        ));
    }
    Ok(serde_json::from_value(stations)?)
}

#[derive(Debug, Deserialize)]
struct TripRow {
    #[serde(default)]
    ride_id: Option<String>,
    start_station_id: String,
    end_station_id: String,
    started_at: String,
    ended_at: String,
}

/// Parse a trip timestamp. Unrecognised text yields `None`.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|timestamp| timestamp.naive_local())
        })
}

const REQUIRED_TRIP_COLUMNS: [&str; 4] =
    ["start_station_id", "end_station_id", "started_at", "ended_at"];

/// Read trips from CSV with a header row. Timestamps are parsed per row.
///
/// Ragged or otherwise unreadable rows are skipped; only a header missing
/// one of the required columns fails the whole table.
pub fn read_trips<R: Read>(reader: R) -> Result<Vec<Trip>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?;
    if let Some(missing) = REQUIRED_TRIP_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|header| header == **column))
    {
        return Err(LoadError::UnexpectedShape(format!(
            "trip table has no {missing} column"
        )));
    }

    let mut trips = Vec::new();
    let mut unparsed = 0usize;
    let mut skipped = 0usize;
    for row in csv_reader.deserialize::<TripRow>() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                log::debug!("skipping trip row: {err}");
                skipped += 1;
                continue;
            }
        };
        let started_at = parse_timestamp(&row.started_at);
        let ended_at = parse_timestamp(&row.ended_at);
        if started_at.is_none() || ended_at.is_none() {
            unparsed += 1;
        }
        trips.push(Trip {
            ride_id: row.ride_id.filter(|id| !id.is_empty()),
            start_station_id: row.start_station_id,
            end_station_id: row.end_station_id,
            started_at,
            ended_at,
        });
    }
    if skipped > 0 {
        log::warn!("{skipped} trip rows could not be read and were skipped");
    }
    if unparsed > 0 {
        log::warn!("{unparsed} trips have timestamps that could not be parsed");
    }
    Ok(trips)
}

pub fn load_stations(source: &DataSource) -> Result<Vec<Station>, LoadError> {
    let stations = parse_station_feed(&source.read_to_string()?)?;
    log::info!("loaded {} stations from {source}", stations.len());
    Ok(stations)
}

pub fn load_trips(source: &DataSource) -> Result<Vec<Trip>, LoadError> {
    let text = source.read_to_string()?;
    let trips = read_trips(text.as_bytes())?;
    log::info!("loaded {} trips from {source}", trips.len());
    Ok(trips)
}

/// Load both feeds. Only a station failure is an error.
pub fn load_dataset(
    stations_source: &DataSource,
    trips_source: &DataSource,
) -> Result<Dataset, LoadError> {
    let stations = load_stations(stations_source).map_err(|err| {
        log::error!("error loading stations from {stations_source}: {err}");
        err
    })?;
    let trips = load_trips(trips_source).unwrap_or_else(|err| {
        log::error!("error loading traffic data from {trips_source}: {err}");
        Vec::new()
    });
    Ok(Dataset { stations, trips })
}
