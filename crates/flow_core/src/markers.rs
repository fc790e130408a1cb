//! Station markers keyed by station code.
//!
//! Rebinding is a keyed join: markers whose code is still present are updated
//! in place, new codes are appended, and codes that vanished are dropped.
//! Marker identity therefore survives every recomputation.

use std::collections::{HashMap, HashSet};

use crate::flow::{classify_flow, departure_ratio};
use crate::map::{Projection, ScreenPoint};
use crate::scale::SqrtScale;
use crate::station::{LngLat, Station};

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub code: String,
    pub position: LngLat,
    pub radius: f64,
    /// Quantized departure ratio, one of the flow levels.
    pub flow_level: f64,
    pub title: String,
    pub screen: Option<ScreenPoint>,
}

impl Marker {
    fn from_station(station: &Station, scale: &SqrtScale) -> Self {
        let mut marker = Self {
            code: station.code().to_string(),
            position: station.position(),
            radius: 0.0,
            flow_level: 0.0,
            title: String::new(),
            screen: None,
        };
        marker.bind(station, scale);
        marker
    }

    fn bind(&mut self, station: &Station, scale: &SqrtScale) {
        self.position = station.position();
        self.radius = scale.apply(station.total_traffic as f64);
        self.flow_level = classify_flow(departure_ratio(
            station.departures,
            station.total_traffic,
        ));
        self.title = station.traffic_summary();
    }
}

/// Counts from one keyed join.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinSummary {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MarkerSet {
    markers: Vec<Marker>,
    index: HashMap<String, usize>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&Marker> {
        self.index.get(code).map(|&slot| &self.markers[slot])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    /// Join `stations` onto the markers by station code.
    pub fn join(&mut self, stations: &[Station], scale: &SqrtScale) -> JoinSummary {
        let mut summary = JoinSummary::default();
        let incoming: HashSet<&str> = stations.iter().map(Station::code).collect();

        let before = self.markers.len();
        self.markers
            .retain(|marker| incoming.contains(marker.code.as_str()));
        summary.exited = before - self.markers.len();
        self.reindex();

        for station in stations {
            let existing = self.index.get(station.code()).copied();
            match existing {
                Some(slot) => {
                    self.markers[slot].bind(station, scale);
                    summary.updated += 1;
                }
                None => {
                    self.index
                        .insert(station.code().to_string(), self.markers.len());
                    self.markers.push(Marker::from_station(station, scale));
                    summary.entered += 1;
                }
            }
        }
        summary
    }

    /// Re-project every marker through the current viewport.
    pub fn reposition<P: Projection>(&mut self, projection: &P) {
        for marker in &mut self.markers {
            marker.screen = Some(projection.project(marker.position));
        }
    }

    fn reindex(&mut self) {
        self.index = self
            .markers
            .iter()
            .enumerate()
            .map(|(slot, marker)| (marker.code.clone(), slot))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::UNFILTERED_RADIUS_RANGE;
    use crate::test_helpers::station;

    struct Identity;

    impl Projection for Identity {
        fn project(&self, position: LngLat) -> ScreenPoint {
            ScreenPoint::new(position.lng, position.lat)
        }
    }

    fn with_traffic(code: &str, departures: u32, arrivals: u32) -> Station {
        let mut station = station(code);
        station.departures = departures;
        station.arrivals = arrivals;
        station.total_traffic = departures + arrivals;
        station
    }

    #[test]
    fn join_is_keyed_by_station_code() {
        let scale = SqrtScale::new((0.0, 100.0), UNFILTERED_RADIUS_RANGE);
        let mut markers = MarkerSet::new();
        let first = markers.join(&[with_traffic("A", 1, 0), with_traffic("B", 0, 1)], &scale);
        assert_eq!(first, JoinSummary { entered: 2, updated: 0, exited: 0 });

        let second = markers.join(&[with_traffic("B", 50, 50), with_traffic("C", 0, 0)], &scale);
        assert_eq!(second, JoinSummary { entered: 1, updated: 1, exited: 1 });
        assert!(markers.get("A").is_none());
        let b = markers.get("B").expect("B survives the join");
        assert_eq!(b.radius, 25.0);
        assert_eq!(b.flow_level, 0.5);
        let codes: Vec<_> = markers.iter().map(|m| m.code.as_str()).collect();
        assert_eq!(codes, vec!["B", "C"]);
    }

    #[test]
    fn rebinding_keeps_screen_position() {
        let scale = SqrtScale::new((0.0, 4.0), UNFILTERED_RADIUS_RANGE);
        let mut markers = MarkerSet::new();
        markers.join(&[with_traffic("A", 1, 1)], &scale);
        markers.reposition(&Identity);
        let before = markers.get("A").and_then(|m| m.screen);
        markers.join(&[with_traffic("A", 4, 0)], &scale);
        let after = markers.get("A").expect("marker kept");
        assert_eq!(after.screen, before);
        assert_eq!(after.flow_level, 1.0);
        assert_eq!(after.title, "4 trips (4 departures, 0 arrivals)");
    }

    #[test]
    fn zero_traffic_marker_gets_lowest_level() {
        let scale = SqrtScale::new((0.0, 10.0), UNFILTERED_RADIUS_RANGE);
        let mut markers = MarkerSet::new();
        markers.join(&[with_traffic("A", 0, 0)], &scale);
        let marker = markers.get("A").expect("marker");
        assert_eq!(marker.flow_level, 0.0);
        assert!(marker.radius.is_finite());
    }
}
