//! Per-station arrival and departure counts.
//!
//! Aggregation is pure: it returns fresh station records and never touches the
//! trip list. Station codes that no trip mentions get zero counts, and trip
//! station ids that match no station are ignored.

use std::collections::HashMap;

use crate::station::{Station, Trip};

/// Trip counts grouped by station code.
#[derive(Debug, Clone, Default)]
pub struct StationCounts {
    counts: HashMap<String, u32>,
}

impl StationCounts {
    /// Count trips per key, like a group-by followed by a length rollup.
    pub fn group_by<'a, I, F>(trips: I, key: F) -> Self
    where
        I: IntoIterator<Item = &'a Trip>,
        F: Fn(&'a Trip) -> &'a str,
    {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for trip in trips {
            *counts.entry(key(trip).to_string()).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn get_or_zero(&self, code: &str) -> u32 {
        self.counts.get(code).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Departures and arrivals for one pass over a set of trips.
#[derive(Debug, Clone, Default)]
pub struct TrafficTally {
    pub departures: StationCounts,
    pub arrivals: StationCounts,
}

impl TrafficTally {
    pub fn from_trips<'a, I>(trips: I) -> Self
    where
        I: IntoIterator<Item = &'a Trip>,
        I::IntoIter: Clone,
    {
        let trips = trips.into_iter();
        Self {
            departures: StationCounts::group_by(trips.clone(), |trip| {
                trip.start_station_id.as_str()
            }),
            arrivals: StationCounts::group_by(trips, |trip| trip.end_station_id.as_str()),
        }
    }

    /// Copy of `station` with the traffic fields overwritten from this tally.
    pub fn apply(&self, station: &Station) -> Station {
        let arrivals = self.arrivals.get_or_zero(station.code());
        let departures = self.departures.get_or_zero(station.code());
        Station {
            arrivals,
            departures,
            total_traffic: arrivals + departures,
            ..station.clone()
        }
    }
}

/// Recompute arrivals, departures and total traffic for every station.
pub fn compute_station_traffic<'a, I>(stations: &[Station], trips: I) -> Vec<Station>
where
    I: IntoIterator<Item = &'a Trip>,
    I::IntoIter: Clone,
{
    let tally = TrafficTally::from_trips(trips);
    stations.iter().map(|station| tally.apply(station)).collect()
}

/// Largest total traffic across stations, 0 when there are none.
pub fn max_total_traffic(stations: &[Station]) -> u32 {
    stations
        .iter()
        .map(|station| station.total_traffic)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{station, trip_at};

    #[test]
    fn single_round_trip_counts_both_directions() {
        let stations = vec![station("A")];
        let trips = vec![trip_at("A", "A", 8 * 60, 8 * 60 + 20)];
        let result = compute_station_traffic(&stations, &trips);
        assert_eq!(result[0].arrivals, 1);
        assert_eq!(result[0].departures, 1);
        assert_eq!(result[0].total_traffic, 2);
    }

    #[test]
    fn missing_codes_default_to_zero() {
        let stations = vec![station("A"), station("B")];
        let trips = vec![
            trip_at("A", "Z", 0, 10),
            trip_at("Y", "A", 0, 10),
            trip_at("A", "X", 0, 10),
        ];
        let result = compute_station_traffic(&stations, &trips);
        assert_eq!((result[0].departures, result[0].arrivals), (2, 1));
        assert_eq!(result[0].total_traffic, 3);
        assert_eq!(result[1].total_traffic, 0);
    }

    #[test]
    fn aggregation_overwrites_previous_counts() {
        let mut stale = station("A");
        stale.arrivals = 40;
        stale.departures = 2;
        stale.total_traffic = 42;
        let result = compute_station_traffic(&[stale], std::iter::empty::<&Trip>());
        assert_eq!(result[0].total_traffic, 0);
        assert_eq!(result[0].arrivals, 0);
    }

    #[test]
    fn group_by_exposes_get_or_zero() {
        let trips = vec![trip_at("A", "B", 0, 1), trip_at("A", "C", 0, 1)];
        let departures = StationCounts::group_by(&trips, |trip| trip.start_station_id.as_str());
        assert_eq!(departures.get_or_zero("A"), 2);
        assert_eq!(departures.get_or_zero("B"), 0);
        assert_eq!(departures.len(), 1);
    }

    #[test]
    fn max_total_traffic_of_empty_list_is_zero() {
        assert_eq!(max_total_traffic(&[]), 0);
    }
}
