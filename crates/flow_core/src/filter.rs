//! Time-of-day trip filtering.

use crate::station::Trip;
use crate::time_of_day::{TimeFilter, FILTER_WINDOW_MINUTES};

fn within_window(minute: Option<u32>, selected: u16) -> bool {
    match minute {
        Some(minute) => (minute as i32 - selected as i32).abs() <= FILTER_WINDOW_MINUTES,
        None => false,
    }
}

/// Whether a trip starts or ends within the window around `selected`.
pub fn trip_matches_minute(trip: &Trip, selected: u16) -> bool {
    within_window(trip.start_minute(), selected) || within_window(trip.end_minute(), selected)
}

/// Trips that pass `filter`, in their original order.
///
/// `TimeFilter::Any` keeps every trip. Windows do not wrap across midnight.
pub fn filter_trips_by_time(trips: &[Trip], filter: TimeFilter) -> Vec<&Trip> {
    match filter {
        TimeFilter::Any => trips.iter().collect(),
        TimeFilter::Minute(selected) => trips
            .iter()
            .filter(|trip| trip_matches_minute(trip, selected))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::trip_at;

    #[test]
    fn any_time_is_identity() {
        let trips = vec![trip_at("A", "B", 10, 20), trip_at("B", "A", 900, 950)];
        let filtered = filter_trips_by_time(&trips, TimeFilter::Any);
        assert_eq!(filtered.len(), trips.len());
        assert!(filtered.iter().zip(&trips).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let trips = vec![
            trip_at("A", "B", 420, 430),
            trip_at("A", "B", 419, 419),
            trip_at("A", "B", 540, 541),
            trip_at("A", "B", 541, 545),
        ];
        let filtered = filter_trips_by_time(&trips, TimeFilter::Minute(480));
        let starts: Vec<_> = filtered.iter().filter_map(|t| t.start_minute()).collect();
        assert_eq!(starts, vec![420, 540]);
    }

    #[test]
    fn end_time_alone_can_match() {
        let trips = vec![trip_at("A", "B", 100, 470)];
        assert_eq!(filter_trips_by_time(&trips, TimeFilter::Minute(480)).len(), 1);
    }

    #[test]
    fn window_does_not_wrap_midnight() {
        let trips = vec![trip_at("A", "B", 1430, 1435)];
        assert!(filter_trips_by_time(&trips, TimeFilter::Minute(10)).is_empty());
    }

    #[test]
    fn unparsed_timestamps_only_pass_any_time() {
        let mut trip = trip_at("A", "B", 480, 480);
        trip.started_at = None;
        trip.ended_at = None;
        let trips = vec![trip];
        assert!(filter_trips_by_time(&trips, TimeFilter::Minute(480)).is_empty());
        assert_eq!(filter_trips_by_time(&trips, TimeFilter::Any).len(), 1);
    }
}
