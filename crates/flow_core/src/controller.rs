//! Keeps station markers in sync with the time slider and the map viewport.

use crate::data::Dataset;
use crate::filter::filter_trips_by_time;
use crate::map::{Projection, ViewportEvent};
use crate::markers::{JoinSummary, MarkerSet};
use crate::scale::{SqrtScale, FILTERED_RADIUS_RANGE, UNFILTERED_RADIUS_RANGE};
use crate::station::{Station, Trip};
use crate::time_of_day::{format_time, TimeFilter};
use crate::traffic::{compute_station_traffic, max_total_traffic};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Unfiltered,
    Filtered,
}

/// What the time labels next to the slider should show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeDisplay {
    pub selected_time: String,
    pub any_time_visible: bool,
}

impl TimeDisplay {
    fn for_filter(filter: TimeFilter) -> Self {
        match filter {
            TimeFilter::Any => Self {
                selected_time: String::new(),
                any_time_visible: true,
            },
            TimeFilter::Minute(minute) => Self {
                selected_time: format_time(minute as i32),
                any_time_visible: false,
            },
        }
    }
}

pub struct StationFlowController {
    stations: Vec<Station>,
    trips: Vec<Trip>,
    time_filter: TimeFilter,
    radius_scale: SqrtScale,
    markers: MarkerSet,
    display: TimeDisplay,
    visible_trips: usize,
}

impl StationFlowController {
    /// Aggregate the full trip list, size the radius domain from it, and run
    /// the slider routine once with `initial_slider_value`.
    pub fn new(dataset: Dataset, initial_slider_value: i32) -> Self {
        let Dataset { stations, trips } = dataset;
        let stations = compute_station_traffic(&stations, &trips);
        let max_traffic = max_total_traffic(&stations) as f64;
        let radius_scale = SqrtScale::new((0.0, max_traffic), UNFILTERED_RADIUS_RANGE);
        let mut controller = Self {
            stations,
            trips,
            time_filter: TimeFilter::Any,
            radius_scale,
            markers: MarkerSet::new(),
            display: TimeDisplay::for_filter(TimeFilter::Any),
            visible_trips: 0,
        };
        controller.on_slider_input(initial_slider_value);
        controller
    }

    /// Handle a slider change: update labels, recompute traffic, rebind markers.
    pub fn on_slider_input(&mut self, slider_value: i32) -> JoinSummary {
        self.time_filter = TimeFilter::from_slider_value(slider_value);
        self.display = TimeDisplay::for_filter(self.time_filter);
        self.update_markers(self.time_filter)
    }

    /// Every viewport notification triggers the same reposition pass.
    pub fn on_viewport_change<P: Projection>(&mut self, event: ViewportEvent, projection: &P) {
        log::trace!("repositioning {} markers after {event:?}", self.markers.len());
        self.markers.reposition(projection);
    }

    fn update_markers(&mut self, filter: TimeFilter) -> JoinSummary {
        let filtered_trips = filter_trips_by_time(&self.trips, filter);
        self.visible_trips = filtered_trips.len();
        let filtered_stations =
            compute_station_traffic(&self.stations, filtered_trips.iter().copied());

        let range = match filter {
            TimeFilter::Any => UNFILTERED_RADIUS_RANGE,
            TimeFilter::Minute(_) => FILTERED_RADIUS_RANGE,
        };
        self.radius_scale.set_range(range);

        let summary = self.markers.join(&filtered_stations, &self.radius_scale);
        log::debug!(
            "time filter {:?}: {} of {} trips, markers {:?}",
            filter,
            self.visible_trips,
            self.trips.len(),
            summary
        );
        summary
    }

    pub fn mode(&self) -> FilterMode {
        if self.time_filter.is_filtered() {
            FilterMode::Filtered
        } else {
            FilterMode::Unfiltered
        }
    }

    pub fn time_filter(&self) -> TimeFilter {
        self.time_filter
    }

    pub fn display(&self) -> &TimeDisplay {
        &self.display
    }

    pub fn radius_scale(&self) -> &SqrtScale {
        &self.radius_scale
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Stations with traffic from the unfiltered trip list.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    /// Trips passing the current time filter.
    pub fn visible_trip_count(&self) -> usize {
        self.visible_trips
    }
}
