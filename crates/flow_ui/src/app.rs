//! Application state for the station flow map.

use std::sync::mpsc::Receiver;

use flow_core::config::AppConfig;
use flow_core::controller::StationFlowController;
use flow_core::data::{load_dataset, DataSource, Dataset};
use flow_core::map::ViewportEvent;
use flow_core::time_of_day::ANY_TIME_SLIDER_VALUE;

mod line_layers;
mod map_tiles;
mod viewport;

pub use line_layers::{LayerStatus, LineLayerState};
pub use map_tiles::{MapTileState, TileKey};
pub use viewport::{MapBounds, MapViewport};

/// Where the station/trip data is in its lifecycle.
pub enum DataState {
    Loading(Receiver<Result<Dataset, String>>),
    Ready(StationFlowController),
    /// Station data could not be loaded; the map renders without markers.
    Failed(String),
}

pub struct FlowUiApp {
    pub config: AppConfig,
    pub viewport: MapViewport,
    pub data: DataState,
    pub slider_value: i32,
    pub map_tiles: MapTileState,
    pub line_layers: LineLayerState,
}

impl FlowUiApp {
    pub fn new(config: AppConfig) -> Self {
        if config.mapbox_access_token.is_none() {
            log::warn!(
                "no map access token configured; set MAPBOX_ACCESS_TOKEN to draw the street basemap"
            );
        }
        let viewport = MapViewport::new(&config.map);
        let line_layers = LineLayerState::spawn(&config.line_layers);
        let data = DataState::Loading(spawn_data_load(&config));
        Self {
            config,
            viewport,
            data,
            slider_value: ANY_TIME_SLIDER_VALUE,
            map_tiles: MapTileState::new(),
            line_layers,
        }
    }

    /// Pull finished background work into the app.
    pub fn drain_background(&mut self) {
        self.map_tiles.drain_results();
        self.line_layers.drain_results();

        let DataState::Loading(receiver) = &self.data else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.data = match result {
            Ok(dataset) => {
                let mut controller = StationFlowController::new(dataset, self.slider_value);
                controller.on_viewport_change(ViewportEvent::MoveEnd, &self.viewport);
                DataState::Ready(controller)
            }
            Err(error) => DataState::Failed(error),
        };
    }

    pub fn controller(&self) -> Option<&StationFlowController> {
        match &self.data {
            DataState::Ready(controller) => Some(controller),
            _ => None,
        }
    }

    /// Forward a slider change to the controller.
    pub fn set_slider_value(&mut self, value: i32) {
        self.slider_value = value;
        if let DataState::Ready(controller) = &mut self.data {
            controller.on_slider_input(value);
        }
    }

    /// Reposition markers after the viewport emitted `event`.
    pub fn notify_viewport(&mut self, event: ViewportEvent) {
        if let DataState::Ready(controller) = &mut self.data {
            controller.on_viewport_change(event, &self.viewport);
        }
    }
}

fn spawn_data_load(config: &AppConfig) -> Receiver<Result<Dataset, String>> {
    let (sender, receiver) = std::sync::mpsc::channel();
    let stations = DataSource::parse(&config.stations_url);
    let trips = DataSource::parse(&config.trips_url);
    std::thread::spawn(move || {
        let result = load_dataset(&stations, &trips).map_err(|err| err.to_string());
        let _ = sender.send(result);
    });
    receiver
}
