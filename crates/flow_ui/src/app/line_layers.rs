//! Decorative bike-lane overlays loaded from GeoJSON.

use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use serde::Deserialize;

use flow_core::config::LineLayerConfig;
use flow_core::data::DataSource;
use flow_core::station::LngLat;

const LAYER_FETCH_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq)]
pub enum LayerStatus {
    Loading,
    Ready,
    Failed(String),
}

pub struct LineLayer {
    pub config: LineLayerConfig,
    pub lines: Vec<Vec<LngLat>>,
    pub status: LayerStatus,
}

struct LayerResult {
    index: usize,
    lines: Result<Vec<Vec<LngLat>>, String>,
}

pub struct LineLayerState {
    layers: Vec<LineLayer>,
    receiver: Receiver<LayerResult>,
}

impl LineLayerState {
    /// Start one background fetch per configured layer.
    pub fn spawn(configs: &[LineLayerConfig]) -> Self {
        let (sender, receiver) = std::sync::mpsc::channel();
        let layers = configs
            .iter()
            .enumerate()
            .map(|(index, config)| {
                spawn_layer_fetch(index, config.url.clone(), sender.clone());
                LineLayer {
                    config: config.clone(),
                    lines: Vec::new(),
                    status: LayerStatus::Loading,
                }
            })
            .collect();
        Self { layers, receiver }
    }

    pub fn drain_results(&mut self) {
        while let Ok(result) = self.receiver.try_recv() {
            let Some(layer) = self.layers.get_mut(result.index) else {
                continue;
            };
            match result.lines {
                Ok(lines) => {
                    log::info!("line layer {} loaded with {} lines", layer.config.id, lines.len());
                    layer.lines = lines;
                    layer.status = LayerStatus::Ready;
                }
                Err(error) => {
                    log::warn!("line layer {} failed: {error}", layer.config.id);
                    layer.status = LayerStatus::Failed(error);
                }
            }
        }
    }

    pub fn layers(&self) -> &[LineLayer] {
        &self.layers
    }
}

fn spawn_layer_fetch(index: usize, url: String, sender: Sender<LayerResult>) {
    std::thread::spawn(move || {
        let lines = fetch_layer(&url).and_then(|text| parse_line_features(&text));
        let _ = sender.send(LayerResult { index, lines });
    });
}

fn fetch_layer(location: &str) -> Result<String, String> {
    DataSource::parse(location)
        .read_to_string_with_timeout(Duration::from_secs(LAYER_FETCH_TIMEOUT_SECS))
        .map_err(|err| err.to_string())
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    LineString { coordinates: Vec<Vec<f64>> },
    MultiLineString { coordinates: Vec<Vec<Vec<f64>>> },
    #[serde(other)]
    Other,
}

/// Polylines of every LineString and MultiLineString feature. Other geometry
/// types and features without geometry are skipped.
pub fn parse_line_features(json: &str) -> Result<Vec<Vec<LngLat>>, String> {
    let collection: FeatureCollection =
        serde_json::from_str(json).map_err(|err| format!("invalid geojson: {err}"))?;
    let mut lines = Vec::new();
    for geometry in collection.features.into_iter().filter_map(|f| f.geometry) {
        match geometry {
            Geometry::LineString { coordinates } => lines.push(to_line(&coordinates)),
            Geometry::MultiLineString { coordinates } => {
                lines.extend(coordinates.iter().map(|part| to_line(part)))
            }
            Geometry::Other => {}
        }
    }
    lines.retain(|line| line.len() >= 2);
    Ok(lines)
}

fn to_line(coordinates: &[Vec<f64>]) -> Vec<LngLat> {
    coordinates
        .iter()
        .filter(|position| position.len() >= 2)
        .map(|position| LngLat::new(position[0], position[1]))
        .collect()
}
