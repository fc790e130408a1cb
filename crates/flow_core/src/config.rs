//! Application configuration, read from `bikeflow.json` in the working directory.
//!
//! A missing file means defaults. The map access token is never stored in the
//! defaults; it comes from the file or from `MAPBOX_ACCESS_TOKEN`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "bikeflow.json";
pub const ACCESS_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";

const DEFAULT_STATIONS_URL: &str = "https://dsc106.com/labs/lab07/data/bluebikes-stations.json";
const DEFAULT_TRIPS_URL: &str = "https://dsc106.com/labs/lab07/data/bluebikes-traffic-2024-03.csv";
const BOSTON_BIKE_NETWORK_URL: &str =
    "https://bostonopendata-boston.opendata.arcgis.com/datasets/boston::existing-bike-network-2022.geojson";
const CAMBRIDGE_BIKE_FACILITIES_URL: &str = "https://raw.githubusercontent.com/cambridgegis/cambridgegis_data/main/Recreation/Bike_Facilities/RECREATION_BikeFacilities.geojson";
const DEFAULT_BASEMAP_TILE_URL: &str =
    "https://api.mapbox.com/v4/mapbox.mapbox-streets-v8/{z}/{x}/{y}.vector.pbf?access_token={token}";

/// Zoom levels supported by Web Mercator tile pyramids.
const ZOOM_LIMITS: (f64, f64) = (0.0, 22.0);

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    InvalidFormat(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(message) => write!(f, "{message}"),
            ConfigError::InvalidFormat(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Initial camera and zoom bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapViewConfig {
    /// `[longitude, latitude]`
    pub center: [f64; 2],
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            center: [-71.09415, 42.36027],
            zoom: 12.0,
            min_zoom: 5.0,
            max_zoom: 18.0,
        }
    }
}

/// A decorative line overlay loaded from a GeoJSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineLayerConfig {
    pub id: String,
    pub url: String,
    #[serde(default = "default_line_color")]
    pub color: [u8; 3],
    #[serde(default = "default_line_width")]
    pub width: f32,
    #[serde(default = "default_line_opacity")]
    pub opacity: f32,
}

impl LineLayerConfig {
    fn bike_lanes(id: &str, url: &str) -> Self {
        Self {
            id: id.to_string(),
            url: url.to_string(),
            color: default_line_color(),
            width: default_line_width(),
            opacity: default_line_opacity(),
        }
    }
}

fn default_line_color() -> [u8; 3] {
    [0, 128, 0]
}

fn default_line_width() -> f32 {
    3.0
}

fn default_line_opacity() -> f32 {
    0.6
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub stations_url: String,
    pub trips_url: String,
    pub line_layers: Vec<LineLayerConfig>,
    pub map: MapViewConfig,
    /// Vector tile template with `{z}`, `{x}`, `{y}` and `{token}` placeholders.
    pub basemap_tile_url: String,
    pub mapbox_access_token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stations_url: DEFAULT_STATIONS_URL.to_string(),
            trips_url: DEFAULT_TRIPS_URL.to_string(),
            line_layers: vec![
                LineLayerConfig::bike_lanes("bike-lanes", BOSTON_BIKE_NETWORK_URL),
                LineLayerConfig::bike_lanes("cambridge-bike-lanes", CAMBRIDGE_BIKE_FACILITIES_URL),
            ],
            map: MapViewConfig::default(),
            basemap_tile_url: DEFAULT_BASEMAP_TILE_URL.to_string(),
            mapbox_access_token: None,
        }
    }
}

impl AppConfig {
    /// Clamp zoom bounds into the tile pyramid and the start zoom into the bounds.
    pub fn normalized(mut self) -> Self {
        let map = &mut self.map;
        map.min_zoom = map.min_zoom.clamp(ZOOM_LIMITS.0, ZOOM_LIMITS.1);
        map.max_zoom = map.max_zoom.clamp(ZOOM_LIMITS.0, ZOOM_LIMITS.1);
        if map.min_zoom > map.max_zoom {
            std::mem::swap(&mut map.min_zoom, &mut map.max_zoom);
        }
        map.zoom = map.zoom.clamp(map.min_zoom, map.max_zoom);
        map.center[1] = map.center[1].clamp(-85.0, 85.0);
        for layer in &mut self.line_layers {
            layer.opacity = layer.opacity.clamp(0.0, 1.0);
            layer.width = layer.width.max(0.0);
        }
        self.mapbox_access_token = self
            .mapbox_access_token
            .take()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());
        self
    }

    /// Replace the file token with the environment one when it is set.
    pub fn with_token_override(mut self, env_token: Option<String>) -> Self {
        if let Some(token) = env_token.filter(|token| !token.trim().is_empty()) {
            self.mapbox_access_token = Some(token.trim().to_string());
        }
        self
    }

    /// Basemap tile URL for one tile, or `None` without an access token.
    pub fn basemap_tile_url(&self, z: u8, x: u32, y: u32) -> Option<String> {
        let token = self.mapbox_access_token.as_deref()?;
        Some(
            self.basemap_tile_url
                .replace("{z}", &z.to_string())
                .replace("{x}", &x.to_string())
                .replace("{y}", &y.to_string())
                .replace("{token}", token),
        )
    }
}

pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    let cwd = std::env::current_dir()
        .map_err(|error| ConfigError::Io(format!("failed to read current directory: {error}")))?;
    Ok(cwd.join(CONFIG_FILE_NAME))
}

/// Read the config file. A missing file yields defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = std::fs::read_to_string(path)
        .map_err(|error| ConfigError::Io(format!("failed to read {}: {error}", path.display())))?;
    let config: AppConfig = serde_json::from_str(&text).map_err(|error| {
        ConfigError::InvalidFormat(format!("failed to parse {}: {error}", path.display()))
    })?;
    Ok(config.normalized())
}

/// Config for the running app: file (or defaults on any error) plus env override.
pub fn resolve_config() -> AppConfig {
    let config = match config_file_path().and_then(|path| load_config(&path)) {
        Ok(config) => config,
        Err(error) => {
            log::error!("using default configuration: {error}");
            AppConfig::default()
        }
    };
    config.with_token_override(std::env::var(ACCESS_TOKEN_ENV).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = load_config(&dir.path().join(CONFIG_FILE_NAME)).expect("defaults");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.line_layers.len(), 2);
        assert!(config.mapbox_access_token.is_none());
    }

    #[test]
    fn malformed_file_is_invalid_format() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{ not json").expect("write fixture");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::InvalidFormat(_))));
    }

    #[test]
    fn partial_file_fills_defaults_and_normalizes() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{"trips_url": "trips.csv", "map": {{"zoom": 30, "min_zoom": 16, "max_zoom": 4}}, "mapbox_access_token": "  "}}"#
        )
        .expect("write fixture");
        let config = load_config(file.path()).expect("config loads");
        assert_eq!(config.trips_url, "trips.csv");
        assert_eq!(config.stations_url, DEFAULT_STATIONS_URL);
        assert_eq!((config.map.min_zoom, config.map.max_zoom), (4.0, 16.0));
        assert_eq!(config.map.zoom, 16.0);
        assert!(config.mapbox_access_token.is_none());
    }

    #[test]
    fn env_token_wins_and_enables_basemap() {
        let config = AppConfig::default();
        assert!(config.basemap_tile_url(1, 2, 3).is_none());
        let config = config.with_token_override(Some("pk.test".to_string()));
        let url = config.basemap_tile_url(12, 1238, 1514).expect("token set");
        assert!(url.contains("/12/1238/1514."));
        assert!(url.ends_with("access_token=pk.test"));
    }

    #[test]
    fn blank_env_token_is_ignored() {
        let config = AppConfig {
            mapbox_access_token: Some("file-token".to_string()),
            ..AppConfig::default()
        }
        .with_token_override(Some(" ".to_string()));
        assert_eq!(config.mapbox_access_token.as_deref(), Some("file-token"));
    }
}
