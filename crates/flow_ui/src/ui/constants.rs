//! Constants used throughout the UI.

/// Web Mercator tile edge in pixels, matching the vector tile style zoom levels.
pub const TILE_SIZE_PX: f64 = 512.0;

/// Latitude limit of the Web Mercator projection.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

/// Highest zoom level the basemap tiles are published at.
pub const MAX_TILE_ZOOM: u8 = 16;

/// Upper bound on basemap tiles requested for one frame.
pub const MAX_VISIBLE_TILES: usize = 48;

/// Zoom levels per scroll pixel.
pub const SCROLL_ZOOM_RATE: f64 = 1.0 / 240.0;

pub const MAP_BACKGROUND_GRAY: u8 = 236;
pub const ROAD_GRAY: u8 = 200;
pub const MARKER_OPACITY: f32 = 0.8;
pub const MARKER_STROKE_WIDTH: f32 = 1.0;
