use flow_core::station::LngLat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

/// Road polylines decoded from one basemap tile.
#[derive(Debug, Clone, Default)]
pub struct TileGeometry {
    pub lines: Vec<Vec<LngLat>>,
}

pub(crate) struct TileResult {
    pub key: TileKey,
    pub geometry: Option<TileGeometry>,
    pub error: Option<String>,
}
