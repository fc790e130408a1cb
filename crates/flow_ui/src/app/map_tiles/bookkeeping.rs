use std::collections::{HashMap, HashSet};

use super::types::{TileGeometry, TileKey, TileResult};

/// Decoded tiles kept in memory before off-screen ones are dropped.
const MAX_CACHED_TILES: usize = 192;

pub(crate) fn current_inflight_limit(tile_count: usize) -> usize {
    const WARMUP_TILES: usize = 6;
    const WARMUP_LIMIT: usize = 4;
    const MAX_LIMIT: usize = 12;
    if tile_count >= WARMUP_TILES {
        MAX_LIMIT
    } else {
        WARMUP_LIMIT
    }
}

pub(crate) fn apply_tile_result(
    inflight: &mut HashSet<TileKey>,
    errors: &mut HashMap<TileKey, String>,
    result: TileResult,
) -> Option<(TileKey, TileGeometry)> {
    inflight.remove(&result.key);
    if let Some(error) = result.error {
        log::warn!(
            "basemap tile {}/{}/{} failed: {error}",
            result.key.z,
            result.key.x,
            result.key.y
        );
        errors.insert(result.key, error);
        return None;
    }

    result.geometry.map(|geometry| (result.key, geometry))
}

/// Drop cached tiles outside `visible` once the cache grows past its limit.
pub(crate) fn evict_offscreen_tiles(
    tiles: &mut HashMap<TileKey, TileGeometry>,
    visible: &HashSet<TileKey>,
) {
    if tiles.len() <= MAX_CACHED_TILES {
        return;
    }
    tiles.retain(|key, _| visible.contains(key));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(x: u32) -> TileKey {
        TileKey { z: 12, x, y: 1514 }
    }

    #[test]
    fn failed_tiles_are_remembered() {
        let mut inflight = HashSet::from([key(1)]);
        let mut errors = HashMap::new();
        let result = TileResult {
            key: key(1),
            geometry: None,
            error: Some("status 401".to_string()),
        };
        assert!(apply_tile_result(&mut inflight, &mut errors, result).is_none());
        assert!(inflight.is_empty());
        assert_eq!(errors.get(&key(1)).map(String::as_str), Some("status 401"));
    }

    #[test]
    fn eviction_only_kicks_in_past_the_limit() {
        let mut tiles: HashMap<TileKey, TileGeometry> = (0..10)
            .map(|x| (key(x), TileGeometry::default()))
            .collect();
        let visible = HashSet::from([key(0)]);
        evict_offscreen_tiles(&mut tiles, &visible);
        assert_eq!(tiles.len(), 10);

        let mut tiles: HashMap<TileKey, TileGeometry> = (0..(MAX_CACHED_TILES as u32 + 1))
            .map(|x| (key(x), TileGeometry::default()))
            .collect();
        evict_offscreen_tiles(&mut tiles, &visible);
        assert_eq!(tiles.len(), 1);
    }

    #[test]
    fn inflight_limit_grows_after_warmup() {
        assert_eq!(current_inflight_limit(0), 4);
        assert_eq!(current_inflight_limit(6), 12);
    }
}
