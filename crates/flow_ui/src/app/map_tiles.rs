//! Street basemap: vector tiles fetched on background threads.

use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{Receiver, Sender};

mod bookkeeping;
mod fetch_decode;
mod types;

use types::TileResult;
pub use types::{TileGeometry, TileKey};

pub struct MapTileState {
    tiles: HashMap<TileKey, TileGeometry>,
    inflight: HashSet<TileKey>,
    errors: HashMap<TileKey, String>,
    sender: Sender<TileResult>,
    receiver: Receiver<TileResult>,
}

impl MapTileState {
    pub fn new() -> Self {
        let (sender, receiver) = std::sync::mpsc::channel();
        Self {
            tiles: HashMap::new(),
            inflight: HashSet::new(),
            errors: HashMap::new(),
            sender,
            receiver,
        }
    }

    pub fn drain_results(&mut self) {
        while let Ok(result) = self.receiver.try_recv() {
            if let Some((key, geometry)) =
                bookkeeping::apply_tile_result(&mut self.inflight, &mut self.errors, result)
            {
                self.tiles.insert(key, geometry);
            }
        }
    }

    /// Start fetches for visible tiles not cached, in flight, or failed before.
    /// `url_for` returns `None` when the basemap is disabled.
    pub fn request_missing_tiles<F>(&mut self, keys: &[TileKey], url_for: F)
    where
        F: Fn(TileKey) -> Option<String>,
    {
        let mut inflight_count = self.inflight.len();
        for &key in keys {
            if self.tiles.contains_key(&key)
                || self.inflight.contains(&key)
                || self.errors.contains_key(&key)
            {
                continue;
            }
            let limit = bookkeeping::current_inflight_limit(self.tiles.len());
            if inflight_count >= limit {
                break;
            }
            let Some(url) = url_for(key) else {
                return;
            };
            inflight_count += 1;
            self.inflight.insert(key);
            let sender = self.sender.clone();
            std::thread::spawn(move || {
                let result = fetch_decode::fetch_tile(&url, key);
                let _ = sender.send(result);
            });
        }
    }

    pub fn evict_offscreen(&mut self, visible: &[TileKey]) {
        let visible: HashSet<TileKey> = visible.iter().copied().collect();
        bookkeeping::evict_offscreen_tiles(&mut self.tiles, &visible);
    }

    pub fn tile(&self, key: &TileKey) -> Option<&TileGeometry> {
        self.tiles.get(key)
    }
}
