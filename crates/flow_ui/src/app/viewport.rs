//! Web Mercator viewport: camera state, pan/zoom, and projection.

use flow_core::config::MapViewConfig;
use flow_core::map::{Projection, ScreenPoint, ViewportEvent};
use flow_core::station::LngLat;

use crate::ui::constants::{MAX_MERCATOR_LAT, TILE_SIZE_PX};

/// Visible geographic extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapViewport {
    center: LngLat,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    width: f64,
    height: f64,
}

impl MapViewport {
    pub fn new(config: &MapViewConfig) -> Self {
        Self {
            center: LngLat::new(config.center[0], config.center[1]),
            zoom: config.zoom.clamp(config.min_zoom, config.max_zoom),
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn center(&self) -> LngLat {
        self.center
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE_PX * 2f64.powf(self.zoom)
    }

    fn to_world(&self, position: LngLat) -> (f64, f64) {
        let world = self.world_size();
        let lat = position.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
        let x = (position.lng + 180.0) / 360.0 * world;
        let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) * 0.5 * world;
        (x, y)
    }

    fn from_world(&self, x: f64, y: f64) -> LngLat {
        let world = self.world_size();
        let lng = x / world * 360.0 - 180.0;
        let lat = (std::f64::consts::PI * (1.0 - 2.0 * y / world))
            .sinh()
            .atan()
            .to_degrees();
        LngLat::new(lng, lat)
    }

    /// Geographic position under a screen point.
    pub fn unproject(&self, point: ScreenPoint) -> LngLat {
        let (cx, cy) = self.to_world(self.center);
        self.from_world(
            cx + point.x - self.width * 0.5,
            cy + point.y - self.height * 0.5,
        )
    }

    /// Returns `Some(Resize)` when the size actually changed.
    pub fn resize(&mut self, width: f64, height: f64) -> Option<ViewportEvent> {
        if (self.width - width).abs() < f64::EPSILON && (self.height - height).abs() < f64::EPSILON {
            return None;
        }
        self.width = width;
        self.height = height;
        Some(ViewportEvent::Resize)
    }

    /// Move the map content by a pixel delta, like dragging it.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> Option<ViewportEvent> {
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        let (cx, cy) = self.to_world(self.center);
        let world = self.world_size();
        let y = (cy - dy).clamp(0.0, world);
        let x = (cx - dx).rem_euclid(world);
        self.center = self.from_world(x, y);
        Some(ViewportEvent::Move)
    }

    /// Zoom by `delta` levels keeping the geographic point under `anchor` fixed.
    pub fn zoom_at(&mut self, delta: f64, anchor: ScreenPoint) -> Option<ViewportEvent> {
        let target = (self.zoom + delta).clamp(self.min_zoom, self.max_zoom);
        if (target - self.zoom).abs() < 1e-9 {
            return None;
        }
        let anchored = self.unproject(anchor);
        self.zoom = target;
        let (ax, ay) = self.to_world(anchored);
        let cx = ax - (anchor.x - self.width * 0.5);
        let cy = ay - (anchor.y - self.height * 0.5);
        self.center = self.from_world(cx, cy);
        Some(ViewportEvent::Zoom)
    }

    pub fn bounds(&self) -> MapBounds {
        let top_left = self.unproject(ScreenPoint::new(0.0, 0.0));
        let bottom_right = self.unproject(ScreenPoint::new(self.width, self.height));
        MapBounds {
            lat_min: bottom_right.lat,
            lat_max: top_left.lat,
            lng_min: top_left.lng,
            lng_max: bottom_right.lng,
        }
    }
}

impl Projection for MapViewport {
    fn project(&self, position: LngLat) -> ScreenPoint {
        let (cx, cy) = self.to_world(self.center);
        let (x, y) = self.to_world(position);
        ScreenPoint::new(x - cx + self.width * 0.5, y - cy + self.height * 0.5)
    }
}
