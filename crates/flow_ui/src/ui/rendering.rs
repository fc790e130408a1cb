//! Drawing helpers for the map: tile selection, polylines, and station markers.

use eframe::egui::{self, Color32};

use flow_core::map::Projection;
use flow_core::markers::Marker;
use flow_core::station::LngLat;

use crate::app::{MapBounds, MapViewport, TileKey};
use crate::ui::constants::{MAX_MERCATOR_LAT, MAX_TILE_ZOOM, MAX_VISIBLE_TILES, MARKER_STROKE_WIDTH};
use crate::ui::utils::{marker_fill, to_pos};

fn clamp_lat(lat: f64) -> f64 {
    lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT)
}

fn lon_to_x(lon: f64, zoom: u8) -> f64 {
    let n = (1u32 << zoom) as f64;
    ((lon + 180.0) / 360.0) * n
}

fn lat_to_y(lat: f64, zoom: u8) -> f64 {
    let lat = clamp_lat(lat).to_radians();
    let n = (1u32 << zoom) as f64;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) * 0.5;
    y * n
}

/// Integer tile zoom for a fractional camera zoom.
pub fn tile_zoom(zoom: f64) -> u8 {
    zoom.floor().clamp(0.0, MAX_TILE_ZOOM as f64) as u8
}

/// Tiles covering `bounds`, nearest the center first, capped at `MAX_VISIBLE_TILES`.
pub fn tiles_for_bounds(bounds: &MapBounds, zoom: u8) -> Vec<TileKey> {
    let x_min = lon_to_x(bounds.lng_min, zoom).floor() as i64;
    let x_max = lon_to_x(bounds.lng_max, zoom).floor() as i64;
    let y_min = lat_to_y(bounds.lat_max, zoom).floor() as i64;
    let y_max = lat_to_y(bounds.lat_min, zoom).floor() as i64;
    let max_index = (1u32 << zoom).saturating_sub(1) as i64;
    let x_start = x_min.clamp(0, max_index) as u32;
    let x_end = x_max.clamp(0, max_index) as u32;
    let y_start = y_min.clamp(0, max_index) as u32;
    let y_end = y_max.clamp(0, max_index) as u32;
    let mut tiles = Vec::new();
    for x in x_start..=x_end {
        for y in y_start..=y_end {
            tiles.push(TileKey { z: zoom, x, y });
        }
    }
    let center_x = (x_start + x_end) as f64 * 0.5;
    let center_y = (y_start + y_end) as f64 * 0.5;
    tiles.sort_by(|a, b| {
        let da = (a.x as f64 - center_x).powi(2) + (a.y as f64 - center_y).powi(2);
        let db = (b.x as f64 - center_x).powi(2) + (b.y as f64 - center_y).powi(2);
        da.total_cmp(&db)
    });
    tiles.truncate(MAX_VISIBLE_TILES);
    tiles
}

/// Project and stroke a set of polylines.
pub fn draw_lines(
    painter: &egui::Painter,
    viewport: &MapViewport,
    rect: egui::Rect,
    lines: &[Vec<LngLat>],
    stroke: egui::Stroke,
) {
    for line in lines {
        let points: Vec<egui::Pos2> = line
            .iter()
            .map(|position| to_pos(rect, viewport.project(*position)))
            .collect();
        if points.len() >= 2 && points.iter().any(|point| rect.expand(stroke.width).contains(*point))
        {
            painter.add(egui::Shape::line(points, stroke));
        }
    }
}

/// Draw a station circle; returns its screen center when it was drawn.
pub fn draw_marker(painter: &egui::Painter, rect: egui::Rect, marker: &Marker) -> Option<egui::Pos2> {
    let center = to_pos(rect, marker.screen?);
    let radius = marker.radius.max(0.0) as f32;
    if !rect.expand(radius).contains(center) {
        return None;
    }
    painter.circle(
        center,
        radius,
        marker_fill(marker.flow_level),
        egui::Stroke::new(MARKER_STROKE_WIDTH, Color32::WHITE),
    );
    Some(center)
}

/// Topmost marker under `pointer`, i.e. the last drawn one containing it.
pub fn marker_at<'a, I>(markers: I, rect: egui::Rect, pointer: egui::Pos2) -> Option<&'a Marker>
where
    I: IntoIterator<Item = &'a Marker>,
{
    markers
        .into_iter()
        .filter(|marker| {
            marker.screen.is_some_and(|screen| {
                let radius = marker.radius.max(2.0) as f32;
                to_pos(rect, screen).distance(pointer) <= radius
            })
        })
        .last()
}
