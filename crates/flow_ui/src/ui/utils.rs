//! Utility functions for the UI: colors and conversions.

use eframe::egui::{self, Color32};
use flow_core::map::ScreenPoint;

use crate::ui::constants::MARKER_OPACITY;

/// Color of departure-heavy stations (steelblue).
pub fn departures_color() -> Color32 {
    Color32::from_rgb(70, 130, 180)
}

/// Color of arrival-heavy stations (darkorange).
pub fn arrivals_color() -> Color32 {
    Color32::from_rgb(255, 140, 0)
}

/// Blend between the arrivals and departures colors by flow level.
pub fn flow_color(flow_level: f64) -> Color32 {
    let t = flow_level.clamp(0.0, 1.0) as f32;
    let departures = departures_color();
    let arrivals = arrivals_color();
    let mix = |d: u8, a: u8| (d as f32 * t + a as f32 * (1.0 - t)).round() as u8;
    Color32::from_rgb(
        mix(departures.r(), arrivals.r()),
        mix(departures.g(), arrivals.g()),
        mix(departures.b(), arrivals.b()),
    )
}

pub fn marker_fill(flow_level: f64) -> Color32 {
    with_opacity(flow_color(flow_level), MARKER_OPACITY)
}

pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

pub fn line_color(rgb: [u8; 3], opacity: f32) -> Color32 {
    with_opacity(Color32::from_rgb(rgb[0], rgb[1], rgb[2]), opacity)
}

/// Screen point relative to the map rect, as an absolute egui position.
pub fn to_pos(rect: egui::Rect, point: ScreenPoint) -> egui::Pos2 {
    egui::pos2(rect.left() + point.x as f32, rect.top() + point.y as f32)
}
