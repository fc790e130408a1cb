//! The interactive map: basemap, bike lanes, and station markers.

use eframe::egui::{self, Color32};

use flow_core::map::{ScreenPoint, ViewportEvent};

use crate::app::{DataState, FlowUiApp, LayerStatus};
use crate::ui::constants::{MAP_BACKGROUND_GRAY, ROAD_GRAY, SCROLL_ZOOM_RATE};
use crate::ui::rendering::{draw_lines, draw_marker, marker_at, tile_zoom, tiles_for_bounds};
use crate::ui::utils::line_color;

pub fn render_map_panel(ui: &mut egui::Ui, app: &mut FlowUiApp) {
    let size = ui.available_size();
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());

    for event in collect_viewport_events(ui, app, rect, &response) {
        app.notify_viewport(event);
    }

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, Color32::from_gray(MAP_BACKGROUND_GRAY));

    render_basemap(&painter, app, rect);
    render_line_layers(&painter, app, rect);
    render_markers(&painter, app, rect, &response);
}

/// Apply pointer input to the viewport and report what changed.
fn collect_viewport_events(
    ui: &egui::Ui,
    app: &mut FlowUiApp,
    rect: egui::Rect,
    response: &egui::Response,
) -> Vec<ViewportEvent> {
    let mut events = Vec::new();
    let viewport = &mut app.viewport;

    events.extend(viewport.resize(rect.width() as f64, rect.height() as f64));

    if response.dragged() {
        let delta = response.drag_delta();
        events.extend(viewport.pan_by(delta.x as f64, delta.y as f64));
    }

    if response.hovered() {
        let scroll = ui.input(|input| input.smooth_scroll_delta.y) as f64;
        if scroll != 0.0 {
            let anchor = response
                .hover_pos()
                .map(|pos| ScreenPoint::new((pos.x - rect.left()) as f64, (pos.y - rect.top()) as f64))
                .unwrap_or_else(|| ScreenPoint::new(rect.width() as f64 * 0.5, rect.height() as f64 * 0.5));
            events.extend(viewport.zoom_at(scroll * SCROLL_ZOOM_RATE, anchor));
        }
    }

    if response.drag_stopped() {
        events.push(ViewportEvent::MoveEnd);
    }
    events
}

fn render_basemap(painter: &egui::Painter, app: &mut FlowUiApp, rect: egui::Rect) {
    let zoom = tile_zoom(app.viewport.zoom());
    let tiles = tiles_for_bounds(&app.viewport.bounds(), zoom);
    let config = &app.config;
    app.map_tiles
        .request_missing_tiles(&tiles, |key| config.basemap_tile_url(key.z, key.x, key.y));
    app.map_tiles.evict_offscreen(&tiles);

    let road_stroke = egui::Stroke::new(1.0, Color32::from_gray(ROAD_GRAY));
    for tile in &tiles {
        if let Some(geometry) = app.map_tiles.tile(tile) {
            draw_lines(painter, &app.viewport, rect, &geometry.lines, road_stroke);
        }
    }
}

fn render_line_layers(painter: &egui::Painter, app: &FlowUiApp, rect: egui::Rect) {
    for layer in app.line_layers.layers() {
        if layer.status != LayerStatus::Ready {
            continue;
        }
        let stroke = egui::Stroke::new(
            layer.config.width,
            line_color(layer.config.color, layer.config.opacity),
        );
        draw_lines(painter, &app.viewport, rect, &layer.lines, stroke);
    }
}

fn render_markers(
    painter: &egui::Painter,
    app: &FlowUiApp,
    rect: egui::Rect,
    response: &egui::Response,
) {
    let DataState::Ready(controller) = &app.data else {
        return;
    };
    for marker in controller.markers().iter() {
        draw_marker(painter, rect, marker);
    }
    if let Some(pointer) = response.hover_pos() {
        if let Some(marker) = marker_at(controller.markers().iter(), rect, pointer) {
            response.clone().on_hover_text_at_pointer(marker.title.as_str());
        }
    }
}
