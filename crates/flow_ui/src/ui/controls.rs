//! Top bar: title, time slider, and flow legend.

use eframe::egui::{self, Vec2};

use flow_core::flow::FLOW_LEVELS;
use flow_core::time_of_day::{ANY_TIME_SLIDER_VALUE, LAST_MINUTE_OF_DAY};

use crate::app::{DataState, FlowUiApp};
use crate::ui::utils::marker_fill;

const SLIDER_WIDTH: f32 = 320.0;
const ANY_TIME_LABEL: &str = "(any time)";

pub fn render_control_panel(ui: &mut egui::Ui, app: &mut FlowUiApp) {
    ui.horizontal(|ui| {
        ui.heading("Bikewatching");
        ui.add_space(24.0);
        render_time_filter(ui, app);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            render_status(ui, app);
        });
    });
    render_legend(ui);
}

fn render_time_filter(ui: &mut egui::Ui, app: &mut FlowUiApp) {
    ui.label("Filter by time:");
    let mut value = app.slider_value;
    ui.spacing_mut().slider_width = SLIDER_WIDTH;
    let response = ui.add(
        egui::Slider::new(&mut value, ANY_TIME_SLIDER_VALUE..=LAST_MINUTE_OF_DAY).show_value(false),
    );
    if response.changed() {
        app.set_slider_value(value);
    }

    let (selected_time, any_time_visible) = match app.controller() {
        Some(controller) => {
            let display = controller.display();
            (display.selected_time.clone(), display.any_time_visible)
        }
        None => (String::new(), true),
    };
    ui.label(egui::RichText::new(selected_time).strong());
    ui.add_visible(
        any_time_visible,
        egui::Label::new(egui::RichText::new(ANY_TIME_LABEL).italics().weak()),
    );
}

fn render_status(ui: &mut egui::Ui, app: &FlowUiApp) {
    match &app.data {
        DataState::Loading(_) => {
            ui.spinner();
            ui.label("Loading stations and trips…");
        }
        DataState::Ready(controller) => {
            ui.label(format!(
                "{} stations · {} of {} trips",
                controller.stations().len(),
                controller.visible_trip_count(),
                controller.trip_count()
            ));
        }
        DataState::Failed(error) => {
            ui.colored_label(egui::Color32::from_rgb(200, 40, 40), "Station data unavailable")
                .on_hover_text(error.as_str());
        }
    }
}

fn legend_item(ui: &mut egui::Ui, flow_level: f64, label: &str) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(Vec2::new(14.0, 14.0), egui::Sense::hover());
        ui.painter()
            .circle_filled(rect.center(), 6.0, marker_fill(flow_level));
        ui.label(label);
    });
}

fn render_legend(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.label("Legend:");
        let labels = ["More arrivals", "Balanced", "More departures"];
        for (level, label) in FLOW_LEVELS.iter().zip(labels) {
            legend_item(ui, *level, label);
        }
    });
}
