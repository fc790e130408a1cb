use std::time::Duration;

use eframe::egui;

use crate::app::FlowUiApp;
use crate::ui::controls::render_control_panel;
use crate::ui::map_view::render_map_panel;

pub fn run(app: FlowUiApp) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 860.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Bikewatching",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}

impl eframe::App for FlowUiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_background();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            render_control_panel(ui, self);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                render_map_panel(ui, self);
            });

        // Background fetches report through channels; keep polling them.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
