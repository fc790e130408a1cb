mod app;
mod ui;

use app::FlowUiApp;
use flow_core::config::resolve_config;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("flow_core=info,flow_ui=info"),
    )
    .init();

    let config = resolve_config();
    log::info!(
        "loading stations from {} and trips from {}",
        config.stations_url,
        config.trips_url
    );
    ui::app_shell::run(FlowUiApp::new(config))
}
