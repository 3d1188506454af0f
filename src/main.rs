use cvviewer::{run_viewer, ViewerConfig};

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ViewerConfig::load().unwrap_or_else(|e| {
        log::warn!("{e}; using default configuration");
        ViewerConfig::default()
    });
    run_viewer(config)
}
