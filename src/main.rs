use runway_ratatui::{
    app::App,
    logging,
    settings::{Settings, get_game_data_dir},
};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let settings = Settings::load();
    if let Err(e) = logging::init(get_game_data_dir(), settings.debug_mode) {
        eprintln!("Logging disabled: {e}");
    }
    log::info!("Starting Runway v{}", env!("CARGO_PKG_VERSION"));

    let mut app = App::new(settings);
    let result = app.run().await;
    if let Err(e) = &result {
        log::error!("Runway stopped with an error: {e:#?}");
    }
    result
}
