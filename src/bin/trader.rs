use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use eframe::egui;
use tracing::info;

use trading_sim::app::AppState;
use trading_sim::config::Config;
use trading_sim::price_feed::{PriceFeed, PriceTicker};
use trading_sim::ui::StockApp;

fn main() -> Result<()> {
    let config_path = Config::resolve_path();
    let config = Config::load_or_default(&config_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().or_else(|_| {
                tracing_subscriber::EnvFilter::try_new(&config.logging.level)
            })
            .context("invalid logging.level")?,
        )
        .init();

    let state = AppState::from_config(&config)?;
    let ticker = PriceTicker::new(config.market.tick_interval(), Instant::now());
    let feed = PriceFeed::from_seed(ticker, config.market.seed);
    info!(
        config = %config_path.display(),
        stocks = state.market.len(),
        cash = state.portfolio.cash(),
        tick_ms = config.market.tick_interval_ms,
        "starting trading simulator"
    );

    // Launch the UI in the main thread
    let app = StockApp::new(state, feed);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.ui.title.clone())
            .with_inner_size([config.ui.width, config.ui.height]),
        ..Default::default()
    };
    eframe::run_native(
        &config.ui.title,
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow!("failed to run native window: {e}"))?;

    info!("window closed, price timer stopped");
    Ok(())
}
