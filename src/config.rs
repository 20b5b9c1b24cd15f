use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::stock_data::{initialize_stocks, normalize_symbol, Market, Stock};

pub const CONFIG_ENV: &str = "TRADING_SIM_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub portfolio: PortfolioConfig,
    pub market: MarketConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    pub initial_cash: f64,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            initial_cash: 10_000.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub tick_interval_ms: u64,
    pub seed: Option<u64>,
    pub stocks: Vec<StockConfig>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 3_000,
            seed: None,
            stocks: initialize_stocks()
                .into_iter()
                .map(|s| StockConfig {
                    symbol: s.symbol,
                    price: s.price,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StockConfig {
    pub symbol: String,
    pub price: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "Stock Trading Platform".to_string(),
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl MarketConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn initial_stocks(&self) -> Vec<Stock> {
        self.stocks
            .iter()
            .map(|s| Stock::new(normalize_symbol(&s.symbol), s.price))
            .collect()
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).context("failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&config_str).with_context(|| format!("invalid {}", path.display()))
    }

    /// Like [`Config::load`], but a missing file yields the built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Path from `TRADING_SIM_CONFIG`, falling back to `config/default.toml`.
    pub fn resolve_path() -> std::path::PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(Into::into)
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.into())
    }

    pub fn validate(&self) -> Result<()> {
        let cash = self.portfolio.initial_cash;
        if !cash.is_finite() || cash < 0.0 {
            bail!("portfolio.initial_cash must be a non-negative number, got {}", cash);
        }
        if self.market.tick_interval_ms == 0 {
            bail!("market.tick_interval_ms must be > 0");
        }
        if self.market.stocks.is_empty() {
            bail!("market.stocks must list at least one stock");
        }
        Market::new(self.market.initial_stocks()).context("invalid market.stocks")?;
        let (width, height) = (self.ui.width, self.ui.height);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            bail!("ui.width and ui.height must be positive numbers, got {}x{}", width, height);
        }
        Ok(())
    }
}
