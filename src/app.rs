use std::fmt::Write as _;

use anyhow::Result;
use rand::Rng;
use tracing::warn;

use crate::config::Config;
use crate::error::TradeError;
use crate::portfolio::{Portfolio, Side, Transaction};
use crate::stock_data::{normalize_symbol, Market};

/// Everything the window shows and mutates. Handlers receive it explicitly
/// rather than reaching into shared fields.
#[derive(Debug, Clone)]
pub struct AppState {
    pub market: Market,
    pub portfolio: Portfolio,
}

impl AppState {
    pub fn new(market: Market, portfolio: Portfolio) -> Self {
        Self { market, portfolio }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let market = Market::new(config.market.initial_stocks())?;
        Ok(Self::new(market, Portfolio::new(config.portfolio.initial_cash)))
    }

    /// Handle a Buy/Sell click with the raw text from the two inputs.
    pub fn trade(
        &mut self,
        side: Side,
        symbol_input: &str,
        quantity_input: &str,
    ) -> Result<Transaction, TradeError> {
        let result = self.try_trade(side, symbol_input, quantity_input);
        if let Err(e) = &result {
            warn!(%side, symbol = symbol_input, quantity = quantity_input, error = %e, "trade rejected");
        }
        result
    }

    fn try_trade(
        &mut self,
        side: Side,
        symbol_input: &str,
        quantity_input: &str,
    ) -> Result<Transaction, TradeError> {
        let quantity = parse_quantity(quantity_input)?;
        let symbol = normalize_symbol(symbol_input);
        let stock = self
            .market
            .get(&symbol)
            .ok_or_else(|| TradeError::UnknownSymbol(symbol.clone()))?;
        match side {
            Side::Buy => self.portfolio.buy(stock, quantity),
            Side::Sell => self.portfolio.sell(stock, quantity),
        }
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.market.fluctuate_all(rng);
    }

    pub fn market_rows(&self) -> Vec<(String, String)> {
        self.market
            .iter()
            .map(|s| (s.symbol.clone(), format!("{:.2}", s.price)))
            .collect()
    }

    pub fn portfolio_text(&self) -> String {
        let mut out = String::from("=== Portfolio ===\n");
        for (symbol, qty) in self.portfolio.holdings() {
            let price = self.market.price(symbol).unwrap_or(0.0);
            let _ = writeln!(out, "{}: {} shares @ ${:.2}", symbol, qty, price);
        }
        let _ = writeln!(out, "Cash: ${:.2}", self.portfolio.cash());
        let _ = write!(out, "Net worth: ${:.2}", self.portfolio.net_worth(&self.market));
        out
    }

    pub fn transactions_text(&self) -> String {
        let mut out = String::from("=== Transactions ===\n");
        for tx in self.portfolio.transactions() {
            let _ = writeln!(out, "{}", tx);
        }
        out
    }
}

/// Accepts only whole, positive share counts.
pub fn parse_quantity(input: &str) -> Result<u32, TradeError> {
    match input.trim().parse::<u32>() {
        Ok(q) if q > 0 => Ok(q),
        _ => Err(TradeError::InvalidQuantity(input.to_string())),
    }
}
