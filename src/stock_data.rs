use anyhow::{bail, Result};
use rand::Rng;

/// Prices never fall below this.
pub const PRICE_FLOOR: f64 = 1.0;
/// Largest move a single tick can apply in either direction.
pub const MAX_PRICE_STEP: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Stock {
    pub symbol: String,
    pub price: f64,
}

impl Stock {
    pub fn new(symbol: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
        }
    }

    // Simulate price fluctuation for the stock
    pub fn fluctuate_price<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let change = (rng.gen::<f64>() - 0.5) * 2.0 * MAX_PRICE_STEP; // [-5, +5)
        self.price = (self.price + change).max(PRICE_FLOOR);
    }
}

pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// The fixed set of tradable stocks. Order is the order stocks were listed
/// in and is also the display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Market {
    stocks: Vec<Stock>,
}

impl Market {
    pub fn new(stocks: Vec<Stock>) -> Result<Self> {
        let mut out: Vec<Stock> = Vec::with_capacity(stocks.len());
        for stock in stocks {
            let symbol = normalize_symbol(&stock.symbol);
            if symbol.is_empty() {
                bail!("stock symbol must not be empty");
            }
            if !(stock.price.is_finite() && stock.price > 0.0) {
                bail!("stock '{}' has invalid price {}", symbol, stock.price);
            }
            if out.iter().any(|s| s.symbol == symbol) {
                bail!("duplicate stock symbol '{}'", symbol);
            }
            out.push(Stock::new(symbol, stock.price));
        }
        Ok(Self { stocks: out })
    }

    pub fn get(&self, symbol: &str) -> Option<&Stock> {
        self.stocks.iter().find(|s| s.symbol == symbol)
    }

    pub fn price(&self, symbol: &str) -> Option<f64> {
        self.get(symbol).map(|s| s.price)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stock> {
        self.stocks.iter()
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    pub fn fluctuate_all<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for stock in self.stocks.iter_mut() {
            stock.fluctuate_price(rng);
        }
    }
}

// Function to initialize stock data
pub fn initialize_stocks() -> Vec<Stock> {
    vec![
        Stock::new("AAPL", 150.0),
        Stock::new("GOOG", 2800.0),
        Stock::new("TSLA", 700.0),
    ]
}
