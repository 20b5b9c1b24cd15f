use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::error::TradeError;
use crate::stock_data::{Market, Stock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("BUY"),
            Side::Sell => f.write_str("SELL"),
        }
    }
}

/// One executed trade. Never changed after it is appended to the log.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub symbol: String,
    pub quantity: u32,
    pub price: f64,
    pub side: Side,
    pub timestamp: DateTime<Local>,
}

impl Transaction {
    fn new(symbol: &str, quantity: u32, price: f64, side: Side) -> Self {
        Self {
            symbol: symbol.to_string(),
            quantity,
            price,
            side,
            timestamp: Local::now(),
        }
    }

    pub fn total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} {} of {} @ ${:.2}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.side,
            self.quantity,
            self.symbol,
            self.price
        )
    }
}

// Cash, share counts and the audit trail of every trade
#[derive(Debug, Clone)]
pub struct Portfolio {
    cash: f64,
    holdings: BTreeMap<String, u32>,
    transactions: Vec<Transaction>,
}

impl Portfolio {
    pub fn new(initial_cash: f64) -> Self {
        Self {
            cash: initial_cash,
            holdings: BTreeMap::new(),
            transactions: Vec::new(),
        }
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn holding(&self, symbol: &str) -> u32 {
        self.holdings.get(symbol).copied().unwrap_or(0)
    }

    pub fn holdings(&self) -> &BTreeMap<String, u32> {
        &self.holdings
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Buy `quantity` shares at the stock's current price.
    pub fn buy(&mut self, stock: &Stock, quantity: u32) -> Result<Transaction, TradeError> {
        if quantity == 0 {
            return Err(TradeError::InvalidQuantity(quantity.to_string()));
        }
        let cost = stock.price * f64::from(quantity);
        if self.cash < cost {
            warn!(
                symbol = %stock.symbol,
                quantity,
                cost,
                cash = self.cash,
                "buy rejected: insufficient funds"
            );
            return Err(TradeError::InsufficientFunds {
                needed: cost,
                available: self.cash,
            });
        }

        let held = self.holding(&stock.symbol);
        let Some(new_held) = held.checked_add(quantity) else {
            warn!(
                symbol = %stock.symbol,
                requested = quantity,
                held,
                "buy rejected: holding would overflow"
            );
            return Err(TradeError::HoldingOverflow {
                symbol: stock.symbol.clone(),
                requested: quantity,
                held,
            });
        };

        let tx = Transaction::new(&stock.symbol, quantity, stock.price, Side::Buy);
        self.cash -= tx.total();
        self.holdings.insert(stock.symbol.clone(), new_held);
        self.transactions.push(tx.clone());
        info!(symbol = %stock.symbol, quantity, price = stock.price, cash = self.cash, "bought");
        Ok(tx)
    }

    /// Sell `quantity` shares at the stock's current price. Holdings that
    /// drop to zero are removed.
    pub fn sell(&mut self, stock: &Stock, quantity: u32) -> Result<Transaction, TradeError> {
        if quantity == 0 {
            return Err(TradeError::InvalidQuantity(quantity.to_string()));
        }
        let held = self.holding(&stock.symbol);
        if held < quantity {
            warn!(
                symbol = %stock.symbol,
                requested = quantity,
                held,
                "sell rejected: not enough shares"
            );
            return Err(TradeError::InsufficientShares {
                symbol: stock.symbol.clone(),
                requested: quantity,
                held,
            });
        }

        let remaining = held - quantity;
        if remaining == 0 {
            self.holdings.remove(&stock.symbol);
        } else {
            self.holdings.insert(stock.symbol.clone(), remaining);
        }
        let tx = Transaction::new(&stock.symbol, quantity, stock.price, Side::Sell);
        self.cash += tx.total();
        self.transactions.push(tx.clone());
        info!(symbol = %stock.symbol, quantity, price = stock.price, cash = self.cash, "sold");
        Ok(tx)
    }

    /// Market value of all held shares. Symbols missing from the market
    /// count as zero.
    pub fn holdings_value(&self, market: &Market) -> f64 {
        self.holdings
            .iter()
            .map(|(symbol, qty)| market.price(symbol).unwrap_or(0.0) * f64::from(*qty))
            .sum()
    }

    pub fn net_worth(&self, market: &Market) -> f64 {
        self.cash + self.holdings_value(market)
    }
}
