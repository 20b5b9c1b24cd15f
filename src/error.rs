use thiserror::Error;

/// Reasons a buy or sell request is turned down. The portfolio is left
/// untouched whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TradeError {
    #[error("Invalid quantity: {0:?}")]
    InvalidQuantity(String),

    #[error("Stock not found: {0}")]
    UnknownSymbol(String),

    #[error("Insufficient funds! Need ${needed:.2}, have ${available:.2}")]
    InsufficientFunds { needed: f64, available: f64 },

    #[error("Not enough stock to sell! Requested {requested} of {symbol}, holding {held}")]
    InsufficientShares {
        symbol: String,
        requested: u32,
        held: u32,
    },

    #[error("Cannot buy {requested} more {symbol}: already holding {held}")]
    HoldingOverflow {
        symbol: String,
        requested: u32,
        held: u32,
    },
}
