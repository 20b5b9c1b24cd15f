pub mod app;
pub mod config;
pub mod error;
pub mod portfolio;
pub mod price_feed;
pub mod stock_data;
pub mod ui;
