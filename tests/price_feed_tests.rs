use std::time::{Duration, Instant};

use rand::rngs::mock::StepRng;
use trading_sim::app::AppState;
use trading_sim::config::Config;
use trading_sim::price_feed::{PriceFeed, PriceTicker};

const INTERVAL: Duration = Duration::from_millis(3_000);

fn state() -> AppState {
    AppState::from_config(&Config::default()).expect("default config is valid")
}

#[test]
fn ticker_fires_once_per_interval() {
    let start = Instant::now();
    let mut ticker = PriceTicker::new(INTERVAL, start);

    assert!(!ticker.poll(start));
    assert!(!ticker.poll(start + Duration::from_millis(2_999)));
    assert!(ticker.poll(start + INTERVAL));
    assert!(!ticker.poll(start + INTERVAL));
    assert!(ticker.poll(start + INTERVAL * 2));
}

#[test]
fn ticker_does_not_replay_missed_ticks() {
    let start = Instant::now();
    let mut ticker = PriceTicker::new(INTERVAL, start);
    let late = start + INTERVAL * 5;
    assert!(ticker.poll(late));
    assert!(!ticker.poll(late));
    assert_eq!(ticker.remaining(late), INTERVAL);
}

#[test]
fn remaining_counts_down_to_zero() {
    let start = Instant::now();
    let ticker = PriceTicker::new(INTERVAL, start);
    assert_eq!(ticker.remaining(start), INTERVAL);
    assert_eq!(
        ticker.remaining(start + Duration::from_millis(1_000)),
        Duration::from_millis(2_000)
    );
    assert_eq!(ticker.remaining(start + INTERVAL * 2), Duration::ZERO);
}

#[test]
fn feed_only_moves_prices_when_due() {
    let start = Instant::now();
    let mut st = state();
    let mut feed = PriceFeed::new(PriceTicker::new(INTERVAL, start), StepRng::new(0, 0));

    assert!(!feed.advance(start + Duration::from_millis(10), &mut st));
    assert_eq!(st.market.price("AAPL"), Some(150.0));

    assert!(feed.advance(start + INTERVAL, &mut st));
    assert_eq!(st.market.price("AAPL"), Some(145.0));
    assert_eq!(st.market.price("GOOG"), Some(2795.0));
    assert_eq!(feed.ticks(), 1);
}

#[test]
fn seeded_feeds_agree() {
    let start = Instant::now();
    let mut a = PriceFeed::from_seed(PriceTicker::new(INTERVAL, start), Some(9));
    let mut b = PriceFeed::from_seed(PriceTicker::new(INTERVAL, start), Some(9));
    let mut sa = state();
    let mut sb = state();
    for i in 1..=20 {
        a.advance(start + INTERVAL * i, &mut sa);
        b.advance(start + INTERVAL * i, &mut sb);
    }
    assert_eq!(sa.market, sb.market);
    assert_eq!(a.ticks(), 20);
}
