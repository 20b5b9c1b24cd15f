use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use trading_sim::stock_data::{
    initialize_stocks, normalize_symbol, Market, Stock, MAX_PRICE_STEP, PRICE_FLOOR,
};

#[test]
fn lowest_draw_moves_price_down_by_max_step() {
    let mut stock = Stock::new("AAPL", 150.0);
    stock.fluctuate_price(&mut StepRng::new(0, 0));
    assert!((stock.price - 145.0).abs() < 1e-9);
}

#[test]
fn midpoint_draw_leaves_price_unchanged() {
    let mut stock = Stock::new("AAPL", 150.0);
    stock.fluctuate_price(&mut StepRng::new(1 << 63, 0));
    assert!((stock.price - 150.0).abs() < 1e-12);
}

#[test]
fn highest_draw_moves_price_up_by_almost_max_step() {
    let mut stock = Stock::new("TSLA", 700.0);
    stock.fluctuate_price(&mut StepRng::new(u64::MAX, 0));
    assert!(stock.price > 704.999 && stock.price < 705.0);
}

#[test]
fn price_is_clamped_at_floor() {
    let mut stock = Stock::new("PENNY", 3.0);
    stock.fluctuate_price(&mut StepRng::new(0, 0));
    assert_eq!(stock.price, PRICE_FLOOR);

    stock.fluctuate_price(&mut StepRng::new(0, 0));
    assert_eq!(stock.price, PRICE_FLOOR);
}

#[test]
fn random_walk_never_drops_below_floor_and_steps_are_bounded() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut market = Market::new(vec![Stock::new("LOW", 2.0), Stock::new("AAPL", 150.0)])
        .expect("valid market");
    for _ in 0..10_000 {
        let before: Vec<f64> = market.iter().map(|s| s.price).collect();
        market.fluctuate_all(&mut rng);
        for (prev, stock) in before.iter().zip(market.iter()) {
            assert!(stock.price >= PRICE_FLOOR);
            if stock.price > PRICE_FLOOR {
                assert!((stock.price - prev).abs() <= MAX_PRICE_STEP + 1e-9);
            }
        }
    }
}

#[test]
fn same_seed_replays_same_prices() {
    let mut a = Market::new(initialize_stocks()).expect("valid market");
    let mut b = a.clone();
    let mut rng_a = StdRng::seed_from_u64(42);
    let mut rng_b = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        a.fluctuate_all(&mut rng_a);
        b.fluctuate_all(&mut rng_b);
    }
    assert_eq!(a, b);
}

#[test]
fn default_market_matches_listing() {
    let market = Market::new(initialize_stocks()).expect("valid market");
    let symbols: Vec<&str> = market.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["AAPL", "GOOG", "TSLA"]);
    assert_eq!(market.price("GOOG"), Some(2800.0));
    assert_eq!(market.price("MSFT"), None);
}

#[test]
fn market_normalizes_symbols() {
    let market = Market::new(vec![Stock::new(" aapl ", 150.0)]).expect("valid market");
    assert!(market.get("AAPL").is_some());
    assert_eq!(normalize_symbol("  goog"), "GOOG");
}

#[test]
fn market_rejects_bad_listings() {
    assert!(Market::new(vec![Stock::new("AAPL", 1.0), Stock::new("aapl", 2.0)]).is_err());
    assert!(Market::new(vec![Stock::new("", 1.0)]).is_err());
    assert!(Market::new(vec![Stock::new("AAPL", 0.0)]).is_err());
    assert!(Market::new(vec![Stock::new("AAPL", f64::NAN)]).is_err());
}
