use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::debug;

use crate::app::AppState;

/// Fixed-interval timer driven by the caller's clock. The UI event loop
/// polls it once per frame instead of running a background thread.
#[derive(Debug, Clone)]
pub struct PriceTicker {
    interval: Duration,
    next_due: Instant,
}

impl PriceTicker {
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            next_due: start + interval,
        }
    }

    /// Returns true when a tick is due and schedules the next one from `now`.
    /// Missed ticks are not replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = now + self.interval;
        true
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}

pub struct PriceFeed<R: RngCore> {
    ticker: PriceTicker,
    rng: R,
    ticks: u64,
}

impl<R: RngCore> PriceFeed<R> {
    pub fn new(ticker: PriceTicker, rng: R) -> Self {
        Self {
            ticker,
            rng,
            ticks: 0,
        }
    }

    /// Ticks `state` if the ticker is due.
    pub fn advance(&mut self, now: Instant, state: &mut AppState) -> bool {
        if !self.ticker.poll(now) {
            return false;
        }
        state.tick(&mut self.rng);
        self.ticks += 1;
        debug!(tick = self.ticks, "market prices updated");
        true
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.ticker.remaining(now)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl PriceFeed<StdRng> {
    /// Seeded feeds replay the same price path on every run.
    pub fn from_seed(ticker: PriceTicker, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(ticker, rng)
    }
}
