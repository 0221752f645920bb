//! Deterministic synthetic order flow.
//!
//! Seeded stream of limit orders for replay invariant tests and benchmarks.
//! Same config ⇒ same stream.

use crate::types::{Order, OrderId, Side};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

/// Flow configuration. All ranges are inclusive.
#[derive(Clone, Debug)]
pub struct FlowConfig {
    /// RNG seed. Same seed ⇒ same order stream.
    pub seed: u64,
    pub num_orders: usize,
    /// Probability of Buy (0.0..=1.0); Sell otherwise.
    pub buy_ratio: f64,
    /// Price range, whole ticks.
    pub price_min: i64,
    pub price_max: i64,
    /// Quantity range, whole units.
    pub quantity_min: u64,
    pub quantity_max: u64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            num_orders: 1000,
            buy_ratio: 0.5,
            price_min: 95,
            price_max: 105,
            quantity_min: 1,
            quantity_max: 100,
        }
    }
}

/// Deterministic order stream. Create with [`Flow::new`]; iterate or collect
/// with [`Flow::orders`].
pub struct Flow {
    rng: StdRng,
    config: FlowConfig,
    emitted: usize,
}

impl Flow {
    pub fn new(config: FlowConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
            emitted: 0,
        }
    }

    /// Collects the configured number of orders.
    pub fn orders(self) -> Vec<Order> {
        self.collect()
    }
}

impl Iterator for Flow {
    type Item = Order;

    fn next(&mut self) -> Option<Order> {
        if self.emitted >= self.config.num_orders {
            return None;
        }
        self.emitted += 1;
        let side = if self.rng.gen_bool(self.config.buy_ratio) {
            Side::Buy
        } else {
            Side::Sell
        };
        let price = self
            .rng
            .gen_range(self.config.price_min..=self.config.price_max);
        let quantity = self
            .rng
            .gen_range(self.config.quantity_min..=self.config.quantity_max);
        Some(Order {
            id: OrderId(format!("flow-{}", self.emitted)),
            side,
            price: Decimal::from(price),
            quantity: Decimal::from(quantity),
            timestamp: self.emitted as u64,
        })
    }
}
