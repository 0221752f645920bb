//! # Orderflux
//!
//! Single-pair limit order book: price-time priority matching, an append-only
//! trade ledger, snapshot initialization, and a REST API around them.
//!
//! ## Entry point
//!
//! Use [`Engine`] as the single entry point: create with [`Engine::new`], then
//! [`Engine::submit_order`] to match orders and [`Engine::load_snapshot`] to
//! replace the book. Queries: [`Engine::depth`], [`Engine::recent_trades`],
//! [`Engine::trade`].
//!
//! ## Example
//!
//! ```rust
//! use orderflux::{Engine, Order, Side};
//! use rust_decimal::Decimal;
//!
//! let mut engine = Engine::new();
//! engine.submit_order(Order::new(Side::Sell, Decimal::from(100), Decimal::from(10)));
//! let buy_id = engine.submit_order(Order::new(Side::Buy, Decimal::from(100), Decimal::from(4)));
//! assert_eq!(engine.trade_count(), 1);
//! assert!(engine.resting_quantity(&buy_id).is_none());
//! assert_eq!(engine.best_ask(), Some(Decimal::from(100)));
//! ```
//!
//! ## Lower-level API
//!
//! [`OrderBook`] and [`match_order`] can be used directly if you manage trade
//! ids and the ledger yourself.

pub mod api;
pub mod auth;
pub mod book;
pub mod engine;
pub mod flow;
pub mod ledger;
pub mod matching;
pub mod snapshot;
pub mod types;

pub use auth::{AuthConfig, AuthUser, Role};
pub use book::{Depth, DepthLevel, Fill, OrderBook, RestingOrder};
pub use engine::Engine;
pub use flow::{Flow, FlowConfig};
pub use ledger::{Trade, TradeLedger, DEFAULT_TRADE_LIMIT};
pub use matching::match_order;
pub use snapshot::{Snapshot, SnapshotLevel, SnapshotOrder};
pub use types::{Order, OrderId, Side, TradeId};
