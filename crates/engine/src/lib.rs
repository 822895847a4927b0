//! Spread calculation and the arbitrage query facade.

pub mod cache;
pub mod calculator;
pub mod service;

pub use cache::CachedService;
pub use calculator::{rank_opportunities, SpreadConfig};
pub use service::{ArbitrageService, PriceSource};
