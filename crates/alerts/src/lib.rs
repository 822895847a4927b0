//! User persistence and Telegram surface for the spread scanner.
//!
//! This crate provides:
//! - SQLite-backed user registration and premium-expiry gating
//! - Opportunity history recording
//! - The Telegram command adapter over the arbitrage query facade

pub mod db;
pub mod telegram;

pub use db::Database;
pub use telegram::{SpreadBot, TierSettings};
