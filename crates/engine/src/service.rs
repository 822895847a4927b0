//! The arbitrage query facade.

use crate::calculator::{rank_opportunities, SpreadConfig};
use async_trait::async_trait;
use spreadscan_core::{ArbitrageOpportunity, ExchangeId, PriceMap, Symbol, SymbolBook};
use spreadscan_collector::Collector;
use std::collections::HashMap;
use tracing::debug;

/// Anything that can produce one cycle of per-exchange price maps.
///
/// The collector is the production implementation; tests inject canned
/// cycles through this seam.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn collect(&self, filter: Option<&Symbol>) -> HashMap<ExchangeId, PriceMap>;
}

#[async_trait]
impl PriceSource for Collector {
    async fn collect(&self, filter: Option<&Symbol>) -> HashMap<ExchangeId, PriceMap> {
        self.collect_all(filter).await
    }
}

/// The single inbound operation surrounding layers call:
/// collect, merge, rank, truncate.
pub struct ArbitrageService<S> {
    source: S,
    config: SpreadConfig,
}

impl<S: PriceSource> ArbitrageService<S> {
    pub fn new(source: S, config: SpreadConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &SpreadConfig {
        &self.config
    }

    /// Run one stateless query cycle.
    ///
    /// `symbol_filter` is normalized before use; `min_profit_percent`
    /// overrides the configured threshold for this call; `top_n` truncates
    /// the ranked sequence at this presentation boundary (the calculator
    /// itself always ranks the full set). An empty vector is the ordinary
    /// no-opportunities result, never an error.
    pub async fn get_arbitrage(
        &self,
        symbol_filter: Option<&str>,
        top_n: Option<usize>,
        min_profit_percent: Option<f64>,
    ) -> Vec<ArbitrageOpportunity> {
        let filter = symbol_filter.map(Symbol::normalize);
        let cycle = self.source.collect(filter.as_ref()).await;
        let book = SymbolBook::from_cycle(cycle);
        debug!("cycle produced {} distinct symbols", book.len());

        let config = match min_profit_percent {
            Some(min_profit_percent) => SpreadConfig { min_profit_percent },
            None => self.config.clone(),
        };

        let mut opportunities = rank_opportunities(&book, &config);
        if let Some(n) = top_n {
            opportunities.truncate(n);
        }
        opportunities
    }
}
