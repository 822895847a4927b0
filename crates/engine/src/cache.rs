//! Time-boxed memoization over the full-universe query.
//!
//! Query cycles are stateless, so many chat users asking within a few
//! seconds would redundantly hit the same public APIs. This decorator
//! caches the full ranked sequence (computed with a zero threshold) for a
//! short TTL and answers repeat calls by filtering the cached list. It is
//! layered at the boundary; the calculator itself stays cache-free.

use crate::service::{ArbitrageService, PriceSource};
use spreadscan_core::ArbitrageOpportunity;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

pub struct CachedService<S> {
    inner: ArbitrageService<S>,
    ttl: Duration,
    slot: Mutex<Option<(Instant, Vec<ArbitrageOpportunity>)>>,
}

impl<S: PriceSource> CachedService<S> {
    pub fn new(inner: ArbitrageService<S>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Same contract as [`ArbitrageService::get_arbitrage`].
    ///
    /// Filtered queries bypass the cache: they are cheap on the collector
    /// side (two-phase venues restrict their product fan-out) and caching
    /// per filter key is not worth the bookkeeping.
    pub async fn get_arbitrage(
        &self,
        symbol_filter: Option<&str>,
        top_n: Option<usize>,
        min_profit_percent: Option<f64>,
    ) -> Vec<ArbitrageOpportunity> {
        if symbol_filter.is_some() {
            return self
                .inner
                .get_arbitrage(symbol_filter, top_n, min_profit_percent)
                .await;
        }

        let threshold =
            min_profit_percent.unwrap_or(self.inner.config().min_profit_percent);

        let mut slot = self.slot.lock().await;
        let fresh = match slot.as_ref() {
            Some((at, _)) if at.elapsed() < self.ttl => true,
            _ => false,
        };

        if !fresh {
            // Rank with a zero threshold so one cached sequence can serve
            // any requested threshold (the profit filter is monotone).
            let full = self.inner.get_arbitrage(None, None, Some(0.0)).await;
            debug!("cache refresh: {} ranked opportunities", full.len());
            *slot = Some((Instant::now(), full));
        }

        let (_, cached) = slot.as_ref().expect("slot populated above");
        let mut result: Vec<ArbitrageOpportunity> = cached
            .iter()
            .filter(|opp| opp.profit_percent >= threshold)
            .cloned()
            .collect();
        if let Some(n) = top_n {
            result.truncate(n);
        }
        result
    }
}
