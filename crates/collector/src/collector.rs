//! Best-effort concurrent price collection.

use crate::decode;
use crate::endpoint::{EndpointKind, ExchangeEndpoint};
use crate::error::CollectError;
use futures_util::future::join_all;
use reqwest::Client;
use spreadscan_core::{ExchangeId, PriceMap, Symbol};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Default per-request timeout; a timed-out venue is an ordinary
/// per-exchange failure for the cycle.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches tickers from every configured exchange in one concurrent batch.
///
/// Each exchange gets a single best-effort attempt per cycle: no retry,
/// no circuit breaking. A venue that fails transport, status, or decode
/// contributes an empty map and a log line, nothing more.
pub struct Collector {
    http: Client,
    endpoints: Vec<ExchangeEndpoint>,
}

impl Collector {
    /// Build a collector over the given endpoints with the default timeout.
    pub fn new(endpoints: Vec<ExchangeEndpoint>) -> Result<Self, CollectError> {
        Self::with_timeout(endpoints, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        endpoints: Vec<ExchangeEndpoint>,
        timeout: Duration,
    ) -> Result<Self, CollectError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CollectError::Transport(e.to_string()))?;
        Ok(Self { http, endpoints })
    }

    pub fn exchanges(&self) -> impl Iterator<Item = ExchangeId> + '_ {
        self.endpoints.iter().map(|e| e.exchange)
    }

    /// Run one collection cycle across all configured exchanges.
    ///
    /// When `filter` is set, each map is restricted to that normalized
    /// symbol (and two-phase exchanges only fan out to matching products).
    pub async fn collect_all(&self, filter: Option<&Symbol>) -> HashMap<ExchangeId, PriceMap> {
        let fetches = self
            .endpoints
            .iter()
            .map(|endpoint| async move {
                let prices = self.collect_exchange(endpoint, filter).await;
                (endpoint.exchange, prices)
            });

        join_all(fetches).await.into_iter().collect()
    }

    /// Fetch one exchange, isolating any failure into an empty map.
    async fn collect_exchange(
        &self,
        endpoint: &ExchangeEndpoint,
        filter: Option<&Symbol>,
    ) -> PriceMap {
        let result = match &endpoint.kind {
            EndpointKind::Bulk { url } => self.collect_bulk(endpoint.exchange, url, filter).await,
            EndpointKind::TwoPhase {
                products_url,
                ticker_url,
            } => {
                self.collect_two_phase(endpoint.exchange, products_url, ticker_url, filter)
                    .await
            }
        };

        match result {
            Ok(prices) => {
                debug!("{}: decoded {} tickers", endpoint.exchange, prices.len());
                prices
            }
            Err(e) => {
                warn!("{}: skipping this cycle: {}", endpoint.exchange, e);
                PriceMap::new()
            }
        }
    }

    async fn collect_bulk(
        &self,
        exchange: ExchangeId,
        url: &str,
        filter: Option<&Symbol>,
    ) -> Result<PriceMap, CollectError> {
        let body = self.get_bytes(url).await?;
        let mut prices = decode::decode_tickers(exchange, &body)?;
        if let Some(symbol) = filter {
            prices.retain(|s, _| s == symbol);
        }
        Ok(prices)
    }

    /// Product catalog first, then one ticker request per product.
    /// Per-product failures are dropped individually, not the whole venue.
    async fn collect_two_phase(
        &self,
        exchange: ExchangeId,
        products_url: &str,
        ticker_url: &str,
        filter: Option<&Symbol>,
    ) -> Result<PriceMap, CollectError> {
        let body = self.get_bytes(products_url).await?;
        let mut products = decode::decode_products(exchange, &body)?;

        if let Some(symbol) = filter {
            products.retain(|p| &Symbol::normalize(p) == symbol);
        }

        let fetches = products.iter().map(|product| async move {
            let url = ticker_url.replace("{product}", product);
            match self.fetch_product_price(exchange, &url).await {
                Ok(price) => Some((Symbol::normalize(product), price)),
                Err(e) => {
                    debug!("{}: dropping product {}: {}", exchange, product, e);
                    None
                }
            }
        });

        Ok(join_all(fetches).await.into_iter().flatten().collect())
    }

    async fn fetch_product_price(
        &self,
        exchange: ExchangeId,
        url: &str,
    ) -> Result<f64, CollectError> {
        let body = self.get_bytes(url).await?;
        decode::decode_product_ticker(exchange, &body)
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, CollectError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CollectError::Status(status.as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::default_endpoints;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collector_over_default_endpoints() {
        let collector = Collector::new(default_endpoints()).unwrap();
        let exchanges: Vec<_> = collector.exchanges().collect();
        assert_eq!(exchanges.len(), ExchangeId::all().len());
    }

    #[tokio::test]
    async fn test_unreachable_exchange_contributes_empty_map() {
        // A refused connection must surface as an empty map, not an error.
        let endpoints = vec![ExchangeEndpoint::bulk(
            ExchangeId::Binance,
            "http://127.0.0.1:9/tickers",
        )];
        let collector =
            Collector::with_timeout(endpoints, Duration::from_millis(500)).unwrap();

        let cycle = collector.collect_all(None).await;
        assert_eq!(cycle.len(), 1);
        assert!(cycle[&ExchangeId::Binance].is_empty());
    }

    #[tokio::test]
    async fn test_one_failure_does_not_abort_others() {
        let endpoints = vec![
            ExchangeEndpoint::bulk(ExchangeId::Binance, "http://127.0.0.1:9/a"),
            ExchangeEndpoint::bulk(ExchangeId::Mexc, "http://127.0.0.1:9/b"),
        ];
        let collector =
            Collector::with_timeout(endpoints, Duration::from_millis(500)).unwrap();

        let cycle = collector.collect_all(None).await;
        // Both slots are present even though both fetches failed.
        assert_eq!(cycle.len(), 2);
    }
}
