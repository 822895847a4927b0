//! Exchange endpoint descriptors.
//!
//! The set of polled endpoints is an explicit configuration value handed
//! to the [`Collector`](crate::Collector), not a module-level registry.

use spreadscan_core::ExchangeId;

/// How an exchange exposes its tickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointKind {
    /// One GET returns every ticker.
    Bulk { url: String },
    /// Product catalog first, then one ticker request per product.
    /// `ticker_url` contains a `{product}` placeholder.
    TwoPhase {
        products_url: String,
        ticker_url: String,
    },
}

/// A configured exchange venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeEndpoint {
    pub exchange: ExchangeId,
    pub kind: EndpointKind,
}

impl ExchangeEndpoint {
    pub fn bulk(exchange: ExchangeId, url: impl Into<String>) -> Self {
        Self {
            exchange,
            kind: EndpointKind::Bulk { url: url.into() },
        }
    }

    pub fn two_phase(
        exchange: ExchangeId,
        products_url: impl Into<String>,
        ticker_url: impl Into<String>,
    ) -> Self {
        Self {
            exchange,
            kind: EndpointKind::TwoPhase {
                products_url: products_url.into(),
                ticker_url: ticker_url.into(),
            },
        }
    }
}

/// The standard public endpoints for all supported exchanges.
pub fn default_endpoints() -> Vec<ExchangeEndpoint> {
    vec![
        ExchangeEndpoint::bulk(
            ExchangeId::Binance,
            "https://api.binance.com/api/v3/ticker/price",
        ),
        ExchangeEndpoint::bulk(
            ExchangeId::Kucoin,
            "https://api.kucoin.com/api/v1/market/allTickers",
        ),
        ExchangeEndpoint::bulk(
            ExchangeId::GateIo,
            "https://api.gateio.ws/api/v4/spot/tickers",
        ),
        ExchangeEndpoint::bulk(
            ExchangeId::Mexc,
            "https://api.mexc.com/api/v3/ticker/price",
        ),
        ExchangeEndpoint::two_phase(
            ExchangeId::Bitstamp,
            "https://www.bitstamp.net/api/v2/trading-pairs-info/",
            "https://www.bitstamp.net/api/v2/ticker/{product}/",
        ),
        ExchangeEndpoint::two_phase(
            ExchangeId::Coinbase,
            "https://api.exchange.coinbase.com/products",
            "https://api.exchange.coinbase.com/products/{product}/ticker",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_endpoints_cover_all_exchanges() {
        let endpoints = default_endpoints();
        assert_eq!(endpoints.len(), ExchangeId::all().len());
        for exchange in ExchangeId::all() {
            assert!(endpoints.iter().any(|e| e.exchange == *exchange));
        }
    }

    #[test]
    fn test_two_phase_templates_have_placeholder() {
        for endpoint in default_endpoints() {
            if let EndpointKind::TwoPhase { ticker_url, .. } = &endpoint.kind {
                assert!(ticker_url.contains("{product}"), "{}", endpoint.exchange);
            }
        }
    }
}
