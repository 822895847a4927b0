//! Spread calculation over a merged symbol book.

use spreadscan_core::{ArbitrageOpportunity, SymbolBook};

/// Configuration for the spread calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadConfig {
    /// Minimum profit percent for an opportunity to be reported.
    /// The comparison is inclusive: a spread of exactly this value passes.
    pub min_profit_percent: f64,
}

impl Default for SpreadConfig {
    fn default() -> Self {
        Self {
            min_profit_percent: 0.5,
        }
    }
}

/// Compute all opportunities in the book, ranked by profit descending.
///
/// Eligibility rules live in `ArbitrageOpportunity::from_quotes`: a symbol
/// needs quotes from at least two exchanges and a strictly positive
/// minimum price. The full ranked sequence is returned; truncation is the
/// caller's presentation concern.
pub fn rank_opportunities(book: &SymbolBook, config: &SpreadConfig) -> Vec<ArbitrageOpportunity> {
    let mut opportunities: Vec<ArbitrageOpportunity> = book
        .iter()
        .filter_map(|(symbol, quotes)| ArbitrageOpportunity::from_quotes(symbol, quotes))
        .filter(|opp| opp.profit_percent >= config.min_profit_percent)
        .collect();

    opportunities.sort_by(|a, b| {
        b.profit_percent
            .partial_cmp(&a.profit_percent)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });

    opportunities
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use spreadscan_core::{ExchangeId, PriceMap, Symbol, SymbolBook};

    fn book(entries: &[(&str, &[(ExchangeId, f64)])]) -> SymbolBook {
        let mut book = SymbolBook::new();
        for (exchange, raw_symbol, price) in entries
            .iter()
            .flat_map(|(s, qs)| qs.iter().map(move |&(e, p)| (e, *s, p)))
        {
            let mut prices = PriceMap::new();
            prices.insert(Symbol::normalize(raw_symbol), price);
            book.extend_from(exchange, prices);
        }
        book
    }

    #[test]
    fn test_spec_example_half_percent_spread() {
        // Exchange A: BTCUSDT=60000, exchange B: BTC-USDT=60300, C silent.
        let book = book(&[
            ("BTCUSDT", &[(ExchangeId::Binance, 60000.0)]),
            ("BTC-USDT", &[(ExchangeId::Kucoin, 60300.0)]),
        ]);

        let opps = rank_opportunities(&book, &SpreadConfig::default());
        assert_eq!(opps.len(), 1);
        let opp = &opps[0];
        assert_eq!(opp.symbol.as_str(), "BTCUSDT");
        assert_eq!(opp.buy_exchange, ExchangeId::Binance);
        assert_eq!(opp.buy_price, 60000.0);
        assert_eq!(opp.sell_exchange, ExchangeId::Kucoin);
        assert_eq!(opp.sell_price, 60300.0);
        assert!((opp.profit_percent - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_single_exchange_symbols_never_appear() {
        let book = book(&[
            ("SOLUSDT", &[(ExchangeId::Binance, 150.0)]),
            ("ADAUSDT", &[(ExchangeId::Mexc, 0.45)]),
        ]);
        assert!(rank_opportunities(&book, &SpreadConfig::default()).is_empty());
    }

    #[test]
    fn test_non_positive_minimum_excluded() {
        let book = book(&[(
            "JUNKUSDT",
            &[(ExchangeId::Binance, 0.0), (ExchangeId::Kucoin, 10.0)],
        )]);
        let config = SpreadConfig {
            min_profit_percent: 0.0,
        };
        assert!(rank_opportunities(&book, &config).is_empty());
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let book = book(&[
            // Exactly 0.5% spread.
            (
                "BTCUSDT",
                &[(ExchangeId::Binance, 60000.0), (ExchangeId::Kucoin, 60300.0)],
            ),
            // 0.3% spread, below threshold.
            (
                "ETHUSDT",
                &[(ExchangeId::Binance, 3000.0), (ExchangeId::Kucoin, 3009.0)],
            ),
        ]);

        let opps = rank_opportunities(&book, &SpreadConfig::default());
        assert_eq!(opps.len(), 1);
        assert_eq!(opps[0].symbol.as_str(), "BTCUSDT");
    }

    #[test]
    fn test_sorted_descending_and_idempotent() {
        let book = book(&[
            (
                "AUSDT",
                &[(ExchangeId::Binance, 100.0), (ExchangeId::Kucoin, 101.0)],
            ),
            (
                "BUSDT",
                &[(ExchangeId::Binance, 100.0), (ExchangeId::Kucoin, 105.0)],
            ),
            (
                "CUSDT",
                &[(ExchangeId::Binance, 100.0), (ExchangeId::Kucoin, 103.0)],
            ),
        ]);

        let config = SpreadConfig {
            min_profit_percent: 0.0,
        };
        let opps = rank_opportunities(&book, &config);
        let profits: Vec<f64> = opps.iter().map(|o| o.profit_percent).collect();
        assert_eq!(profits, vec![5.0, 3.0, 1.0]);

        // Re-sorting the already sorted output changes nothing.
        let mut resorted = opps.clone();
        resorted.sort_by(|a, b| {
            b.profit_percent
                .partial_cmp(&a.profit_percent)
                .unwrap()
                .then_with(|| a.symbol.cmp(&b.symbol))
        });
        assert_eq!(opps, resorted);
    }

    #[test]
    fn test_equal_profits_ordered_by_symbol() {
        let book = book(&[
            (
                "ZZZUSDT",
                &[(ExchangeId::Binance, 100.0), (ExchangeId::Kucoin, 102.0)],
            ),
            (
                "AAAUSDT",
                &[(ExchangeId::Binance, 50.0), (ExchangeId::Kucoin, 51.0)],
            ),
        ]);

        let opps = rank_opportunities(&book, &SpreadConfig::default());
        assert_eq!(opps.len(), 2);
        assert_eq!(opps[0].symbol.as_str(), "AAAUSDT");
        assert_eq!(opps[1].symbol.as_str(), "ZZZUSDT");
    }
}
