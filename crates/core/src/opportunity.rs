//! Arbitrage opportunity type and construction rules.

use crate::{ExchangeId, Symbol};
use serde::{Deserialize, Serialize};

/// A buy-low/sell-high pair for one symbol across two venues.
///
/// Invariants, enforced by [`ArbitrageOpportunity::from_quotes`]:
/// `0 < buy_price <= sell_price`, and the symbol was quoted on at least
/// two exchanges. Held only while formatting a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageOpportunity {
    pub symbol: Symbol,
    pub buy_exchange: ExchangeId,
    pub buy_price: f64,
    pub sell_exchange: ExchangeId,
    pub sell_price: f64,
    /// (sell - buy) / buy * 100
    pub profit_percent: f64,
}

impl ArbitrageOpportunity {
    /// Build the best opportunity from all quotes for one symbol.
    ///
    /// Returns `None` when fewer than two exchanges quote the symbol or
    /// the minimum observed price is not strictly positive. When several
    /// exchanges share the extreme price, the smallest `ExchangeId`
    /// (lexicographic venue name) wins on both sides.
    pub fn from_quotes(symbol: &Symbol, quotes: &[(ExchangeId, f64)]) -> Option<Self> {
        if quotes.len() < 2 {
            return None;
        }

        let mut buy = quotes[0];
        let mut sell = quotes[0];
        for &(exchange, price) in &quotes[1..] {
            if price < buy.1 || (price == buy.1 && exchange < buy.0) {
                buy = (exchange, price);
            }
            if price > sell.1 || (price == sell.1 && exchange < sell.0) {
                sell = (exchange, price);
            }
        }

        // Division-by-zero guard; also rejects junk negative quotes.
        if buy.1 <= 0.0 {
            return None;
        }

        let profit_percent = (sell.1 - buy.1) / buy.1 * 100.0;
        Some(Self {
            symbol: symbol.clone(),
            buy_exchange: buy.0,
            buy_price: buy.1,
            sell_exchange: sell.0,
            sell_price: sell.1,
            profit_percent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sym(s: &str) -> Symbol {
        Symbol::normalize(s)
    }

    #[test]
    fn test_from_quotes_basic() {
        let quotes = vec![
            (ExchangeId::Binance, 60000.0),
            (ExchangeId::Kucoin, 60300.0),
        ];
        let opp = ArbitrageOpportunity::from_quotes(&sym("BTCUSDT"), &quotes).unwrap();

        assert_eq!(opp.buy_exchange, ExchangeId::Binance);
        assert_eq!(opp.buy_price, 60000.0);
        assert_eq!(opp.sell_exchange, ExchangeId::Kucoin);
        assert_eq!(opp.sell_price, 60300.0);
        assert_eq!(opp.profit_percent, (60300.0 - 60000.0) / 60000.0 * 100.0);
        assert!((opp.profit_percent - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_from_quotes_single_exchange() {
        let quotes = vec![(ExchangeId::Binance, 60000.0)];
        assert_eq!(ArbitrageOpportunity::from_quotes(&sym("BTCUSDT"), &quotes), None);
    }

    #[test]
    fn test_from_quotes_zero_min_excluded() {
        let quotes = vec![(ExchangeId::Binance, 0.0), (ExchangeId::Kucoin, 1.0)];
        assert_eq!(ArbitrageOpportunity::from_quotes(&sym("XUSDT"), &quotes), None);
    }

    #[test]
    fn test_from_quotes_negative_min_excluded() {
        let quotes = vec![(ExchangeId::Binance, -1.0), (ExchangeId::Kucoin, 1.0)];
        assert_eq!(ArbitrageOpportunity::from_quotes(&sym("XUSDT"), &quotes), None);
    }

    #[test]
    fn test_buy_never_above_sell() {
        let quotes = vec![
            (ExchangeId::Mexc, 101.0),
            (ExchangeId::GateIo, 99.5),
            (ExchangeId::Coinbase, 100.0),
        ];
        let opp = ArbitrageOpportunity::from_quotes(&sym("ADAUSDT"), &quotes).unwrap();
        assert!(opp.buy_price <= opp.sell_price);
        assert_eq!(opp.buy_exchange, ExchangeId::GateIo);
        assert_eq!(opp.sell_exchange, ExchangeId::Mexc);
    }

    #[test]
    fn test_tie_break_is_lexicographic() {
        // Binance and Coinbase share the minimum; Binance sorts first.
        // GateIo and Mexc share the maximum; GateIo sorts first.
        let quotes = vec![
            (ExchangeId::Mexc, 110.0),
            (ExchangeId::Coinbase, 100.0),
            (ExchangeId::GateIo, 110.0),
            (ExchangeId::Binance, 100.0),
        ];
        let opp = ArbitrageOpportunity::from_quotes(&sym("DOTUSDT"), &quotes).unwrap();
        assert_eq!(opp.buy_exchange, ExchangeId::Binance);
        assert_eq!(opp.sell_exchange, ExchangeId::GateIo);
    }

    #[test]
    fn test_flat_prices_yield_zero_profit() {
        let quotes = vec![
            (ExchangeId::Binance, 42.0),
            (ExchangeId::Kucoin, 42.0),
        ];
        let opp = ArbitrageOpportunity::from_quotes(&sym("LTCUSDT"), &quotes).unwrap();
        assert_eq!(opp.profit_percent, 0.0);
        assert_eq!(opp.buy_exchange, ExchangeId::Binance);
        assert_eq!(opp.sell_exchange, ExchangeId::Binance);
    }
}
