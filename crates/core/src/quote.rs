//! Per-exchange price maps and the merged symbol book.

use crate::{ExchangeId, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single observed price, produced by one fetch and consumed by the merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeQuote {
    pub exchange: ExchangeId,
    pub symbol: Symbol,
    pub price: f64,
}

/// One exchange's decoded tickers: normalized symbol -> last price.
pub type PriceMap = HashMap<Symbol, f64>;

/// All observed quotes for a query cycle, keyed by normalized symbol.
///
/// Built fresh for every query and discarded after ranking; nothing here
/// outlives a single request/response cycle.
#[derive(Debug, Default, Clone)]
pub struct SymbolBook {
    entries: HashMap<Symbol, Vec<(ExchangeId, f64)>>,
}

impl SymbolBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a single observed quote.
    pub fn insert(&mut self, quote: ExchangeQuote) {
        self.entries
            .entry(quote.symbol)
            .or_default()
            .push((quote.exchange, quote.price));
    }

    /// Merge one exchange's price map into the book.
    pub fn extend_from(&mut self, exchange: ExchangeId, prices: PriceMap) {
        for (symbol, price) in prices {
            self.insert(ExchangeQuote {
                exchange,
                symbol,
                price,
            });
        }
    }

    /// Build a book from a full collection cycle.
    pub fn from_cycle(cycle: HashMap<ExchangeId, PriceMap>) -> Self {
        let mut book = Self::new();
        for (exchange, prices) in cycle {
            book.extend_from(exchange, prices);
        }
        book
    }

    pub fn quotes(&self, symbol: &Symbol) -> Option<&[(ExchangeId, f64)]> {
        self.entries.get(symbol).map(|v| v.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &[(ExchangeId, f64)])> {
        self.entries.iter().map(|(s, q)| (s, q.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
