//! Exchange identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a configured exchange venue.
///
/// `Ord` is derived from the declaration order, which matches the
/// lexicographic order of the display names. Ranking code relies on this
/// for deterministic tie-breaking when two venues quote the same price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ExchangeId {
    Binance = 0,
    Bitstamp = 1,
    Coinbase = 2,
    GateIo = 3,
    Kucoin = 4,
    Mexc = 5,
}

impl ExchangeId {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(ExchangeId::Binance),
            1 => Some(ExchangeId::Bitstamp),
            2 => Some(ExchangeId::Coinbase),
            3 => Some(ExchangeId::GateIo),
            4 => Some(ExchangeId::Kucoin),
            5 => Some(ExchangeId::Mexc),
            _ => None,
        }
    }

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExchangeId::Binance => "Binance",
            ExchangeId::Bitstamp => "Bitstamp",
            ExchangeId::Coinbase => "Coinbase",
            ExchangeId::GateIo => "Gate.io",
            ExchangeId::Kucoin => "KuCoin",
            ExchangeId::Mexc => "MEXC",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|e| e.as_str().eq_ignore_ascii_case(name))
    }

    pub fn all() -> &'static [ExchangeId] {
        &[
            ExchangeId::Binance,
            ExchangeId::Bitstamp,
            ExchangeId::Coinbase,
            ExchangeId::GateIo,
            ExchangeId::Kucoin,
            ExchangeId::Mexc,
        ]
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exchange_from_id() {
        assert_eq!(ExchangeId::from_id(0), Some(ExchangeId::Binance));
        assert_eq!(ExchangeId::from_id(5), Some(ExchangeId::Mexc));
        assert_eq!(ExchangeId::from_id(255), None);
    }

    #[test]
    fn test_exchange_as_str() {
        assert_eq!(ExchangeId::Binance.as_str(), "Binance");
        assert_eq!(ExchangeId::GateIo.as_str(), "Gate.io");
        assert_eq!(ExchangeId::Mexc.as_str(), "MEXC");
    }

    #[test]
    fn test_exchange_from_name() {
        assert_eq!(ExchangeId::from_name("binance"), Some(ExchangeId::Binance));
        assert_eq!(ExchangeId::from_name("Gate.io"), Some(ExchangeId::GateIo));
        assert_eq!(ExchangeId::from_name("nope"), None);
    }

    #[test]
    fn test_exchange_order_matches_names() {
        // Tie-breaking in the ranker compares ExchangeId directly, so the
        // enum order must agree with the display-name order.
        let names: Vec<&str> = ExchangeId::all().iter().map(|e| e.as_str()).collect();
        let sorted = {
            let mut s = names.clone();
            s.sort();
            s
        };
        assert_eq!(names, sorted);
    }
}
