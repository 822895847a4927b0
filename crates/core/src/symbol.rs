//! Normalized trading-pair symbols.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized trading-pair key.
///
/// Exchanges quote the same pair as `BTCUSDT`, `BTC-USDT`, `btc_usdt` or
/// `BTC/USDT`. All of these must collapse to one key before per-exchange
/// price maps can be merged, so the only way to construct a `Symbol` is
/// through [`Symbol::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(CompactString);

impl Symbol {
    /// Normalize a raw exchange symbol: strip `-`, `_`, `/` and uppercase.
    pub fn normalize(raw: &str) -> Self {
        let mut out = CompactString::with_capacity(raw.len());
        for c in raw.chars() {
            match c {
                '-' | '_' | '/' => {}
                c => out.extend(c.to_uppercase()),
            }
        }
        Symbol(out)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_strips_separators() {
        assert_eq!(Symbol::normalize("BTC-USDT").as_str(), "BTCUSDT");
        assert_eq!(Symbol::normalize("BTC_USDT").as_str(), "BTCUSDT");
        assert_eq!(Symbol::normalize("BTC/USDT").as_str(), "BTCUSDT");
    }

    #[test]
    fn test_normalize_uppercases() {
        assert_eq!(Symbol::normalize("btc-usdt").as_str(), "BTCUSDT");
        assert_eq!(Symbol::normalize("ethUsd").as_str(), "ETHUSD");
    }

    #[test]
    fn test_normalize_equivalence_classes() {
        let a = Symbol::normalize("btc-usdt");
        let b = Symbol::normalize("BTC_USDT");
        let c = Symbol::normalize("BTCUSDT");
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_normalize_already_clean() {
        assert_eq!(Symbol::normalize("SOLUSDC").as_str(), "SOLUSDC");
    }

    #[test]
    fn test_empty() {
        assert!(Symbol::normalize("").is_empty());
        assert!(Symbol::normalize("-_/").is_empty());
    }
}
