//! Pure per-exchange ticker decoders.
//!
//! Each exchange returns a distinct JSON shape; every decoder is a pure
//! function from a parsed body to a normalized `PriceMap`. Dispatch is a
//! single match on [`ExchangeId`], so adding an exchange touches one spot.
//! Entries with missing fields or unparseable prices are skipped
//! individually rather than failing the whole body.

use crate::error::CollectError;
use serde_json::Value;
use spreadscan_core::{ExchangeId, PriceMap, Symbol};

/// Decode a bulk ticker response body for the given exchange.
pub fn decode_tickers(exchange: ExchangeId, body: &[u8]) -> Result<PriceMap, CollectError> {
    let json: Value = serde_json::from_slice(body)?;
    match exchange {
        ExchangeId::Binance | ExchangeId::Mexc => decode_flat_list(&json, "symbol", "price"),
        ExchangeId::Kucoin => decode_kucoin(&json),
        ExchangeId::GateIo => decode_flat_list(&json, "currency_pair", "last"),
        // Two-phase exchanges have no bulk ticker endpoint.
        ExchangeId::Bitstamp | ExchangeId::Coinbase => Err(CollectError::Decode(format!(
            "{} has no bulk ticker shape",
            exchange
        ))),
    }
}

/// Flat array shape: `[{"<symbol_field>": "...", "<price_field>": "..."}]`.
/// Covers Binance, MEXC (`symbol`/`price`) and Gate.io (`currency_pair`/`last`).
fn decode_flat_list(
    json: &Value,
    symbol_field: &str,
    price_field: &str,
) -> Result<PriceMap, CollectError> {
    let items = json
        .as_array()
        .ok_or_else(|| CollectError::Decode("expected a top-level array".to_string()))?;

    let mut prices = PriceMap::with_capacity(items.len());
    for item in items {
        let Some(raw_symbol) = item[symbol_field].as_str() else {
            continue;
        };
        let Some(price) = value_as_price(&item[price_field]) else {
            continue;
        };
        prices.insert(Symbol::normalize(raw_symbol), price);
    }
    Ok(prices)
}

/// KuCoin shape: `{"data": {"ticker": [{"symbol": "BTC-USDT", "last": "..."}]}}`.
fn decode_kucoin(json: &Value) -> Result<PriceMap, CollectError> {
    let items = json["data"]["ticker"]
        .as_array()
        .ok_or_else(|| CollectError::Decode("missing data.ticker array".to_string()))?;

    let mut prices = PriceMap::with_capacity(items.len());
    for item in items {
        let Some(raw_symbol) = item["symbol"].as_str() else {
            continue;
        };
        let Some(price) = value_as_price(&item["last"]) else {
            continue;
        };
        prices.insert(Symbol::normalize(raw_symbol), price);
    }
    Ok(prices)
}

/// Decode a two-phase exchange's product catalog into raw product ids.
pub fn decode_products(exchange: ExchangeId, body: &[u8]) -> Result<Vec<String>, CollectError> {
    let json: Value = serde_json::from_slice(body)?;
    let field = match exchange {
        // [{"url_symbol": "btcusd", ...}, ...]
        ExchangeId::Bitstamp => "url_symbol",
        // [{"id": "BTC-USD", ...}, ...]
        ExchangeId::Coinbase => "id",
        _ => {
            return Err(CollectError::Decode(format!(
                "{} is not a two-phase exchange",
                exchange
            )))
        }
    };

    let items = json
        .as_array()
        .ok_or_else(|| CollectError::Decode("expected a product array".to_string()))?;

    Ok(items
        .iter()
        .filter_map(|item| item[field].as_str().map(str::to_string))
        .collect())
}

/// Decode a two-phase exchange's single-product ticker into a last price.
pub fn decode_product_ticker(exchange: ExchangeId, body: &[u8]) -> Result<f64, CollectError> {
    let json: Value = serde_json::from_slice(body)?;
    let field = match exchange {
        // {"last": "60000.00", ...}
        ExchangeId::Bitstamp => "last",
        // {"price": "60000.00", ...}
        ExchangeId::Coinbase => "price",
        _ => {
            return Err(CollectError::Decode(format!(
                "{} is not a two-phase exchange",
                exchange
            )))
        }
    };

    value_as_price(&json[field])
        .ok_or_else(|| CollectError::Decode(format!("missing or invalid '{}' field", field)))
}

/// Prices arrive as JSON strings on most venues and as numbers on a few.
fn value_as_price(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}
