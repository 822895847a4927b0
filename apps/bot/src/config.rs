//! Application configuration.

use serde::{Deserialize, Serialize};
use spreadscan_alerts::TierSettings;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database URL.
    pub database_url: String,
    /// Minimum profit percent for reported opportunities.
    pub min_profit_percent: f64,
    /// Per-request timeout for exchange fetches, in seconds.
    pub request_timeout_secs: u64,
    /// Full-universe query cache TTL, in milliseconds.
    pub cache_ttl_ms: u64,
    /// Result row limits per tier.
    pub tiers: TierSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://spreadscan.db".to_string(),
            min_profit_percent: 0.5,
            request_timeout_secs: 10,
            cache_ttl_ms: 5000,
            tiers: TierSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.min_profit_percent, 0.5);
        assert_eq!(config.tiers.free_top_n, 3);
        assert_eq!(config.tiers.premium_top_n, 10);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.min_profit_percent, config.min_profit_percent);
        assert_eq!(parsed.database_url, config.database_url);
    }
}
