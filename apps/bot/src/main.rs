//! Spreadscan - Telegram spread scanner
//!
//! Polls public exchange ticker endpoints, ranks cross-venue price
//! spreads, and serves them to Telegram users with tiered access.

mod config;

use clap::Parser;
use config::AppConfig;
use spreadscan_alerts::{Database, SpreadBot, TierSettings};
use spreadscan_collector::{default_endpoints, Collector};
use spreadscan_engine::{ArbitrageService, CachedService, SpreadConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Spreadscan CLI
#[derive(Parser, Debug)]
#[command(name = "spreadscan-bot")]
#[command(about = "Multi-exchange spread scanner with a Telegram surface", long_about = None)]
struct Args {
    /// SQLite database URL
    #[arg(short, long, default_value = "sqlite://spreadscan.db")]
    database_url: String,

    /// Minimum profit percent for reported opportunities
    #[arg(short = 'p', long, default_value_t = 0.5)]
    min_profit: f64,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value_t = 10)]
    timeout: u64,

    /// Full-universe cache TTL in milliseconds
    #[arg(long, default_value_t = 5000)]
    cache_ttl_ms: u64,

    /// Opportunities shown to free users
    #[arg(long, default_value_t = 3)]
    free_top: usize,

    /// Opportunities shown to premium users
    #[arg(long, default_value_t = 10)]
    premium_top: usize,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

impl From<&Args> for AppConfig {
    fn from(args: &Args) -> Self {
        Self {
            database_url: args.database_url.clone(),
            min_profit_percent: args.min_profit,
            request_timeout_secs: args.timeout,
            cache_ttl_ms: args.cache_ttl_ms,
            tiers: TierSettings {
                free_top_n: args.free_top,
                premium_top_n: args.premium_top,
            },
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_logging(&args.log_level);
    let config = AppConfig::from(&args);

    // The one fatal startup configuration error: no bot token.
    let token = match std::env::var("TELEGRAM_BOT_TOKEN") {
        Ok(token) if !token.is_empty() => token,
        _ => {
            error!("TELEGRAM_BOT_TOKEN is not set");
            std::process::exit(1);
        }
    };

    let collector = match Collector::with_timeout(
        default_endpoints(),
        Duration::from_secs(config.request_timeout_secs),
    ) {
        Ok(collector) => collector,
        Err(e) => {
            error!("failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let service = ArbitrageService::new(
        collector,
        SpreadConfig {
            min_profit_percent: config.min_profit_percent,
        },
    );
    let service = Arc::new(CachedService::new(
        service,
        Duration::from_millis(config.cache_ttl_ms),
    ));

    let db = match Database::connect(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            error!("failed to open database {}: {}", config.database_url, e);
            std::process::exit(1);
        }
    };

    info!(
        "starting bot (min profit {}%, timeout {}s)",
        config.min_profit_percent, config.request_timeout_secs
    );

    let bot = Arc::new(SpreadBot::new(&token, db, service, config.tiers));
    bot.run().await;
}
