//! Telegram bot handlers.
//!
//! A thin adapter: each command is translated into one `get_arbitrage`
//! call and its result formatted for the chat, with the row limit picked
//! by the user's tier.

use crate::db::Database;
use serde::{Deserialize, Serialize};
use spreadscan_core::ArbitrageOpportunity;
use spreadscan_engine::{CachedService, PriceSource};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::command::BotCommands;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum TelegramError {
    #[error("Telegram API error: {0}")]
    Api(#[from] teloxide::RequestError),
    #[error("Database error: {0}")]
    Db(#[from] crate::db::DbError),
}

/// How many ranked rows each tier is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSettings {
    pub free_top_n: usize,
    pub premium_top_n: usize,
}

impl Default for TierSettings {
    fn default() -> Self {
        Self {
            free_top_n: 3,
            premium_top_n: 10,
        }
    }
}

impl TierSettings {
    fn top_n(&self, premium: bool) -> usize {
        if premium {
            self.premium_top_n
        } else {
            self.free_top_n
        }
    }
}

/// Bot commands.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot and register")]
    Start,
    #[command(description = "Check spreads for one symbol. Usage: /arbitrage BTCUSDT")]
    Arbitrage(String),
    #[command(description = "Show the top spreads across all symbols")]
    Top,
    #[command(description = "Show premium subscription status")]
    Premium,
    #[command(description = "Show help")]
    Help,
}

/// Telegram bot wrapper.
pub struct SpreadBot<S> {
    bot: Bot,
    db: Database,
    service: Arc<CachedService<S>>,
    tiers: TierSettings,
}

impl<S: PriceSource + 'static> SpreadBot<S> {
    /// Create a new bot with the given token.
    pub fn new(
        token: &str,
        db: Database,
        service: Arc<CachedService<S>>,
        tiers: TierSettings,
    ) -> Self {
        let bot = Bot::new(token);
        Self {
            bot,
            db,
            service,
            tiers,
        }
    }

    /// Run the bot command handler.
    pub async fn run(self: Arc<Self>) {
        let bot = self.bot.clone();
        let handler = Update::filter_message().filter_command::<Command>().endpoint(
            move |bot: Bot, msg: Message, cmd: Command| {
                let this = Arc::clone(&self);
                async move { this.handle_command(bot, msg, cmd).await }
            },
        );

        Dispatcher::builder(bot, handler)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }

    async fn handle_command(
        &self,
        bot: Bot,
        msg: Message,
        cmd: Command,
    ) -> Result<(), TelegramError> {
        // Commands from channels carry no user; nothing to gate on.
        let Some(user) = msg.from.clone() else {
            return Ok(());
        };
        let user_id = user.id.0 as i64;

        match cmd {
            Command::Start => {
                let username = user.username.clone().unwrap_or_default();
                self.db.upsert_user(user_id, &username).await?;
                let text = format!(
                    "Hello {}!\n\n\
                     This bot scans public exchange tickers for cross-venue\n\
                     price spreads.\n\n\
                     /arbitrage <symbol> - check one symbol\n\
                     /top - best spreads right now\n\
                     /premium - subscription status\n\
                     /help - all commands",
                    user.first_name
                );
                bot.send_message(msg.chat.id, text).await?;
            }

            Command::Arbitrage(value) => {
                let symbol = value.trim();
                if symbol.is_empty() {
                    bot.send_message(
                        msg.chat.id,
                        "Usage: /arbitrage <symbol>\nExample: /arbitrage BTCUSDT",
                    )
                    .await?;
                    return Ok(());
                }

                let premium = self.db.is_premium(user_id).await?;
                let opps = self
                    .service
                    .get_arbitrage(Some(symbol), Some(self.tiers.top_n(premium)), None)
                    .await;
                self.record_history(&opps).await;

                bot.send_message(msg.chat.id, format_opportunities(&opps, premium))
                    .parse_mode(ParseMode::Html)
                    .await?;
            }

            Command::Top => {
                let premium = self.db.is_premium(user_id).await?;
                let opps = self
                    .service
                    .get_arbitrage(None, Some(self.tiers.top_n(premium)), None)
                    .await;
                self.record_history(&opps).await;

                bot.send_message(msg.chat.id, format_opportunities(&opps, premium))
                    .parse_mode(ParseMode::Html)
                    .await?;
            }

            Command::Premium => {
                let text = match self.db.get_user(user_id).await? {
                    Some(user) if self.db.is_premium(user_id).await? => format!(
                        "You have premium access until {}.",
                        user.premium_until.as_deref().unwrap_or("unknown")
                    ),
                    _ => format!(
                        "<b>Premium</b>\n\n\
                         Free tier shows the top {} spreads per query,\n\
                         premium shows the top {}.\n\n\
                         Contact @spreadscan_support to subscribe.",
                        self.tiers.free_top_n, self.tiers.premium_top_n
                    ),
                };
                bot.send_message(msg.chat.id, text)
                    .parse_mode(ParseMode::Html)
                    .await?;
            }

            Command::Help => {
                bot.send_message(msg.chat.id, Command::descriptions().to_string())
                    .await?;
            }
        }

        Ok(())
    }

    /// Best-effort history recording; never blocks the reply.
    async fn record_history(&self, opps: &[ArbitrageOpportunity]) {
        for opp in opps {
            if let Err(e) = self.db.record_opportunity(opp).await {
                debug!("failed to record opportunity {}: {}", opp.symbol, e);
            }
        }
    }
}

/// Format price with appropriate precision based on magnitude.
fn format_price(price: f64) -> String {
    if price == 0.0 {
        return "$0".to_string();
    }
    let abs_price = price.abs();
    if abs_price >= 1000.0 {
        format!("${:.2}", price)
    } else if abs_price >= 1.0 {
        format!("${:.4}", price)
    } else if abs_price >= 0.01 {
        format!("${:.6}", price)
    } else {
        format!("${:.8}", price)
    }
}

/// Format a ranked (already truncated) opportunity list as a chat message.
pub fn format_opportunities(opps: &[ArbitrageOpportunity], premium: bool) -> String {
    if opps.is_empty() {
        return "No arbitrage opportunities right now.".to_string();
    }

    let mut msg = if premium {
        "<b>Premium spread report</b>\n\n".to_string()
    } else {
        "<b>Top spreads</b>\n\n".to_string()
    };

    for opp in opps {
        msg.push_str(&format!(
            "<b>{}</b>\n\
             Buy: {} @ {}\n\
             Sell: {} @ {}\n\
             Profit: {:.2}%\n\n",
            opp.symbol,
            opp.buy_exchange,
            format_price(opp.buy_price),
            opp.sell_exchange,
            format_price(opp.sell_price),
            opp.profit_percent
        ));
    }

    if !premium {
        msg.push_str("Upgrade with /premium for more results.");
    }

    msg
}
