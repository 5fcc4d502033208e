//! Telegram command handling and the long-poll runtime.

use std::sync::Arc;

use anyhow::{Context, Result};
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{debug, info};

use crate::catalog::CatalogStore;
use crate::search::{self, SearchLimits};

/// Reply to `/help`.
pub const HELP_TEXT: &str = "Use the /paper command with a substring from a proposal title. \
Search works only for paper names, titles and authors. \
Search works as finding a substring in a string. \
Fuzzy search isn't supported yet.";

/// Commands understood by the bot.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// The single-String variant receives everything after the command
    /// token; a bare `/paper` yields the empty query, which matches all
    /// valid papers.
    #[command(description = "search papers by substring of name, title or author")]
    Paper(String),
    #[command(description = "show usage help")]
    Help,
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    store: Arc<CatalogStore>,
    limits: SearchLimits,
) -> ResponseResult<()> {
    match cmd {
        Command::Paper(query) => {
            info!(query = %query, "paper command requested");
            let snapshot = store.read();
            let reply = search::search(&query, &snapshot, &limits);
            info!(
                outcome = ?reply.outcome,
                chunks = reply.chunks.len(),
                "paper command served"
            );
            for chunk in reply.chunks {
                bot.send_message(msg.chat.id, chunk).await?;
            }
        }
        Command::Help => {
            info!("help command requested");
            bot.send_message(msg.chat.id, HELP_TEXT).await?;
        }
    }
    Ok(())
}

/// Authenticates, then dispatches incoming commands until termination.
///
/// Handlers run to completion before the next update is processed.
/// Transport errors during polling are logged by the listener and polling
/// resumes immediately; only the startup identity lookup can fail here.
pub async fn run(bot: Bot, store: Arc<CatalogStore>, limits: SearchLimits) -> Result<()> {
    let me = bot
        .get_me()
        .await
        .context("failed to authenticate with the Telegram API")?;
    info!(username = me.username(), "bot authenticated, starting long poll");

    let handler = Update::filter_message()
        .filter_command::<Command>()
        .endpoint(handle_command);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![store, limits])
        .default_handler(|update| async move {
            debug!(update_id = ?update.id, "ignoring non-command update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text("update dispatch failed"))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
