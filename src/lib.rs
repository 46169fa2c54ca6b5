pub mod cli;
pub mod config;
pub mod data;
pub mod features;
pub mod handlers;
pub mod utils;
pub mod views;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncWriteExt, BufReader};

use crate::cli::{Args, Command};
use crate::config::AppConfig;
use crate::handlers::{AppContext, Output, interactive, lookup, saved};

pub async fn run(args: Args) -> Result<()> {
    log::debug!("Starting cedict with {:?}", args);

    let mut config = AppConfig::from_env();
    if let Some(api) = args.api {
        config.api_base = api;
    }
    if let Some(store) = args.store {
        config.store_path = store;
    }
    log::debug!("Using {:?}", config);

    let client = config
        .client()
        .with_context(|| format!("Invalid API base {:?}", config.api_base))?;
    let ctx = AppContext {
        api: Arc::new(client),
        storage: config.storage(),
        options: config.session_options(),
    };

    let rendered = match args.command {
        Command::Lookup { word, html } => {
            let output = Output::new(html, &ctx.storage)?;
            lookup::lookup(&ctx, &word.join(" "), &output).await?
        }
        Command::News { query, count, html } => {
            let output = Output::new(html, &ctx.storage)?;
            let count = count.unwrap_or(ctx.options.news_count);
            lookup::news(&ctx, &query.join(" "), count, &output).await?
        }
        Command::Interactive { html } => {
            let output = Output::new(html, &ctx.storage)?;
            let stdin = BufReader::new(tokio::io::stdin());
            interactive::interactive(&ctx, &output, stdin, tokio::io::stdout()).await?;
            return Ok(());
        }
        Command::History { clear } => saved::history(&ctx, clear),
        Command::Favorites { clear } => saved::favorites(&ctx, clear),
        Command::Favorite { word, translation } => {
            saved::toggle_favorite(&ctx, &word, &translation)?
        }
        Command::NewsFavorites {
            clear,
            remove,
            html,
        } => {
            let output = Output::new(html, &ctx.storage)?;
            saved::news_favorites(&ctx, clear, remove.as_deref(), &output)?
        }
    };

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(rendered.as_bytes())
        .await
        .context("Failed to write output")?;
    stdout.flush().await?;
    Ok(())
}
