use std::sync::Arc;

use anyhow::{Result, bail};
use tokio::sync::mpsc;

use crate::data::models::NewsOutcome;
use crate::data::repositories::NewsFavorites;
use crate::features::news::{annotate, parse_news};
use crate::features::search::{InputEvent, NewsView, SearchSession, ViewUpdate};
use crate::handlers::{AppContext, Output};

/// Runs one submitted search through a session and renders what it produced.
pub async fn lookup(ctx: &AppContext, word: &str, output: &Output) -> Result<String> {
    let (events_tx, events_rx) = mpsc::channel(1);
    let (updates_tx, mut updates_rx) = mpsc::unbounded_channel();
    let session = SearchSession::new(
        Arc::clone(&ctx.api),
        ctx.storage.clone(),
        ctx.options.clone(),
        updates_tx,
    );

    events_tx.send(InputEvent::Enter(word.to_string())).await?;
    drop(events_tx);
    session.run(events_rx).await;

    let mut rendered = String::new();
    while let Some(update) = updates_rx.recv().await {
        match update {
            ViewUpdate::Loading(_) | ViewUpdate::Cleared => {}
            ViewUpdate::Error(message) => bail!(message),
            update => rendered.push_str(&output.update(&update)),
        }
    }
    if rendered.is_empty() {
        bail!("Nothing to look up");
    }
    Ok(rendered)
}

/// Fetches news for `query` directly, without a word lookup first.
pub async fn news(ctx: &AppContext, query: &str, count: usize, output: &Output) -> Result<String> {
    let favorites = NewsFavorites::new(ctx.storage.clone());
    let view = match ctx.api.get_news(query, count).await {
        Ok(payload) => match parse_news(&payload) {
            NewsOutcome::Cards(cards) => NewsView::Cards(annotate(&cards, &favorites)),
            NewsOutcome::Empty => NewsView::Empty,
            NewsOutcome::Malformed(reason) => {
                log::warn!("News payload for {:?} is malformed: {}", query, reason);
                NewsView::Unavailable(reason)
            }
        },
        Err(e) => {
            log::warn!("News for {:?} unavailable: {}", query, e);
            NewsView::Unavailable(e.to_string())
        }
    };
    Ok(output.update(&ViewUpdate::News(view)))
}
