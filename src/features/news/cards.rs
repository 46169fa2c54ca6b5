use serde_json::Value;

use crate::data::models::{NewsCard, NewsCardView, NewsOutcome, NewsPayload};
use crate::data::repositories::NewsFavorites;

pub const MAX_NEWS_CARDS: usize = 3;

fn array<'a>(value: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn text(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn user_result(item: &Value) -> Option<&Value> {
    item.get("item")?
        .get("itemContent")?
        .get("user_results")?
        .get("result")
}

fn card(result: &Value) -> Option<NewsCard> {
    let legacy = result.get("legacy").filter(|v| v.is_object())?;
    Some(NewsCard {
        id: text(result, "rest_id"),
        name: text(legacy, "name"),
        username: text(legacy, "screen_name"),
        profile_image: text(legacy, "profile_image_url_https"),
        description: text(legacy, "description"),
        verified: result
            .get("is_blue_verified")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}

/// Flattens the timeline into at most `MAX_NEWS_CARDS` cards, in traversal
/// order. Items missing any node on the way to `legacy` are skipped.
pub fn parse_news(payload: &NewsPayload) -> NewsOutcome {
    let root = &payload.0;
    if root.get("error").is_some_and(|e| !e.is_null()) {
        return NewsOutcome::Malformed("payload carries an error".into());
    }

    let Some(timeline) = root.get("result").and_then(|r| r.get("timeline")) else {
        return NewsOutcome::Malformed("missing result.timeline".into());
    };
    if !timeline.is_object() {
        return NewsOutcome::Malformed("timeline is not an object".into());
    }

    let cards: Vec<NewsCard> = array(timeline, "instructions")
        .flat_map(|instruction| array(instruction, "entries"))
        .filter_map(|entry| entry.get("content"))
        .flat_map(|content| array(content, "items"))
        .filter_map(user_result)
        .filter_map(card)
        .take(MAX_NEWS_CARDS)
        .collect();

    if cards.is_empty() {
        NewsOutcome::Empty
    } else {
        NewsOutcome::Cards(cards)
    }
}

/// Pairs each card with its favorite state as stored right now.
pub fn annotate(cards: &[NewsCard], favorites: &NewsFavorites) -> Vec<NewsCardView> {
    cards
        .iter()
        .map(|card| NewsCardView {
            card: card.clone(),
            is_favorited: favorites.contains(&card.id),
        })
        .collect()
}
