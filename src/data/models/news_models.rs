use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw `/api/news` body. The shape is owned by the upstream search API and is
/// walked defensively by `features::news`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewsPayload(pub Value);

/// A flattened user result from the news timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewsCard {
    pub id: String,
    pub name: String,
    pub username: String,
    pub profile_image: String,
    pub description: String,
    pub verified: bool,
}

/// A news card saved by the user, stamped when it was favorited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteNewsCard {
    #[serde(flatten)]
    pub card: NewsCard,
    #[serde(default)]
    pub timestamp: String,
}

impl FavoriteNewsCard {
    pub fn stamped(card: NewsCard) -> Self {
        Self {
            card,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Render-time view of a card: favorite state is derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsCardView {
    #[serde(flatten)]
    pub card: NewsCard,
    pub is_favorited: bool,
}

/// Result of flattening a news payload.
#[derive(Debug, Clone, PartialEq)]
pub enum NewsOutcome {
    Cards(Vec<NewsCard>),
    Empty,
    Malformed(String),
}

impl NewsOutcome {
    pub fn cards(&self) -> &[NewsCard] {
        match self {
            NewsOutcome::Cards(cards) => cards,
            _ => &[],
        }
    }
}
