use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// One lookup response from `/api/word/{word}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WordEntry {
    Exact {
        word: String,
        #[serde(default, deserialize_with = "null_as_default")]
        translation: String,
        #[serde(default, deserialize_with = "null_as_default")]
        examples: Vec<String>,
    },
    Similar {
        #[serde(default, deserialize_with = "null_as_default")]
        similar_words: Vec<SimilarWord>,
    },
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarWord {
    pub word: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub translation: String,
}

// The backend serializes every optional field, so absent values arrive as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Raw text from the search box, trimmed.
#[derive(Debug, Validate)]
pub struct SearchInput {
    #[validate(length(min = 2, message = "Type at least 2 characters"))]
    pub text: String,
}

impl SearchInput {
    pub fn new(raw: &str) -> Self {
        Self {
            text: raw.trim().to_string(),
        }
    }
}

/// A favorited dictionary word, keyed by its normalized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteWord {
    pub word: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub timestamp: String,
}
