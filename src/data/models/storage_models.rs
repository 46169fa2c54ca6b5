use std::fmt;

/// Fixed keys of the local store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    History,
    Favorites,
    NewsFavorites,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::History => "cedict_history",
            StorageKey::Favorites => "cedict_favorites",
            StorageKey::NewsFavorites => "cedict_news_favorites",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
