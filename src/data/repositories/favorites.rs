use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::data::models::{FavoriteNewsCard, FavoriteWord, NewsCard, StorageKey};
use crate::data::repositories::StorageClient;
use crate::utils::text::normalize_query;

/// A record that can be kept in a favorites list.
pub trait Favorite: Serialize + DeserializeOwned {
    const KEY: StorageKey;

    /// Identity used for membership and removal.
    fn favorite_key(&self) -> String;

    fn normalize_key(raw: &str) -> String {
        raw.to_string()
    }
}

impl Favorite for FavoriteNewsCard {
    const KEY: StorageKey = StorageKey::NewsFavorites;

    fn favorite_key(&self) -> String {
        self.card.id.clone()
    }
}

impl Favorite for FavoriteWord {
    const KEY: StorageKey = StorageKey::Favorites;

    fn favorite_key(&self) -> String {
        normalize_query(&self.word)
    }

    fn normalize_key(raw: &str) -> String {
        normalize_query(raw)
    }
}

/// Favorites persisted under one storage key. Nothing is cached: every call
/// reads the store again, so all handles see the same list.
pub struct FavoritesStore<T> {
    storage: StorageClient,
    _marker: PhantomData<fn() -> T>,
}

pub type NewsFavorites = FavoritesStore<FavoriteNewsCard>;
pub type WordFavorites = FavoritesStore<FavoriteWord>;

impl<T> Clone for FavoritesStore<T> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Favorite> FavoritesStore<T> {
    pub fn new(storage: StorageClient) -> Self {
        Self {
            storage,
            _marker: PhantomData,
        }
    }

    pub fn list(&self) -> Vec<T> {
        self.storage.get(T::KEY, Vec::new())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.contains_key(&T::normalize_key(key))
    }

    fn contains_key(&self, key: &str) -> bool {
        self.list().iter().any(|item| item.favorite_key() == key)
    }

    /// Adds `item` when no favorite shares its key, otherwise removes the first
    /// match. Returns the membership state as stored afterwards, which is the
    /// old state when the write was rejected.
    pub fn toggle(&self, item: T) -> bool {
        let key = item.favorite_key();
        let mut items = self.list();

        let wanted = match items.iter().position(|existing| existing.favorite_key() == key) {
            Some(index) => {
                items.remove(index);
                false
            }
            None => {
                items.push(item);
                true
            }
        };

        self.storage.set(T::KEY, &items);
        let member = self.contains_key(&key);
        if member != wanted {
            log::warn!("{} unchanged for {:?}: write was not stored", T::KEY, key);
        } else {
            log::debug!(
                "{} {} {:?}",
                T::KEY,
                if member { "added" } else { "removed" },
                key
            );
        }
        member
    }

    pub fn clear(&self) {
        self.storage.remove(T::KEY);
    }
}

impl FavoritesStore<FavoriteNewsCard> {
    pub fn toggle_card(&self, card: &NewsCard) -> bool {
        self.toggle(FavoriteNewsCard::stamped(card.clone()))
    }
}

impl FavoritesStore<FavoriteWord> {
    pub fn toggle_word(&self, word: &str, translation: &str) -> bool {
        self.toggle(FavoriteWord {
            word: word.trim().to_string(),
            translation: translation.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::repositories::FileBackend;
    use tempfile::tempdir;

    fn card(id: &str, name: &str) -> NewsCard {
        NewsCard {
            id: id.into(),
            name: name.into(),
            username: format!("{name}_handle"),
            ..NewsCard::default()
        }
    }

    #[test]
    fn toggle_returns_the_new_membership_state() {
        let favorites = NewsFavorites::new(StorageClient::in_memory());
        let item = card("42", "alice");

        assert!(!favorites.contains("42"));
        assert!(favorites.toggle_card(&item));
        assert!(favorites.contains("42"));
        assert!(!favorites.toggle_card(&item));
        assert!(!favorites.contains("42"));
    }

    #[test]
    fn toggle_is_an_involution_per_id() {
        let favorites = NewsFavorites::new(StorageClient::in_memory());
        favorites.toggle_card(&card("1", "a"));

        for id in ["1", "2"] {
            let before = favorites.contains(id);
            let first = favorites.toggle_card(&card(id, "x"));
            assert_eq!(first, favorites.contains(id));
            let second = favorites.toggle_card(&card(id, "x"));
            assert_eq!(second, favorites.contains(id));
            assert_eq!(favorites.contains(id), before);
        }
    }

    #[test]
    fn rejected_write_reports_the_unchanged_state() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("store.json")).with_quota(40);
        let favorites = NewsFavorites::new(StorageClient::new(backend));

        let added = favorites.toggle_card(&card("1", &"n".repeat(100)));
        assert!(!added);
        assert_eq!(added, favorites.contains("1"));
        assert!(favorites.list().is_empty());

        let words = WordFavorites::new(favorites.storage.clone());
        assert!(!words.toggle_word(&"w".repeat(100), "long"));
    }

    #[test]
    fn same_id_with_different_content_removes_the_stored_card() {
        let favorites = NewsFavorites::new(StorageClient::in_memory());
        favorites.toggle_card(&card("7", "old"));

        assert!(!favorites.toggle_card(&card("7", "new")));
        assert!(favorites.list().is_empty());
    }

    #[test]
    fn handles_share_state_through_storage() {
        let storage = StorageClient::in_memory();
        let writer = NewsFavorites::new(storage.clone());
        let reader = NewsFavorites::new(storage);

        writer.toggle_card(&card("9", "bob"));
        assert!(reader.contains("9"));

        let stored = reader.list();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].card.username, "bob_handle");
        assert!(!stored[0].timestamp.is_empty());
    }

    #[test]
    fn persisted_news_favorites_use_camel_case_fields() {
        let storage = StorageClient::in_memory();
        let favorites = NewsFavorites::new(storage.clone());
        favorites.toggle_card(&NewsCard {
            profile_image: "https://img/1.png".into(),
            ..card("3", "carol")
        });

        let raw = storage.raw(StorageKey::NewsFavorites).unwrap();
        assert!(raw.contains(r#""profileImage":"https://img/1.png""#));
        assert!(raw.contains(r#""timestamp":"#));
    }

    #[test]
    fn word_favorites_match_on_normalized_word() {
        let favorites = WordFavorites::new(StorageClient::in_memory());

        assert!(favorites.toggle_word("Hello", "你好"));
        assert!(favorites.contains("  hello "));
        assert!(!favorites.toggle_word("HELLO", "你好"));
        assert!(favorites.list().is_empty());

        favorites.toggle_word("book", "书");
        favorites.clear();
        assert!(!favorites.contains("book"));
    }
}
