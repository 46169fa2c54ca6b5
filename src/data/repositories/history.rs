use crate::data::models::StorageKey;
use crate::data::repositories::StorageClient;
use crate::utils::text::normalize_query;

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Past queries, newest first, one entry per normalized query.
#[derive(Clone)]
pub struct HistoryStore {
    storage: StorageClient,
    limit: usize,
}

impl HistoryStore {
    pub fn new(storage: StorageClient, limit: usize) -> Self {
        Self {
            storage,
            limit: limit.max(1),
        }
    }

    pub fn list(&self) -> Vec<String> {
        self.storage.get(StorageKey::History, Vec::new())
    }

    pub fn record(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        let key = normalize_query(query);
        let mut entries = self.list();
        entries.retain(|entry| normalize_query(entry) != key);
        entries.insert(0, query.to_string());
        entries.truncate(self.limit);

        self.storage.set(StorageKey::History, &entries);
    }

    pub fn clear(&self) {
        self.storage.remove(StorageKey::History);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first_without_duplicates() {
        let history = HistoryStore::new(StorageClient::in_memory(), 10);
        history.record("hello");
        history.record("book");
        history.record("  Hello ");

        assert_eq!(history.list(), vec!["Hello", "book"]);
    }

    #[test]
    fn capped_at_limit_and_ignores_blank_queries() {
        let history = HistoryStore::new(StorageClient::in_memory(), 2);
        history.record("a1");
        history.record("   ");
        history.record("b2");
        history.record("c3");

        assert_eq!(history.list(), vec!["c3", "b2"]);

        history.clear();
        assert!(history.list().is_empty());
    }
}
