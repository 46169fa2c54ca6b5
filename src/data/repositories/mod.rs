pub mod favorites;
pub mod history;
pub mod storage;

pub use favorites::{Favorite, FavoritesStore, NewsFavorites, WordFavorites};
pub use history::{DEFAULT_HISTORY_LIMIT, HistoryStore};
pub use storage::{FileBackend, KeyValueBackend, MemoryBackend, StorageClient};
