pub mod error_models;
pub mod news_models;
pub mod storage_models;
pub mod word_models;

pub use error_models::{ClientError, StorageError, ValidationError};
pub use news_models::{FavoriteNewsCard, NewsCard, NewsCardView, NewsOutcome, NewsPayload};
pub use storage_models::StorageKey;
pub use word_models::{FavoriteWord, SearchInput, SimilarWord, WordEntry};
