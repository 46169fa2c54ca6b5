pub mod cards;

pub use cards::{MAX_NEWS_CARDS, annotate, parse_news};
