pub mod client;
#[cfg(test)]
pub mod fake_client;
pub mod models;
pub mod repositories;

pub use client::{DEFAULT_NEWS_COUNT, DictionaryApi, HttpDictionaryClient};
