use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::data::client::DictionaryApi;
use crate::data::models::{ClientError, NewsPayload, WordEntry};

/// Scripted backend for session tests. Unknown words are not found and
/// unknown news queries return an empty timeline.
#[derive(Default)]
pub struct FakeDictionary {
    words: HashMap<String, (Duration, Result<WordEntry, u16>)>,
    news: HashMap<String, Value>,
    pub word_calls: Mutex<Vec<String>>,
    pub news_calls: Mutex<Vec<(String, usize)>>,
}

impl FakeDictionary {
    pub fn with_word(mut self, word: &str, entry: WordEntry) -> Self {
        self.words
            .insert(word.to_string(), (Duration::ZERO, Ok(entry)));
        self
    }

    pub fn with_slow_word(mut self, word: &str, delay: Duration, entry: WordEntry) -> Self {
        self.words.insert(word.to_string(), (delay, Ok(entry)));
        self
    }

    pub fn with_failure(mut self, word: &str, status: u16) -> Self {
        self.words
            .insert(word.to_string(), (Duration::ZERO, Err(status)));
        self
    }

    pub fn with_news(mut self, query: &str, payload: Value) -> Self {
        self.news.insert(query.to_string(), payload);
        self
    }

    pub fn word_calls(&self) -> Vec<String> {
        self.word_calls.lock().unwrap().clone()
    }

    pub fn news_calls(&self) -> Vec<(String, usize)> {
        self.news_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DictionaryApi for FakeDictionary {
    async fn search_word(&self, word: &str) -> Result<WordEntry, ClientError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(ClientError::EmptyQuery);
        }
        self.word_calls.lock().unwrap().push(word.to_string());

        match self.words.get(word) {
            Some((delay, outcome)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(*delay).await;
                }
                outcome.clone().map_err(ClientError::Status)
            }
            None => Ok(WordEntry::NotFound),
        }
    }

    async fn get_news(&self, query: &str, count: usize) -> Result<NewsPayload, ClientError> {
        self.news_calls
            .lock()
            .unwrap()
            .push((query.to_string(), count));

        let payload = self
            .news
            .get(query)
            .cloned()
            .unwrap_or_else(|| serde_json::json!({"result": {"timeline": {"instructions": []}}}));
        Ok(NewsPayload(payload))
    }
}
