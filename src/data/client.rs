use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;

use crate::data::models::{ClientError, NewsPayload, WordEntry};

pub const DEFAULT_NEWS_COUNT: usize = 3;

/// The two lookups the interface needs from the backend.
#[async_trait]
pub trait DictionaryApi: Send + Sync {
    async fn search_word(&self, word: &str) -> Result<WordEntry, ClientError>;

    async fn get_news(&self, query: &str, count: usize) -> Result<NewsPayload, ClientError>;
}

pub struct HttpDictionaryClient {
    base: Url,
    http: reqwest::Client,
}

impl HttpDictionaryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base = Url::parse(base_url).map_err(|e| ClientError::Endpoint(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::Endpoint(format!("{base_url} cannot be a base URL")));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Endpoint(e.to_string()))?;

        Ok(Self { base, http })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Endpoint(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<Value, ClientError> {
        log::debug!("GET {}", url);
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl DictionaryApi for HttpDictionaryClient {
    async fn search_word(&self, word: &str) -> Result<WordEntry, ClientError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(ClientError::EmptyQuery);
        }

        let url = self.endpoint(&["api", "word", word])?;
        let body = self.get_json(url).await.inspect_err(|e| {
            log::warn!("Word lookup for {:?} failed: {}", word, e);
        })?;

        serde_json::from_value(body).map_err(|e| {
            log::warn!("Word lookup for {:?} returned an unknown shape: {}", word, e);
            ClientError::Decode(e.to_string())
        })
    }

    async fn get_news(&self, query: &str, count: usize) -> Result<NewsPayload, ClientError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ClientError::EmptyQuery);
        }

        let mut url = self.endpoint(&["api", "news"])?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("count", &count.to_string());

        let body = self.get_json(url).await.inspect_err(|e| {
            log::warn!("News lookup for {:?} failed: {}", query, e);
        })?;

        if let Some(message) = body.get("error").filter(|v| !v.is_null()) {
            let message = match message {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            log::warn!("News lookup for {:?} rejected: {}", query, message);
            return Err(ClientError::Upstream(message));
        }

        Ok(NewsPayload(body))
    }
}
