pub mod interactive;
pub mod lookup;
pub mod saved;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::data::DictionaryApi;
use crate::data::models::FavoriteNewsCard;
use crate::data::repositories::{StorageClient, WordFavorites};
use crate::features::search::{SessionOptions, ViewUpdate};
use crate::views::{HtmlView, terminal};

/// Shared handles every command works with.
#[derive(Clone)]
pub struct AppContext {
    pub api: Arc<dyn DictionaryApi>,
    pub storage: StorageClient,
    pub options: SessionOptions,
}

pub enum Output {
    Text,
    Html(HtmlView),
}

impl Output {
    pub fn new(html: bool, storage: &StorageClient) -> Result<Self> {
        if !html {
            return Ok(Output::Text);
        }
        let view = HtmlView::new(WordFavorites::new(storage.clone()))
            .context("Failed to load templates")?;
        Ok(Output::Html(view))
    }

    pub fn update(&self, update: &ViewUpdate) -> String {
        match self {
            Output::Text => terminal::update(update),
            Output::Html(view) => line(view.update(update)),
        }
    }

    pub fn saved_news(&self, saved: &[FavoriteNewsCard]) -> String {
        match self {
            Output::Text => terminal::saved_news(saved),
            Output::Html(view) => line(view.saved_news(saved)),
        }
    }
}

fn line(mut fragment: String) -> String {
    if !fragment.is_empty() && !fragment.ends_with('\n') {
        fragment.push('\n');
    }
    fragment
}

#[cfg(test)]
pub(crate) fn test_context(api: crate::data::fake_client::FakeDictionary) -> AppContext {
    AppContext {
        api: Arc::new(api),
        storage: StorageClient::in_memory(),
        options: SessionOptions::default(),
    }
}
