use anyhow::{Result, bail};

use crate::data::repositories::{HistoryStore, NewsFavorites, WordFavorites};
use crate::handlers::{AppContext, Output};
use crate::views::terminal;

pub fn history(ctx: &AppContext, clear: bool) -> String {
    let history = HistoryStore::new(ctx.storage.clone(), ctx.options.history_limit);
    if clear {
        history.clear();
        return "Search history cleared\n".to_string();
    }
    terminal::history(&history.list())
}

pub fn favorites(ctx: &AppContext, clear: bool) -> String {
    let favorites = WordFavorites::new(ctx.storage.clone());
    if clear {
        favorites.clear();
        return "Favorite words cleared\n".to_string();
    }
    terminal::favorite_words(&favorites.list())
}

pub fn toggle_favorite(ctx: &AppContext, word: &str, translation: &str) -> Result<String> {
    let word = word.trim();
    if word.is_empty() {
        bail!("Word must not be empty");
    }
    let favorites = WordFavorites::new(ctx.storage.clone());
    let was_favorite = favorites.contains(word);
    let is_favorite = favorites.toggle_word(word, translation);
    if is_favorite == was_favorite {
        bail!("Could not update favorites for {word}");
    }
    Ok(if is_favorite {
        format!("Added {word} to favorites\n")
    } else {
        format!("Removed {word} from favorites\n")
    })
}

pub fn news_favorites(
    ctx: &AppContext,
    clear: bool,
    remove: Option<&str>,
    output: &Output,
) -> Result<String> {
    let favorites = NewsFavorites::new(ctx.storage.clone());
    if clear {
        favorites.clear();
        return Ok("Saved news cleared\n".to_string());
    }

    if let Some(id) = remove {
        let Some(saved) = favorites.list().into_iter().find(|f| f.card.id == id) else {
            bail!("No saved news with id {id:?}");
        };
        favorites.toggle(saved);
        log::info!("Removed saved news {:?}", id);
    }
    Ok(output.saved_news(&favorites.list()))
}
