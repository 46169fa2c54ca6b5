use std::fmt::Write;

use crate::data::models::{FavoriteNewsCard, FavoriteWord, NewsCard};
use crate::features::search::{NewsView, ResultView, ViewUpdate};

pub fn result(view: &ResultView) -> String {
    let mut out = String::new();
    match view {
        ResultView::NotFound => out.push_str("No matching word found\n"),
        ResultView::Exact {
            word,
            translation_lines,
            examples,
        } => {
            let _ = writeln!(out, "{word}");
            for line in translation_lines {
                let _ = writeln!(out, "  {line}");
            }
            if !examples.is_empty() {
                out.push_str("Examples:\n");
                for (i, example) in examples.iter().enumerate() {
                    let _ = writeln!(out, "  {}. {}", i + 1, example);
                }
            }
        }
        ResultView::Similar { candidates } => {
            out.push_str("Similar words:\n");
            for (i, candidate) in candidates.iter().enumerate() {
                let _ = writeln!(out, "  {}. {}  {}", i + 1, candidate.word, candidate.translation);
            }
        }
    }
    out
}

fn card_line(out: &mut String, position: usize, card: &NewsCard, saved: bool) {
    let _ = writeln!(
        out,
        "  {}. [{}] {} (@{}){}",
        position,
        if saved { "*" } else { " " },
        card.name,
        card.username,
        if card.verified { " ✓" } else { "" }
    );
    if !card.description.is_empty() {
        let _ = writeln!(out, "     {}", card.description);
    }
}

pub fn news(view: &NewsView) -> String {
    let mut out = String::new();
    match view {
        NewsView::Cards(cards) => {
            out.push_str("Related news:\n");
            for (i, item) in cards.iter().enumerate() {
                card_line(&mut out, i + 1, &item.card, item.is_favorited);
            }
        }
        NewsView::Empty | NewsView::Unavailable(_) => out.push_str("No related news\n"),
    }
    out
}

pub fn saved_news(saved: &[FavoriteNewsCard]) -> String {
    if saved.is_empty() {
        return "No saved news\n".to_string();
    }
    let mut out = String::from("Saved news:\n");
    for (i, favorite) in saved.iter().enumerate() {
        card_line(&mut out, i + 1, &favorite.card, true);
        let _ = writeln!(out, "     id {} saved {}", favorite.card.id, favorite.timestamp);
    }
    out
}

pub fn history(entries: &[String]) -> String {
    if entries.is_empty() {
        return "No search history\n".to_string();
    }
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("  {}. {}\n", i + 1, entry))
        .collect()
}

pub fn favorite_words(words: &[FavoriteWord]) -> String {
    if words.is_empty() {
        return "No favorite words\n".to_string();
    }
    words
        .iter()
        .map(|w| format!("  {}  {}\n", w.word, w.translation.replace('\n', "; ")))
        .collect()
}

pub fn update(update: &ViewUpdate) -> String {
    match update {
        ViewUpdate::Cleared => String::new(),
        ViewUpdate::Loading(query) => format!("Searching {query}...\n"),
        ViewUpdate::Result(view) => result(view),
        ViewUpdate::News(view) => news(view),
        ViewUpdate::FavoriteNews(saved) => saved_news(saved),
        ViewUpdate::Error(message) => format!("! {message}\n"),
    }
}
