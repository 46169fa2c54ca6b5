use serde::Serialize;
use tera::{Context, Tera};

use crate::data::models::{FavoriteNewsCard, NewsCard};
use crate::data::repositories::WordFavorites;
use crate::features::search::{NewsView, ResultView, ViewUpdate};
use crate::utils::render_template;

#[derive(Serialize)]
struct CardItem<'a> {
    card: &'a NewsCard,
    active: bool,
}

/// HTML fragments for the result and news areas.
pub struct HtmlView {
    tera: Tera,
    word_favorites: WordFavorites,
}

impl HtmlView {
    pub fn new(word_favorites: WordFavorites) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("result.html", include_str!("../../templates/result.html")),
            ("news.html", include_str!("../../templates/news.html")),
            ("message.html", include_str!("../../templates/message.html")),
        ])?;
        Ok(Self {
            tera,
            word_favorites,
        })
    }

    pub fn result(&self, view: &ResultView) -> String {
        let mut context = Context::from_serialize(view).unwrap_or_else(|e| {
            log::error!("Failed to build result context: {}", e);
            Context::new()
        });
        let is_favorite = match view {
            ResultView::Exact { word, .. } => self.word_favorites.contains(word),
            _ => false,
        };
        context.insert("is_favorite", &is_favorite);
        render_template(&self.tera, "result.html", context)
    }

    pub fn news(&self, view: &NewsView) -> String {
        let items: Vec<CardItem> = match view {
            NewsView::Cards(cards) => cards
                .iter()
                .map(|c| CardItem {
                    card: &c.card,
                    active: c.is_favorited,
                })
                .collect(),
            NewsView::Empty | NewsView::Unavailable(_) => Vec::new(),
        };
        self.card_list("Related news", "No related news", &items)
    }

    pub fn saved_news(&self, saved: &[FavoriteNewsCard]) -> String {
        let items: Vec<CardItem> = saved
            .iter()
            .map(|f| CardItem {
                card: &f.card,
                active: true,
            })
            .collect();
        self.card_list("Saved news", "No saved news", &items)
    }

    pub fn message(&self, class: &str, message: &str) -> String {
        let mut context = Context::new();
        context.insert("css_class", class);
        context.insert("message", message);
        render_template(&self.tera, "message.html", context)
    }

    pub fn update(&self, update: &ViewUpdate) -> String {
        match update {
            ViewUpdate::Cleared => String::new(),
            ViewUpdate::Loading(query) => self.message("loader", &format!("Searching {query}")),
            ViewUpdate::Result(view) => self.result(view),
            ViewUpdate::News(view) => self.news(view),
            ViewUpdate::FavoriteNews(saved) => self.saved_news(saved),
            ViewUpdate::Error(message) => self.message("error-message", message),
        }
    }

    fn card_list(&self, title: &str, empty_message: &str, items: &[CardItem]) -> String {
        let mut context = Context::new();
        context.insert("title", title);
        context.insert("empty_message", empty_message);
        context.insert("items", items);
        render_template(&self.tera, "news.html", context)
    }
}
