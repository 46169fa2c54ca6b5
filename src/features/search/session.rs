use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use futures_util::future::BoxFuture;
use futures_util::stream::FuturesUnordered;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

use crate::data::models::{
    ClientError, FavoriteNewsCard, NewsCard, NewsCardView, NewsOutcome, NewsPayload, WordEntry,
};
use crate::data::repositories::{HistoryStore, NewsFavorites, StorageClient};
use crate::data::{DEFAULT_NEWS_COUNT, DictionaryApi};
use crate::features::news::{annotate, parse_news};
use crate::features::search::controller::{Command, Dispatch, SearchController};
use crate::features::search::renderer::{ResultRenderer, ResultView};

/// User actions on the search page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The search box now holds this text.
    Keystroke(String),
    Enter(String),
    /// 1-based position in the similar-words list.
    SelectSimilar(usize),
    /// 1-based position in the visible news list.
    ToggleNewsFavorite(usize),
    ShowFavoriteNews,
    ShowNews,
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NewsView {
    Cards(Vec<NewsCardView>),
    Empty,
    Unavailable(String),
}

/// Everything the session asks the front-end to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    Cleared,
    Loading(String),
    Result(ResultView),
    News(NewsView),
    FavoriteNews(Vec<FavoriteNewsCard>),
    /// Transient message, shown then dismissed.
    Error(String),
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub debounce: Duration,
    pub news_count: usize,
    pub history_limit: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            debounce: super::controller::DEFAULT_DEBOUNCE,
            news_count: DEFAULT_NEWS_COUNT,
            history_limit: crate::data::repositories::DEFAULT_HISTORY_LIMIT,
        }
    }
}

enum Completion {
    Word {
        seq: u64,
        text: String,
        result: Result<WordEntry, ClientError>,
    },
    News {
        seq: u64,
        query: String,
        result: Result<NewsPayload, ClientError>,
    },
}

type InFlight = FuturesUnordered<BoxFuture<'static, Completion>>;

/// Drives one search page: debounce timer, lookups, news and favorites.
/// Everything runs on the task that awaits `run`; requests are polled
/// concurrently but never in parallel.
pub struct SearchSession<A: ?Sized> {
    api: Arc<A>,
    controller: SearchController,
    history: HistoryStore,
    news_favorites: NewsFavorites,
    news_count: usize,
    updates: mpsc::UnboundedSender<ViewUpdate>,
    result: Option<ResultView>,
    news_query: Option<String>,
    news_cards: Vec<NewsCard>,
    showing_favorites: bool,
}

impl<A> SearchSession<A>
where
    A: DictionaryApi + ?Sized + 'static,
{
    pub fn new(
        api: Arc<A>,
        storage: StorageClient,
        options: SessionOptions,
        updates: mpsc::UnboundedSender<ViewUpdate>,
    ) -> Self {
        Self {
            api,
            controller: SearchController::new(options.debounce),
            history: HistoryStore::new(storage.clone(), options.history_limit),
            news_favorites: NewsFavorites::new(storage),
            news_count: options.news_count,
            updates,
            result: None,
            news_query: None,
            news_cards: Vec::new(),
            showing_favorites: false,
        }
    }

    /// Runs until the event channel closes and pending work has drained.
    pub async fn run(mut self, mut events: mpsc::Receiver<InputEvent>) {
        let mut in_flight: InFlight = FuturesUnordered::new();
        let mut inputs_open = true;

        loop {
            let deadline = self.controller.deadline();
            tokio::select! {
                event = events.recv(), if inputs_open => match event {
                    Some(event) => self.handle_event(event, &mut in_flight),
                    None => inputs_open = false,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(dispatch) = self.controller.timer_elapsed(Instant::now()) {
                        self.dispatch_word(dispatch, &mut in_flight);
                    }
                },
                Some(done) = in_flight.next(), if !in_flight.is_empty() => {
                    self.handle_completion(done, &mut in_flight);
                },
                else => break,
            }
        }
        log::debug!("Search session finished");
    }

    fn emit(&self, update: ViewUpdate) {
        // a closed view only means nobody is watching any more
        let _ = self.updates.send(update);
    }

    fn handle_event(&mut self, event: InputEvent, in_flight: &mut InFlight) {
        log::trace!("Input {:?}", event);
        match event {
            InputEvent::Keystroke(text) => {
                let command = self.controller.keystroke(&text, Instant::now());
                self.apply(command, in_flight);
            }
            InputEvent::Enter(text) => {
                let command = self.controller.enter(&text);
                self.apply(command, in_flight);
            }
            InputEvent::SelectSimilar(position) => {
                let word = self
                    .result
                    .as_ref()
                    .and_then(|view| view.candidate(position))
                    .map(|candidate| candidate.word.clone());
                match word {
                    Some(word) => {
                        let command = self.controller.enter(&word);
                        self.apply(command, in_flight);
                    }
                    None => self.emit(ViewUpdate::Error(format!("No similar word #{position}"))),
                }
            }
            InputEvent::ToggleNewsFavorite(position) => self.toggle_news_favorite(position),
            InputEvent::ShowFavoriteNews => {
                self.showing_favorites = true;
                self.emit(ViewUpdate::FavoriteNews(self.news_favorites.list()));
            }
            InputEvent::ShowNews => {
                self.showing_favorites = false;
                match self.news_query.clone() {
                    Some(query) => {
                        let seq = self.controller.latest_seq();
                        self.dispatch_news(seq, query, in_flight);
                    }
                    None => self.emit(ViewUpdate::News(NewsView::Empty)),
                }
            }
            InputEvent::Clear => {
                self.controller.clear();
                self.clear_results();
            }
        }
    }

    fn apply(&mut self, command: Command, in_flight: &mut InFlight) {
        match command {
            Command::Clear => self.clear_results(),
            Command::Dispatch(dispatch) => self.dispatch_word(dispatch, in_flight),
            Command::Schedule(_) | Command::Ignore => {}
        }
    }

    fn clear_results(&mut self) {
        self.result = None;
        self.news_query = None;
        self.news_cards.clear();
        self.showing_favorites = false;
        self.emit(ViewUpdate::Cleared);
    }

    fn dispatch_word(&mut self, dispatch: Dispatch, in_flight: &mut InFlight) {
        log::info!("Looking up {:?} (#{})", dispatch.text, dispatch.seq);
        self.emit(ViewUpdate::Loading(dispatch.text.clone()));

        let api = Arc::clone(&self.api);
        in_flight.push(Box::pin(async move {
            let result = api.search_word(&dispatch.text).await;
            Completion::Word {
                seq: dispatch.seq,
                text: dispatch.text,
                result,
            }
        }));
    }

    fn dispatch_news(&mut self, seq: u64, query: String, in_flight: &mut InFlight) {
        log::debug!("Fetching news for {:?} (#{})", query, seq);
        let api = Arc::clone(&self.api);
        let count = self.news_count;
        in_flight.push(Box::pin(async move {
            let result = api.get_news(&query, count).await;
            Completion::News { seq, query, result }
        }));
    }

    fn handle_completion(&mut self, done: Completion, in_flight: &mut InFlight) {
        match done {
            Completion::Word { seq, text, result } => {
                if !self.controller.complete(seq, result.is_ok()) {
                    log::debug!("Dropping stale result for {:?} (#{})", text, seq);
                    return;
                }
                match result {
                    Ok(entry) => {
                        self.history.record(&text);
                        let rendered = ResultRenderer::render(&entry);
                        self.result = Some(rendered.view.clone());
                        self.news_cards.clear();
                        self.news_query = rendered.news_query.clone();
                        self.showing_favorites = false;
                        self.emit(ViewUpdate::Result(rendered.view));

                        if let Some(query) = rendered.news_query {
                            self.dispatch_news(seq, query, in_flight);
                        }
                    }
                    Err(e) => {
                        log::error!("Lookup for {:?} failed: {}", text, e);
                        self.emit(ViewUpdate::Error(e.to_string()));
                    }
                }
            }
            Completion::News { seq, query, result } => {
                if !self.controller.is_current(seq) || self.showing_favorites {
                    log::debug!("Dropping stale news for {:?} (#{})", query, seq);
                    return;
                }
                let view = match result {
                    Ok(payload) => match parse_news(&payload) {
                        NewsOutcome::Cards(cards) => {
                            let views = annotate(&cards, &self.news_favorites);
                            self.news_cards = cards;
                            NewsView::Cards(views)
                        }
                        NewsOutcome::Empty => {
                            self.news_cards.clear();
                            NewsView::Empty
                        }
                        NewsOutcome::Malformed(reason) => {
                            log::warn!("News payload for {:?} is malformed: {}", query, reason);
                            self.news_cards.clear();
                            NewsView::Unavailable(reason)
                        }
                    },
                    Err(e) => {
                        log::warn!("News for {:?} unavailable: {}", query, e);
                        self.news_cards.clear();
                        NewsView::Unavailable(e.to_string())
                    }
                };
                self.emit(ViewUpdate::News(view));
            }
        }
    }

    fn toggle_news_favorite(&mut self, position: usize) {
        let index = position.checked_sub(1);

        if self.showing_favorites {
            let stored = self.news_favorites.list();
            match index.and_then(|i| stored.into_iter().nth(i)) {
                Some(favorite) => {
                    self.news_favorites.toggle(favorite);
                    self.emit(ViewUpdate::FavoriteNews(self.news_favorites.list()));
                }
                None => self.emit(ViewUpdate::Error(format!("No saved news #{position}"))),
            }
            return;
        }

        match index.and_then(|i| self.news_cards.get(i)) {
            Some(card) => {
                let now_favorite = self.news_favorites.toggle_card(card);
                log::info!(
                    "News card {:?} {}",
                    card.id,
                    if now_favorite { "saved" } else { "removed" }
                );
                let views = annotate(&self.news_cards, &self.news_favorites);
                self.emit(ViewUpdate::News(NewsView::Cards(views)));
            }
            None => self.emit(ViewUpdate::Error(format!("No news card #{position}"))),
        }
    }
}
