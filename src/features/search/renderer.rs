use serde::Serialize;

use crate::data::models::{SimilarWord, WordEntry};
use crate::utils::text::translation_lines;

/// What the result area shows for one lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultView {
    NotFound,
    Exact {
        word: String,
        translation_lines: Vec<String>,
        examples: Vec<String>,
    },
    Similar {
        candidates: Vec<SimilarWord>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResult {
    pub view: ResultView,
    /// Set for exact matches: related news is fetched for this word.
    pub news_query: Option<String>,
}

pub struct ResultRenderer;

impl ResultRenderer {
    pub fn render(entry: &WordEntry) -> RenderedResult {
        match entry {
            WordEntry::NotFound => RenderedResult {
                view: ResultView::NotFound,
                news_query: None,
            },
            WordEntry::Exact {
                word,
                translation,
                examples,
            } => RenderedResult {
                view: ResultView::Exact {
                    word: word.clone(),
                    translation_lines: translation_lines(translation),
                    examples: examples.clone(),
                },
                news_query: Some(word.clone()),
            },
            WordEntry::Similar { similar_words } => RenderedResult {
                view: ResultView::Similar {
                    candidates: similar_words.clone(),
                },
                news_query: None,
            },
        }
    }
}

impl ResultView {
    /// Candidate word at a 1-based position of a similar-words list.
    pub fn candidate(&self, position: usize) -> Option<&SimilarWord> {
        match self {
            ResultView::Similar { candidates } => {
                position.checked_sub(1).and_then(|i| candidates.get(i))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_renders_and_requests_news() {
        let rendered = ResultRenderer::render(&WordEntry::Exact {
            word: "你好".into(),
            translation: "hello".into(),
            examples: vec!["你好吗？".into()],
        });

        assert_eq!(
            rendered.view,
            ResultView::Exact {
                word: "你好".into(),
                translation_lines: vec!["hello".into()],
                examples: vec!["你好吗？".into()],
            }
        );
        assert_eq!(rendered.news_query.as_deref(), Some("你好"));
    }

    #[test]
    fn multi_line_translation_keeps_line_order() {
        let rendered = ResultRenderer::render(&WordEntry::Exact {
            word: "book".into(),
            translation: "n. 书\nv. 预订".into(),
            examples: vec![],
        });

        match rendered.view {
            ResultView::Exact {
                translation_lines,
                examples,
                ..
            } => {
                assert_eq!(translation_lines, vec!["n. 书", "v. 预订"]);
                assert!(examples.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn not_found_and_similar_fetch_no_news() {
        let rendered = ResultRenderer::render(&WordEntry::NotFound);
        assert_eq!(rendered.view, ResultView::NotFound);
        assert!(rendered.news_query.is_none());

        let rendered = ResultRenderer::render(&WordEntry::Similar {
            similar_words: vec![
                SimilarWord {
                    word: "hell".into(),
                    translation: "地狱".into(),
                },
                SimilarWord {
                    word: "help".into(),
                    translation: "帮助".into(),
                },
            ],
        });
        assert!(rendered.news_query.is_none());
        assert_eq!(rendered.view.candidate(2).map(|c| c.word.as_str()), Some("help"));
        assert!(rendered.view.candidate(0).is_none());
        assert!(rendered.view.candidate(3).is_none());
    }
}
