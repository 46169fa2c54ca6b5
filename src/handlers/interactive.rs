use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::features::search::{InputEvent, SearchSession};
use crate::handlers::{AppContext, Output};

const HELP: &str = "\
<text>        search now
:type <text>  update the search box (searches after a pause)
:pick <n>     look up similar word n
:fav <n>      save or unsave news card n
:saved        show saved news
:news         back to related news
:clear        clear the results
:quit         exit
";

#[derive(Debug, PartialEq, Eq)]
pub enum Line {
    Event(InputEvent),
    Help,
    Quit,
    Invalid(String),
}

fn position(command: &str, arg: &str) -> Result<usize, String> {
    arg.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| format!("{command} expects a position starting at 1"))
}

/// Maps one input line onto a session event.
pub fn parse_line(line: &str) -> Line {
    let Some(command) = line.trim_start().strip_prefix(':') else {
        return Line::Event(InputEvent::Enter(line.to_string()));
    };
    let (name, arg) = command.split_once(' ').unwrap_or((command.trim_end(), ""));

    let parsed = match name {
        "type" => Ok(InputEvent::Keystroke(arg.to_string())),
        "pick" => position(":pick", arg).map(InputEvent::SelectSimilar),
        "fav" => position(":fav", arg).map(InputEvent::ToggleNewsFavorite),
        "saved" => Ok(InputEvent::ShowFavoriteNews),
        "news" => Ok(InputEvent::ShowNews),
        "clear" => Ok(InputEvent::Clear),
        "help" => return Line::Help,
        "quit" | "q" => return Line::Quit,
        other => Err(format!("Unknown command :{other} (try :help)")),
    };
    match parsed {
        Ok(event) => Line::Event(event),
        Err(message) => Line::Invalid(message),
    }
}

/// Feeds `input` lines to a search session and writes its updates to `out`.
/// End of input lets pending lookups finish; `:quit` abandons them.
pub async fn interactive<R, W>(ctx: &AppContext, output: &Output, input: R, mut out: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (events_tx, events_rx) = mpsc::channel(32);
    let (updates_tx, mut updates_rx) = mpsc::unbounded_channel();
    let session = SearchSession::new(
        Arc::clone(&ctx.api),
        ctx.storage.clone(),
        ctx.options.clone(),
        updates_tx,
    );
    let session = tokio::spawn(session.run(events_rx));

    let mut lines = input.lines();
    let mut quit = false;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                match parse_line(&line) {
                    Line::Event(event) => {
                        if events_tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    Line::Help => out.write_all(HELP.as_bytes()).await?,
                    Line::Invalid(message) => {
                        out.write_all(format!("! {message}\n").as_bytes()).await?
                    }
                    Line::Quit => {
                        quit = true;
                        break;
                    }
                }
            }
            Some(update) = updates_rx.recv() => {
                out.write_all(output.update(&update).as_bytes()).await?;
            }
        }
        out.flush().await?;
    }

    drop(events_tx);
    if quit {
        session.abort();
    } else {
        session.await.context("Search session stopped unexpectedly")?;
        while let Some(update) = updates_rx.recv().await {
            out.write_all(output.update(&update).as_bytes()).await?;
        }
    }
    out.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fake_client::FakeDictionary;
    use crate::data::models::{SimilarWord, WordEntry};
    use crate::handlers::test_context;

    #[test]
    fn lines_map_to_events() {
        assert_eq!(
            parse_line("ni hao"),
            Line::Event(InputEvent::Enter("ni hao".into()))
        );
        assert_eq!(
            parse_line(":type ni h"),
            Line::Event(InputEvent::Keystroke("ni h".into()))
        );
        assert_eq!(
            parse_line(":pick 2"),
            Line::Event(InputEvent::SelectSimilar(2))
        );
        assert_eq!(
            parse_line(":fav 1"),
            Line::Event(InputEvent::ToggleNewsFavorite(1))
        );
        assert_eq!(parse_line(":saved"), Line::Event(InputEvent::ShowFavoriteNews));
        assert_eq!(parse_line(":clear "), Line::Event(InputEvent::Clear));
        assert_eq!(parse_line(":quit"), Line::Quit);
        assert_eq!(parse_line(":help"), Line::Help);
    }

    #[test]
    fn bad_commands_are_reported() {
        assert!(matches!(parse_line(":pick 0"), Line::Invalid(_)));
        assert!(matches!(parse_line(":fav x"), Line::Invalid(_)));
        assert!(matches!(parse_line(":nope"), Line::Invalid(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn typed_text_is_searched_after_input_ends() {
        let api = FakeDictionary::default().with_word(
            "ni hao",
            WordEntry::Exact {
                word: "你好".into(),
                translation: "hello".into(),
                examples: vec![],
            },
        );
        let ctx = test_context(api);
        let mut out = Vec::new();

        interactive(&ctx, &Output::Text, &b":type ni\n:type ni hao\n"[..], &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Searching").count(), 1);
        assert!(text.contains("Searching ni hao...\n"));
        assert!(text.contains("你好\n  hello\n"));
        assert!(text.ends_with("No related news\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn similar_words_are_listed_and_bad_picks_reported() {
        let api = FakeDictionary::default().with_word(
            "helo",
            WordEntry::Similar {
                similar_words: vec![SimilarWord {
                    word: "hello".into(),
                    translation: "你好".into(),
                }],
            },
        );
        let ctx = test_context(api);
        let mut out = Vec::new();

        interactive(&ctx, &Output::Text, &b":pick 0\nhelo\n"[..], &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("! :pick expects a position starting at 1\n"));
        assert!(text.contains("Similar words:\n  1. hello  你好\n"));
    }

    #[tokio::test]
    async fn quit_stops_without_searching() {
        let ctx = test_context(FakeDictionary::default());
        let mut out = Vec::new();

        interactive(&ctx, &Output::Text, &b":help\n:type later\n:quit\nignored\n"[..], &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("<text>"));
        assert!(!text.contains("Searching"));
    }
}
