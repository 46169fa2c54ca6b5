use std::time::Duration;

use tokio::time::Instant;
use validator::Validate;

use crate::data::models::{SearchInput, ValidationError};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Debouncing,
    Querying,
    Rendered,
    Failed,
}

/// A lookup the session should send, tagged with its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub seq: u64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Input too short: wipe the result area.
    Clear,
    /// Debounce timer (re)armed for this instant.
    Schedule(Instant),
    Dispatch(Dispatch),
    Ignore,
}

#[derive(Debug)]
struct Pending {
    text: String,
    deadline: Instant,
}

/// Debounce and ordering rules of the search box. Time is passed in by the
/// caller so the machine stays synchronous.
#[derive(Debug)]
pub struct SearchController {
    state: ControllerState,
    delay: Duration,
    pending: Option<Pending>,
    latest_seq: u64,
}

impl SearchController {
    pub fn new(delay: Duration) -> Self {
        Self {
            state: ControllerState::Idle,
            delay,
            pending: None,
            latest_seq: 0,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn keystroke(&mut self, raw: &str, now: Instant) -> Command {
        let input = SearchInput::new(raw);
        if let Err(e) = input.validate().map_err(ValidationError::from) {
            log::debug!("{}: {:?}", e, input.text);
            self.clear();
            return Command::Clear;
        }

        let deadline = now + self.delay;
        self.pending = Some(Pending {
            text: input.text,
            deadline,
        });
        self.state = ControllerState::Debouncing;
        Command::Schedule(deadline)
    }

    /// Enter bypasses the debounce and drops any pending timer.
    pub fn enter(&mut self, raw: &str) -> Command {
        let text = raw.trim();
        if text.is_empty() {
            return Command::Ignore;
        }
        self.pending = None;
        Command::Dispatch(self.dispatch(text.to_string()))
    }

    pub fn timer_elapsed(&mut self, now: Instant) -> Option<Dispatch> {
        if self.pending.as_ref()?.deadline > now {
            return None;
        }
        let pending = self.pending.take()?;
        Some(self.dispatch(pending.text))
    }

    /// Cancels the timer and makes every in-flight response stale.
    pub fn clear(&mut self) {
        self.pending = None;
        self.latest_seq += 1;
        self.state = ControllerState::Idle;
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest_seq
    }

    /// Records a response. Returns false when a newer dispatch (or a clear)
    /// superseded it and the response must be dropped.
    pub fn complete(&mut self, seq: u64, succeeded: bool) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        if self.pending.is_none() {
            self.state = if succeeded {
                ControllerState::Rendered
            } else {
                ControllerState::Failed
            };
        }
        true
    }

    fn dispatch(&mut self, text: String) -> Dispatch {
        self.latest_seq += 1;
        self.state = ControllerState::Querying;
        Dispatch {
            seq: self.latest_seq,
            text,
        }
    }
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn keystrokes_restart_the_timer_and_fire_once() {
        let mut controller = SearchController::new(DELAY);
        let t0 = Instant::now();

        controller.keystroke("ni", t0);
        controller.keystroke("ni h", t0 + Duration::from_millis(200));
        let last = controller.keystroke("ni hao", t0 + Duration::from_millis(400));
        assert_eq!(last, Command::Schedule(t0 + Duration::from_millis(900)));
        assert_eq!(controller.state(), ControllerState::Debouncing);

        assert!(controller.timer_elapsed(t0 + Duration::from_millis(600)).is_none());
        let fired = controller
            .timer_elapsed(t0 + Duration::from_millis(900))
            .unwrap();
        assert_eq!(fired.text, "ni hao");
        assert_eq!(controller.state(), ControllerState::Querying);
        assert!(controller.timer_elapsed(t0 + Duration::from_secs(5)).is_none());
    }

    #[test]
    fn short_input_clears_and_cancels() {
        let mut controller = SearchController::new(DELAY);
        let t0 = Instant::now();

        controller.keystroke("hello", t0);
        assert_eq!(controller.keystroke(" h ", t0), Command::Clear);
        assert_eq!(controller.state(), ControllerState::Idle);
        assert!(controller.deadline().is_none());
        assert!(controller.timer_elapsed(t0 + DELAY).is_none());
    }

    #[test]
    fn enter_dispatches_immediately_for_any_non_empty_input() {
        let mut controller = SearchController::new(DELAY);
        let t0 = Instant::now();

        controller.keystroke("hello", t0);
        match controller.enter(" x ") {
            Command::Dispatch(d) => assert_eq!(d.text, "x"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(controller.deadline().is_none());
        assert_eq!(controller.enter("   "), Command::Ignore);
    }

    #[test]
    fn only_the_latest_dispatch_is_current() {
        let mut controller = SearchController::new(DELAY);
        let Command::Dispatch(first) = controller.enter("slow") else {
            panic!("expected dispatch")
        };
        let Command::Dispatch(second) = controller.enter("fast") else {
            panic!("expected dispatch")
        };

        assert!(controller.complete(second.seq, true));
        assert_eq!(controller.state(), ControllerState::Rendered);
        assert!(!controller.complete(first.seq, true));
        assert_eq!(controller.state(), ControllerState::Rendered);
    }

    #[test]
    fn clearing_makes_in_flight_responses_stale() {
        let mut controller = SearchController::new(DELAY);
        let Command::Dispatch(d) = controller.enter("hello") else {
            panic!("expected dispatch")
        };

        controller.keystroke("", Instant::now());
        assert!(!controller.complete(d.seq, true));
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[test]
    fn failure_is_terminal_until_next_input() {
        let mut controller = SearchController::new(DELAY);
        let Command::Dispatch(d) = controller.enter("boom") else {
            panic!("expected dispatch")
        };
        assert!(controller.complete(d.seq, false));
        assert_eq!(controller.state(), ControllerState::Failed);

        controller.keystroke("again", Instant::now());
        assert_eq!(controller.state(), ControllerState::Debouncing);
    }

    #[test]
    fn response_during_debounce_keeps_the_timer() {
        let mut controller = SearchController::new(DELAY);
        let t0 = Instant::now();
        let Command::Dispatch(d) = controller.enter("hello") else {
            panic!("expected dispatch")
        };

        controller.keystroke("hello w", t0);
        assert!(controller.complete(d.seq, true));
        assert_eq!(controller.state(), ControllerState::Debouncing);
        assert_eq!(controller.deadline(), Some(t0 + DELAY));
    }
}
