pub mod controller;
pub mod renderer;
pub mod session;

pub use controller::{Command, ControllerState, DEFAULT_DEBOUNCE, Dispatch, SearchController};
pub use renderer::{RenderedResult, ResultRenderer, ResultView};
pub use session::{InputEvent, NewsView, SearchSession, SessionOptions, ViewUpdate};
