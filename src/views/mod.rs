pub mod html;
pub mod terminal;

pub use html::HtmlView;
