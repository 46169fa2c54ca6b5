pub mod news;
pub mod search;
