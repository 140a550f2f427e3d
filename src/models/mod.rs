mod cover;

pub use cover::{ParseRequest, ParseResult, ARTICLE_HOST};
