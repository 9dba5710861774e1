pub mod client;
pub mod html;
pub mod parser;

pub use client::FeedClient;
pub use html::clean_html;
pub use parser::parse_feed;
