//! Twitter/X post search.
//!
//! Provides the fetcher seam and an HTML search implementation.

mod fetcher;
mod parser;
mod types;

pub use fetcher::{PostFetcher, SearchFetcher};
pub use parser::SearchParser;
pub use types::{LatestPost, SearchFilter};
