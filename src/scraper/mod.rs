pub mod fetcher;
pub mod traits;

pub use fetcher::{ScraperImpl, build_url};
pub use traits::Scraper;
