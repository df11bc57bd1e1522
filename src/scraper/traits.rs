use crate::model::{ScrapeRequest, ScraperError};

/// Source of raw page HTML.
#[async_trait::async_trait]
pub trait Scraper: Send + Sync {
    /// One page of search results.
    async fn fetch(&self, req: &ScrapeRequest) -> Result<String, ScraperError>;

    /// A product detail page by absolute URL.
    async fn fetch_detail(&self, link: &str) -> Result<String, ScraperError>;
}
