use crate::config::RetryConfig;
use crate::model::{ScrapeRequest, ScraperError, Site};
use crate::scraper::traits::Scraper;
use crate::utils::to_query_param;

use rand::seq::IndexedRandom;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
];

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ScraperImpl {
    client: Client,
    retry: RetryConfig,
}

impl ScraperImpl {
    pub fn new(retry: RetryConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ScraperError::HttpError(e.to_string()))?;

        Ok(Self { client, retry })
    }

    fn user_agent() -> &'static str {
        USER_AGENTS
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(USER_AGENTS[0])
    }

    async fn get_once(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, Self::user_agent())
            .send()
            .await
            .map_err(map_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::InvalidResponse(status.as_u16()));
        }

        response.text().await.map_err(map_reqwest)
    }

    /// Up to `retry.attempts` tries with a random backoff between them.
    async fn get_with_retry(&self, url: &str) -> Result<String, ScraperError> {
        let attempts = self.retry.attempts.max(1);
        let mut attempt = 1;
        loop {
            debug!(url, attempt, "fetching");
            match self.get_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < attempts => {
                    let backoff = self.retry.backoff();
                    warn!(url, attempt, error = %e, ?backoff, "fetch failed, retrying");
                    sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Search URL for one results page; spaces in the query become `+`.
pub fn build_url(req: &ScrapeRequest) -> String {
    let query = to_query_param(&req.query);
    match req.site {
        Site::Amazon => format!("{}/s?k={}&page={}", Site::Amazon.base_url(), query, req.page),
        Site::Flipkart => format!(
            "{}/search?q={}&page={}",
            Site::Flipkart.base_url(),
            query,
            req.page
        ),
    }
}

fn map_reqwest(e: reqwest::Error) -> ScraperError {
    if e.is_timeout() {
        ScraperError::Timeout
    } else {
        ScraperError::HttpError(e.to_string())
    }
}

#[async_trait::async_trait]
impl Scraper for ScraperImpl {
    async fn fetch(&self, req: &ScrapeRequest) -> Result<String, ScraperError> {
        let url = build_url(req);
        self.get_with_retry(&url).await
    }

    async fn fetch_detail(&self, link: &str) -> Result<String, ScraperError> {
        self.get_with_retry(link).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_urls_per_site() {
        let amazon = ScrapeRequest {
            site: Site::Amazon,
            query: "laptop with i5 processor".into(),
            page: 2,
        };
        assert_eq!(
            build_url(&amazon),
            "https://www.amazon.in/s?k=laptop+with+i5+processor&page=2"
        );

        let flipkart = ScrapeRequest {
            site: Site::Flipkart,
            query: "gaming laptop".into(),
            page: 1,
        };
        assert_eq!(
            build_url(&flipkart),
            "https://www.flipkart.com/search?q=gaming+laptop&page=1"
        );
    }

    #[test]
    fn user_agent_comes_from_pool() {
        assert!(USER_AGENTS.contains(&ScraperImpl::user_agent()));
    }

    #[tokio::test]
    async fn unreachable_host_fails_after_retries() {
        let scraper = ScraperImpl::new(RetryConfig {
            attempts: 2,
            backoff_min_ms: 0,
            backoff_max_ms: 0,
        })
        .unwrap();
        let result = scraper.fetch_detail("http://127.0.0.1:9/unreachable").await;
        assert!(result.is_err());
    }
}
