// Per-source driver: search pages -> listings -> resolved specs -> matcher
use crate::analyzer::RequirementMatcher;
use crate::config::{Heuristics, SourceConfig};
use crate::model::{ParserError, ProductListing, Requirements, ScrapeRequest, Site};
use crate::normalizer::parse_price;
use crate::parser::listing::NOT_AVAILABLE;
use crate::parser::{DetailPage, DetailParser, ListingParser, RawListing};
use crate::resolver::SpecResolver;
use crate::scraper::Scraper;
use std::collections::HashSet;
use tokio::time::sleep;
use tracing::{debug, info, warn};

pub struct Pipeline {
    query: String,
    resolver: SpecResolver,
    matcher: RequirementMatcher,
    detail_parser: DetailParser,
}

impl Pipeline {
    pub fn new(
        query: impl Into<String>,
        requirements: Requirements,
        heuristics: Heuristics,
    ) -> Result<Self, ParserError> {
        Ok(Self {
            query: query.into(),
            resolver: SpecResolver::new(heuristics),
            matcher: RequirementMatcher::new(requirements),
            detail_parser: DetailParser::new()?,
        })
    }

    fn wants_laptops(&self) -> bool {
        self.query.to_lowercase().contains("laptop")
    }

    /// Category tag written on every listing of this run.
    pub fn category_tag(&self) -> &'static str {
        if self.wants_laptops() { "laptop" } else { "phone" }
    }

    /// Scrapes one source until `max_results` listings matched, the pages run
    /// out or a search page fails. Results are sorted by price, unparseable
    /// prices last.
    pub async fn process_source(
        &self,
        scraper: &dyn Scraper,
        parser: &dyn ListingParser,
        source: &SourceConfig,
    ) -> Vec<ProductListing> {
        let site = source.site;
        let mut products = Vec::new();
        let mut seen_names = HashSet::new();
        info!(site = site.name(), query = self.query.as_str(), "processing source");

        let mut page = 1;
        while page <= source.max_pages && products.len() < source.max_results {
            let request = ScrapeRequest {
                site,
                query: self.query.clone(),
                page,
            };
            let html = match scraper.fetch(&request).await {
                Ok(html) => html,
                Err(e) => {
                    warn!(site = site.name(), page, error = %e, "search page failed");
                    break;
                }
            };
            let listings = match parser.parse(&html) {
                Ok(listings) => listings,
                Err(e) => {
                    warn!(site = site.name(), page, error = %e, "search page unparseable");
                    break;
                }
            };

            let screened: Vec<RawListing> = listings
                .into_iter()
                .filter(|l| self.keep_listing(l, &mut seen_names))
                .collect();
            debug!(site = site.name(), page, count = screened.len(), "screened listings");

            for (index, raw) in screened.into_iter().enumerate() {
                if products.len() >= source.max_results {
                    break;
                }
                if !raw.link.starts_with(site.base_url()) || raw.link.contains('#') {
                    warn!(name = raw.name.as_str(), link = raw.link.as_str(), "skipping malformed link");
                    continue;
                }

                let detail = if index < source.detail_pages() {
                    self.fetch_detail(scraper, &raw, source).await
                } else {
                    None
                };
                let product = self.build_listing(site, raw, detail.as_ref());
                if self.matcher.matches(&product) {
                    products.push(product);
                }
            }

            if !parser.has_next_page(&html) {
                break;
            }
            page += 1;
            if page <= source.max_pages && products.len() < source.max_results {
                sleep(source.page_delay()).await;
            }
        }

        sort_by_price(&mut products);
        info!(site = site.name(), matched = products.len(), "source done");
        products
    }

    fn keep_listing(&self, listing: &RawListing, seen: &mut HashSet<String>) -> bool {
        let name = listing.name.to_lowercase();
        if listing.name == NOT_AVAILABLE || name.contains("page") || name.contains("buying options") {
            return false;
        }
        if self.wants_laptops() && (name.contains("desktop") || name.contains("computer pc")) {
            debug!(name = listing.name.as_str(), "skipping desktop product");
            return false;
        }
        seen.insert(listing.name.clone())
    }

    async fn fetch_detail(
        &self,
        scraper: &dyn Scraper,
        raw: &RawListing,
        source: &SourceConfig,
    ) -> Option<DetailPage> {
        match scraper.fetch_detail(&raw.link).await {
            Ok(html) => {
                let page = self.detail_parser.parse(&html);
                sleep(source.detail_delay()).await;
                Some(page)
            }
            Err(e) => {
                warn!(name = raw.name.as_str(), error = %e, "detail page failed, using specs from name");
                None
            }
        }
    }

    /// Resolves specs for a screened listing and wraps it as a product.
    pub fn build_listing(&self, site: Site, raw: RawListing, detail: Option<&DetailPage>) -> ProductListing {
        let specifications = self.resolver.resolve(&raw.name, Some(&raw.link), detail);
        ProductListing {
            site: site.name().to_string(),
            category: self.category_tag().to_string(),
            name: raw.name,
            price: raw.price,
            rating: raw.rating,
            link: raw.link,
            specifications,
        }
    }
}

/// Ascending by parsed price; unparseable prices keep their order at the end.
pub fn sort_by_price(products: &mut [ProductListing]) {
    products.sort_by(|a, b| {
        let a = parse_price(&a.price).unwrap_or(f64::INFINITY);
        let b = parse_price(&b.price).unwrap_or(f64::INFINITY);
        a.total_cmp(&b)
    });
}
