// Search-result page parsing for the supported sites
use crate::model::{ParserError, Site};
use crate::utils::squash_whitespace;
use scraper::{ElementRef, Html, Selector};

/// Placeholder for listing fields the page did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// One search-result card before any screening or spec extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct RawListing {
    pub name: String,
    pub price: String,
    pub rating: String,
    /// Absolute URL, or `"N/A"`.
    pub link: String,
}

pub trait ListingParser: Send + Sync {
    fn site(&self) -> Site;
    fn parse(&self, html: &str) -> Result<Vec<RawListing>, ParserError>;
    fn has_next_page(&self, html: &str) -> bool;
}

pub fn selector(css: &str) -> Result<Selector, ParserError> {
    Selector::parse(css).map_err(|e| ParserError::HtmlParseError(e.to_string()))
}

pub fn for_site(site: Site) -> Result<Box<dyn ListingParser>, ParserError> {
    Ok(match site {
        Site::Amazon => Box::new(AmazonParser::new()?),
        Site::Flipkart => Box::new(FlipkartParser::new()?),
    })
}

/// Selector set shared by both site parsers.
struct CardSelectors {
    item: Selector,
    name: Selector,
    price: Selector,
    rating: Selector,
    link: Selector,
}

impl CardSelectors {
    fn new(item: &str, name: &str, price: &str, rating: &str, link: &str) -> Result<Self, ParserError> {
        Ok(Self {
            item: selector(item)?,
            name: selector(name)?,
            price: selector(price)?,
            rating: selector(rating)?,
            link: selector(link)?,
        })
    }

    fn card(&self, item: ElementRef<'_>, site: Site) -> RawListing {
        let link = item
            .select(&self.link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| absolute_link(site, href))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        RawListing {
            name: text_of(item, &self.name),
            price: text_of(item, &self.price),
            rating: text_of(item, &self.rating),
            link,
        }
    }
}

fn text_of(item: ElementRef<'_>, sel: &Selector) -> String {
    item.select(sel)
        .next()
        .map(|node| squash_whitespace(&node.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn absolute_link(site: Site, href: &str) -> String {
    if href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{}{}", site.base_url(), href)
    }
}

pub struct AmazonParser {
    cards: CardSelectors,
    skip: Selector,
    next: Selector,
}

impl AmazonParser {
    pub fn new() -> Result<Self, ParserError> {
        Ok(Self {
            cards: CardSelectors::new(
                ".s-result-item, .s-card-container",
                "h2 a span, .a-text-normal",
                ".a-price-whole, .a-price .a-offscreen",
                ".a-icon-alt, span[aria-label*='out of 5 stars']",
                "a.a-link-normal",
            )?,
            skip: selector(".s-sponsored-label, .s-pagination-item")?,
            next: selector("a.s-pagination-next")?,
        })
    }
}

impl ListingParser for AmazonParser {
    fn site(&self) -> Site {
        Site::Amazon
    }

    fn parse(&self, html: &str) -> Result<Vec<RawListing>, ParserError> {
        let document = Html::parse_document(html);
        let listings = document
            .select(&self.cards.item)
            .filter(|item| item.select(&self.skip).next().is_none())
            .map(|item| self.cards.card(item, Site::Amazon))
            .collect();
        Ok(listings)
    }

    fn has_next_page(&self, html: &str) -> bool {
        let document = Html::parse_document(html);
        document
            .select(&self.next)
            .next()
            .is_some_and(|a| !a.value().classes().any(|c| c == "s-pagination-disabled"))
    }
}

pub struct FlipkartParser {
    cards: CardSelectors,
    next: Selector,
}

impl FlipkartParser {
    pub fn new() -> Result<Self, ParserError> {
        Ok(Self {
            cards: CardSelectors::new(
                "div.tUxRFH",
                "div.KzDlHZ, a.IRpwTa",
                "div.Nx9bqj, div.yRaYxA",
                "div.XQDdHH, span.sGWbFc",
                "a.CGtC98, a.IRpwTa",
            )?,
            next: selector("a._9QVEpD")?,
        })
    }
}

impl ListingParser for FlipkartParser {
    fn site(&self) -> Site {
        Site::Flipkart
    }

    fn parse(&self, html: &str) -> Result<Vec<RawListing>, ParserError> {
        let document = Html::parse_document(html);
        Ok(document
            .select(&self.cards.item)
            .map(|item| self.cards.card(item, Site::Flipkart))
            .collect())
    }

    fn has_next_page(&self, html: &str) -> bool {
        let document = Html::parse_document(html);
        document
            .select(&self.next)
            .any(|a| a.text().any(|t| t.trim() == "Next"))
    }
}
