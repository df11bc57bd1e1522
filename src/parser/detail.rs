// Product detail pages: technical-specification rows and feature bullets
use super::listing::selector;
use crate::model::ParserError;
use crate::utils::squash_whitespace;
use scraper::{Html, Selector};

/// Evidence scraped from one detail page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailPage {
    /// `(label, value)` rows, labels lower-cased with whitespace collapsed.
    pub fields: Vec<(String, String)>,
    pub bullets: Option<String>,
}

impl DetailPage {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.bullets.is_none()
    }
}

pub struct DetailParser {
    rows: Selector,
    label: Selector,
    value: Selector,
    bullets: Selector,
}

impl DetailParser {
    pub fn new() -> Result<Self, ParserError> {
        Ok(Self {
            rows: selector("#productDetails_techSpec_section_1 tr")?,
            label: selector("th")?,
            value: selector("td")?,
            bullets: selector("#feature-bullets")?,
        })
    }

    pub fn parse(&self, html: &str) -> DetailPage {
        let document = Html::parse_document(html);

        let fields = document
            .select(&self.rows)
            .filter_map(|row| {
                let label = row.select(&self.label).next()?;
                let value = row.select(&self.value).next()?;
                let label = squash_whitespace(&label.text().collect::<String>()).to_lowercase();
                let value = squash_whitespace(&value.text().collect::<String>());
                (!label.is_empty() && !value.is_empty()).then_some((label, value))
            })
            .collect();

        let bullets = document
            .select(&self.bullets)
            .next()
            .map(|node| squash_whitespace(&node.text().collect::<Vec<_>>().join(" ")))
            .filter(|text| !text.is_empty());

        DetailPage { fields, bullets }
    }
}
