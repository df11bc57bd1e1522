// Core structs: SpecRecord, ProductListing, Requirements, Recommendation
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Sentinel written for attributes without evidence.
pub const UNKNOWN: &str = "unknown";

/// The fixed attribute set of a specification record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Processor,
    Ram,
    Storage,
    DisplaySize,
    Gpu,
    Os,
    Weight,
    Battery,
    RefreshRate,
    Resolution,
}

impl Attribute {
    pub const ALL: [Attribute; 10] = [
        Attribute::Processor,
        Attribute::Ram,
        Attribute::Storage,
        Attribute::DisplaySize,
        Attribute::Gpu,
        Attribute::Os,
        Attribute::Weight,
        Attribute::Battery,
        Attribute::RefreshRate,
        Attribute::Resolution,
    ];

    /// Key used in persisted records.
    pub fn key(self) -> &'static str {
        match self {
            Attribute::Processor => "processor",
            Attribute::Ram => "ram",
            Attribute::Storage => "ssd",
            Attribute::DisplaySize => "display_size",
            Attribute::Gpu => "gpu",
            Attribute::Os => "os",
            Attribute::Weight => "weight",
            Attribute::Battery => "battery",
            Attribute::RefreshRate => "refresh_rate",
            Attribute::Resolution => "resolution",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Normalized per-product attributes. `None` is serialized as `"unknown"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecRecord {
    #[serde(default, with = "sentinel")]
    pub processor: Option<String>,
    #[serde(default, with = "sentinel")]
    pub ram: Option<String>,
    #[serde(rename = "ssd", alias = "storage", default, with = "sentinel")]
    pub storage: Option<String>,
    #[serde(default, with = "sentinel")]
    pub display_size: Option<String>,
    #[serde(default, with = "sentinel")]
    pub gpu: Option<String>,
    #[serde(default, with = "sentinel")]
    pub os: Option<String>,
    #[serde(default, with = "sentinel")]
    pub weight: Option<String>,
    #[serde(default, with = "sentinel")]
    pub battery: Option<String>,
    #[serde(default, with = "sentinel")]
    pub refresh_rate: Option<String>,
    #[serde(default, with = "sentinel")]
    pub resolution: Option<String>,
}

impl SpecRecord {
    pub fn get(&self, attr: Attribute) -> Option<&str> {
        self.slot(attr).as_deref()
    }

    /// Value as written to output, `"unknown"` when absent.
    pub fn display(&self, attr: Attribute) -> &str {
        self.get(attr).unwrap_or(UNKNOWN)
    }

    pub fn set(&mut self, attr: Attribute, value: impl Into<String>) {
        *self.slot_mut(attr) = Some(value.into());
    }

    /// Sets `attr` only while it is still unknown. Returns whether it was written.
    pub fn fill(&mut self, attr: Attribute, value: impl Into<String>) -> bool {
        let slot = self.slot_mut(attr);
        if slot.is_some() {
            return false;
        }
        *slot = Some(value.into());
        true
    }

    pub fn is_unknown(&self, attr: Attribute) -> bool {
        self.slot(attr).is_none()
    }

    pub fn known_count(&self) -> usize {
        Attribute::ALL.iter().filter(|a| !self.is_unknown(**a)).count()
    }

    /// Precedence merge: keeps `self`'s value wherever it is known and takes
    /// `lower`'s value only for attributes `self` has no evidence for.
    pub fn merge(mut self, lower: &SpecRecord) -> SpecRecord {
        for attr in Attribute::ALL {
            if let Some(value) = lower.get(attr) {
                self.fill(attr, value);
            }
        }
        self
    }

    fn slot(&self, attr: Attribute) -> &Option<String> {
        match attr {
            Attribute::Processor => &self.processor,
            Attribute::Ram => &self.ram,
            Attribute::Storage => &self.storage,
            Attribute::DisplaySize => &self.display_size,
            Attribute::Gpu => &self.gpu,
            Attribute::Os => &self.os,
            Attribute::Weight => &self.weight,
            Attribute::Battery => &self.battery,
            Attribute::RefreshRate => &self.refresh_rate,
            Attribute::Resolution => &self.resolution,
        }
    }

    fn slot_mut(&mut self, attr: Attribute) -> &mut Option<String> {
        match attr {
            Attribute::Processor => &mut self.processor,
            Attribute::Ram => &mut self.ram,
            Attribute::Storage => &mut self.storage,
            Attribute::DisplaySize => &mut self.display_size,
            Attribute::Gpu => &mut self.gpu,
            Attribute::Os => &mut self.os,
            Attribute::Weight => &mut self.weight,
            Attribute::Battery => &mut self.battery,
            Attribute::RefreshRate => &mut self.refresh_rate,
            Attribute::Resolution => &mut self.resolution,
        }
    }
}

mod sentinel {
    use super::UNKNOWN;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.as_deref().unwrap_or(UNKNOWN))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.filter(|v| {
            let v = v.trim();
            !v.is_empty() && !v.eq_ignore_ascii_case(UNKNOWN) && !v.eq_ignore_ascii_case("n/a")
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    Amazon,
    Flipkart,
}

impl Site {
    pub fn name(self) -> &'static str {
        match self {
            Site::Amazon => "Amazon",
            Site::Flipkart => "Flipkart",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Site::Amazon => "amazon",
            Site::Flipkart => "flipkart",
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            Site::Amazon => "https://www.amazon.in",
            Site::Flipkart => "https://www.flipkart.com",
        }
    }
}

/// A listing as delivered by a source, with its owned specification record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListing {
    pub site: String,
    pub category: String,
    pub name: String,
    pub price: String,
    pub rating: String,
    pub link: String,
    #[serde(default)]
    pub specifications: SpecRecord,
}

/// Buyer constraints for one search. Values may be given as strings or numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default, deserialize_with = "string_or_number")]
    pub processor: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub ram: Option<String>,
    #[serde(default, alias = "ssd", deserialize_with = "string_or_number")]
    pub storage: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub gpu: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub os: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub resolution: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub weight: Option<String>,
    #[serde(default)]
    pub max_price: Option<f64>,
}

impl Requirements {
    pub fn get(&self, attr: Attribute) -> Option<&str> {
        match attr {
            Attribute::Processor => self.processor.as_deref(),
            Attribute::Ram => self.ram.as_deref(),
            Attribute::Storage => self.storage.as_deref(),
            Attribute::Gpu => self.gpu.as_deref(),
            Attribute::Os => self.os.as_deref(),
            Attribute::Resolution => self.resolution.as_deref(),
            Attribute::Weight => self.weight.as_deref(),
            _ => None,
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }

    Ok(Option::<Raw>::deserialize(d)?.map(|raw| match raw {
        Raw::Text(t) => t,
        Raw::Number(n) => n.to_string(),
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Gaming,
    Ultraportable,
    Creator,
    Productivity,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Gaming => "Gaming",
            Category::Ultraportable => "Ultraportable",
            Category::Creator => "Creator",
            Category::Productivity => "Productivity",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub product: ProductListing,
    pub category: Category,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub query: String,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    pub site: Site,
    pub query: String,
    pub page: u32,
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("http error: {0}")]
    HttpError(String),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected response status {0}")]
    InvalidResponse(u16),
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("html parse error: {0}")]
    HtmlParseError(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage json error: {0}")]
    Json(#[from] serde_json::Error),
}
