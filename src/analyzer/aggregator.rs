// Cross-source aggregation: dedup, categorize, score and pick a diverse top-N
use crate::model::{Attribute, Category, ProductListing, Recommendation, SpecRecord};
use crate::normalizer::{parse_kg, parse_price, parse_rating};
use std::collections::HashSet;
use tracing::{debug, info};

const DEDUP_TOKENS: usize = 5;
const ULTRAPORTABLE_MAX_KG: f64 = 1.5;
const DEDICATED_GPU: [&str; 4] = ["nvidia", "geforce", "rtx", "radeon"];
const CREATOR_PANELS: [&str; 5] = ["oled", "wuxga", "qhd", "2k", "4k"];

/// Near-identity key: the first five lower-cased words of the name.
pub fn dedup_key(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .take(DEDUP_TOKENS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keeps the first listing for every dedup key, preserving arrival order.
pub fn deduplicate(products: Vec<ProductListing>) -> Vec<ProductListing> {
    let mut seen = HashSet::new();
    products
        .into_iter()
        .filter(|p| seen.insert(dedup_key(&p.name)))
        .collect()
}

/// Collapses any Windows variant to `Windows 11` or `Windows`.
pub fn canonical_os(os: &str) -> String {
    let lower = os.to_lowercase();
    if !lower.contains("windows") {
        return os.to_string();
    }
    if lower.contains("11") {
        "Windows 11".to_string()
    } else {
        "Windows".to_string()
    }
}

/// First match wins: dedicated GPU, light weight, high-end panel, otherwise
/// productivity.
pub fn categorize(specs: &SpecRecord) -> Category {
    let gpu = specs.display(Attribute::Gpu).to_lowercase();
    if DEDICATED_GPU.iter().any(|token| gpu.contains(token)) {
        return Category::Gaming;
    }
    let weight = specs.get(Attribute::Weight).and_then(parse_kg);
    if weight.is_some_and(|kg| kg <= ULTRAPORTABLE_MAX_KG) {
        return Category::Ultraportable;
    }
    let resolution = specs.display(Attribute::Resolution).to_lowercase();
    if CREATOR_PANELS.iter().any(|token| resolution.contains(token)) {
        return Category::Creator;
    }
    Category::Productivity
}

/// `rating*5 - price/10000`, or `rating*5` when the price does not parse.
pub fn score(product: &ProductListing) -> f64 {
    let rating = parse_rating(&product.rating).unwrap_or(0.0);
    match parse_price(&product.price) {
        Some(price) => rating * 5.0 - price / 10_000.0,
        None => rating * 5.0,
    }
}

/// Walks `ranked` (best first) admitting unseen categories until the number of
/// admissions reaches the count of distinct categories, after which anything
/// is admitted. Remaining slots are filled in score order.
pub fn select_diverse(ranked: Vec<Recommendation>, top_n: usize) -> Vec<Recommendation> {
    let distinct = ranked
        .iter()
        .map(|r| r.category)
        .collect::<HashSet<_>>()
        .len();

    let mut seen = HashSet::new();
    let mut picked = vec![false; ranked.len()];
    let mut admitted = 0;
    for (i, rec) in ranked.iter().enumerate() {
        if admitted >= top_n {
            break;
        }
        if !seen.contains(&rec.category) || admitted >= distinct {
            seen.insert(rec.category);
            picked[i] = true;
            admitted += 1;
        }
    }

    let (mut selected, rest): (Vec<_>, Vec<_>) = ranked
        .into_iter()
        .zip(picked)
        .partition(|(_, picked)| *picked);
    let fill = top_n.saturating_sub(selected.len());
    selected.extend(rest.into_iter().take(fill));
    selected.into_iter().map(|(rec, _)| rec).collect()
}

pub struct Aggregator {
    top_n: usize,
}

impl Aggregator {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Merges per-source result lists (in the given order) into ranked
    /// recommendations.
    pub fn recommend(&self, sources: &[Vec<ProductListing>]) -> Vec<Recommendation> {
        let combined: Vec<ProductListing> = sources.iter().flatten().cloned().collect();
        let total = combined.len();
        let unique = deduplicate(combined);
        info!(total, unique = unique.len(), "combined source results");

        let mut ranked: Vec<Recommendation> = unique
            .into_iter()
            .map(|mut product| {
                if let Some(os) = product.specifications.get(Attribute::Os) {
                    let os = canonical_os(os);
                    product.specifications.set(Attribute::Os, os);
                }
                let category = categorize(&product.specifications);
                let score = score(&product);
                debug!(name = product.name.as_str(), %category, score, "scored");
                Recommendation {
                    product,
                    category,
                    score,
                }
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

        select_diverse(ranked, self.top_n)
    }
}
