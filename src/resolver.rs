// Combines per-source evidence into one specification record
use crate::config::Heuristics;
use crate::model::SpecRecord;
use crate::parser::{DetailPage, FieldExtractor};
use tracing::debug;

/// Resolves a product's specs with precedence
/// structured detail fields > feature bullets > product name.
pub struct SpecResolver {
    extractor: FieldExtractor,
}

impl SpecResolver {
    pub fn new(heuristics: Heuristics) -> Self {
        Self {
            extractor: FieldExtractor::new(heuristics),
        }
    }

    /// Name-only record, used when no detail page is available.
    pub fn from_name(&self, name: &str, link: Option<&str>) -> SpecRecord {
        self.extractor.from_name(name, link)
    }

    pub fn resolve(&self, name: &str, link: Option<&str>, detail: Option<&DetailPage>) -> SpecRecord {
        let from_name = self.from_name(name, link);
        let Some(detail) = detail.filter(|d| !d.is_empty()) else {
            return from_name;
        };

        let structured = self.extractor.from_fields(&detail.fields);
        let bullets = detail
            .bullets
            .as_deref()
            .map(|text| self.extractor.from_bullets(text))
            .unwrap_or_default();

        let resolved = structured.merge(&bullets).merge(&from_name);
        debug!(
            name,
            structured = structured_count(&detail.fields, &self.extractor),
            known = resolved.known_count(),
            "resolved specs with detail page"
        );
        resolved
    }
}

impl Default for SpecResolver {
    fn default() -> Self {
        Self::new(Heuristics::default())
    }
}

fn structured_count(rows: &[(String, String)], extractor: &FieldExtractor) -> usize {
    rows.iter()
        .filter(|(label, value)| extractor.field(label, value).is_some())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Attribute;

    fn page(fields: &[(&str, &str)], bullets: Option<&str>) -> DetailPage {
        DetailPage {
            fields: fields
                .iter()
                .map(|(l, v)| (l.to_string(), v.to_string()))
                .collect(),
            bullets: bullets.map(str::to_string),
        }
    }

    const NAME: &str = "Dell Inspiron 3520 Intel Core i3 1215U 8GB RAM 512GB SSD 15.6 inch Windows";

    #[test]
    fn name_only_without_detail() {
        let resolver = SpecResolver::default();
        let specs = resolver.resolve(NAME, None, None);
        assert_eq!(specs, resolver.from_name(NAME, None));
        assert_eq!(specs.get(Attribute::Ram), Some("8GB"));
        assert_eq!(specs.get(Attribute::Os), Some("windows 11"));
    }

    #[test]
    fn structured_beats_bullets_beats_name() {
        let resolver = SpecResolver::default();
        let detail = page(
            &[("ram size", "16 GB"), ("item weight", "1.7 Kilograms")],
            Some("Slim 1.65 kg chassis, 14 inch display, Windows 11 Home"),
        );
        let specs = resolver.resolve(NAME, None, Some(&detail));
        assert_eq!(specs.get(Attribute::Ram), Some("16GB"));
        assert_eq!(specs.get(Attribute::Weight), Some("1.7 kg"));
        assert_eq!(specs.get(Attribute::DisplaySize), Some("14.0 inch"));
        assert_eq!(specs.get(Attribute::Os), Some("windows 11"));
        assert_eq!(specs.get(Attribute::Storage), Some("512GB"));
        assert_eq!(specs.get(Attribute::Processor), Some("intel core i3 1215u"));
    }

    #[test]
    fn upgrade_claims_in_bullets_keep_name_capacities() {
        let resolver = SpecResolver::default();
        let name = "HP 15s Intel Core i5 1235U 8GB RAM 512GB SSD";
        let detail = page(
            &[("operating system", "Windows 11 Home")],
            Some("Memory: 8GB DDR4, expandable up to 32 GB RAM; storage upgradable to 1 TB SSD"),
        );
        let specs = resolver.resolve(name, None, Some(&detail));
        assert_eq!(specs.get(Attribute::Ram), Some("8GB"));
        assert_eq!(specs.get(Attribute::Storage), Some("512GB"));

        let product = crate::model::ProductListing {
            site: "Amazon".into(),
            category: "laptop".into(),
            name: name.into(),
            price: "52,990.".into(),
            rating: "4.1 out of 5 stars".into(),
            link: "https://www.amazon.in/hp-15s/dp/B01".into(),
            specifications: specs,
        };
        let requirements = crate::model::Requirements {
            ram: Some("8GB".into()),
            storage: Some("1TB".into()),
            ..Default::default()
        };
        assert!(!crate::analyzer::matches(&product, &requirements));
    }

    #[test]
    fn empty_detail_page_falls_back_to_name() {
        let resolver = SpecResolver::default();
        let specs = resolver.resolve(NAME, None, Some(&DetailPage::default()));
        assert_eq!(specs, resolver.from_name(NAME, None));
    }
}
