// Builds specification records from one evidence source at a time.
use super::fields;
use crate::config::Heuristics;
use crate::model::{Attribute, SpecRecord};
use crate::normalizer::{format_capacity, format_inches, format_kg, length_to_inches};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static FIELD_GB: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*gb").unwrap());
static FIELD_CAPACITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(gb|tb)").unwrap());
static FIELD_LENGTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(inch(?:es)?|cm|centimet(?:er|re)s?)").unwrap()
});
static FIELD_KG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*(?:kg|kilograms?)\b").unwrap());
static FIELD_HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*hours?").unwrap());

type FieldRule = fn(&str, &str) -> Option<String>;

/// Detail-page labels, checked in order; the first label rule whose any
/// fragment appears in the row label decides the attribute.
const LABELS: &[(&[&str], Attribute, FieldRule)] = &[
    (&["processor type"], Attribute::Processor, processor_field),
    (&["graphics card description", "graphics coprocessor"], Attribute::Gpu, gpu_field),
    (&["graphics card ram"], Attribute::Gpu, gpu_memory_field),
    (&["ram size", "memory technology"], Attribute::Ram, ram_field),
    (&["hard drive size", "hard disk description"], Attribute::Storage, storage_field),
    (&["standing screen display size"], Attribute::DisplaySize, display_field),
    (&["operating system"], Attribute::Os, os_field),
    (&["item weight"], Attribute::Weight, weight_field),
    (&["average battery life"], Attribute::Battery, battery_field),
    (&["refresh rate"], Attribute::RefreshRate, refresh_field),
    (&["resolution"], Attribute::Resolution, resolution_field),
];

pub struct FieldExtractor {
    heuristics: Heuristics,
}

impl FieldExtractor {
    pub fn new(heuristics: Heuristics) -> Self {
        Self { heuristics }
    }

    /// Weakest evidence: the listing title, with the link as a last resort
    /// for the display size.
    pub fn from_name(&self, name: &str, link: Option<&str>) -> SpecRecord {
        let text = name.to_lowercase();
        let mut specs = self.common(&text);

        if let Some(size) = fields::display_size(&text)
            .or_else(|| link.and_then(fields::display_size_from_link))
        {
            specs.set(Attribute::DisplaySize, size);
        }
        if let Some(os) = fields::os(&text) {
            let os = match &self.heuristics.bare_windows_as {
                Some(default) if os == "windows" => default.clone(),
                _ => os,
            };
            specs.set(Attribute::Os, os);
        }

        debug!(name, known = specs.known_count(), "extracted specs from name");
        specs
    }

    /// Feature bullet text: display size, OS, weight and resolution only.
    /// Capacities and chips in bullets are often upgrade limits.
    pub fn from_bullets(&self, text: &str) -> SpecRecord {
        let text = text.to_lowercase();
        let mut specs = SpecRecord::default();
        let extracted = [
            (Attribute::DisplaySize, fields::display_size_strict(&text)),
            (Attribute::Os, fields::os(&text)),
            (Attribute::Weight, fields::weight(&text)),
            (Attribute::Resolution, fields::resolution(&text, false)),
        ];
        for (attr, value) in extracted {
            if let Some(value) = value {
                specs.set(attr, value);
            }
        }
        specs
    }

    /// Structured `(label, value)` rows. The first row yielding a value for an
    /// attribute wins.
    pub fn from_fields(&self, rows: &[(String, String)]) -> SpecRecord {
        let mut specs = SpecRecord::default();
        for (label, value) in rows {
            if let Some((attr, extracted)) = self.field(label, value) {
                if specs.fill(attr, extracted.as_str()) {
                    debug!(%attr, label = label.as_str(), value = extracted.as_str(), "spec from detail field");
                }
            }
        }
        specs
    }

    /// Extracts a single labelled field, or `None` for labels outside the table
    /// and values without a recognizable pattern.
    pub fn field(&self, label: &str, value: &str) -> Option<(Attribute, String)> {
        let label = label.trim().to_lowercase();
        let (_, attr, rule) = LABELS
            .iter()
            .find(|(fragments, _, _)| fragments.iter().any(|f| label.contains(*f)))?;
        rule(value.trim(), &value.to_lowercase()).map(|v| (*attr, v))
    }

    fn common(&self, text: &str) -> SpecRecord {
        let mut specs = SpecRecord::default();
        let extracted = [
            (Attribute::Processor, fields::processor(text)),
            (Attribute::Ram, fields::ram(text)),
            (Attribute::Storage, fields::storage(text)),
            (Attribute::Gpu, fields::gpu(text)),
            (Attribute::Weight, fields::weight(text)),
            (Attribute::Battery, fields::battery(text)),
            (Attribute::RefreshRate, fields::refresh_rate(text)),
            (
                Attribute::Resolution,
                fields::resolution(text, self.heuristics.downgrade_4k_at_144hz),
            ),
        ];
        for (attr, value) in extracted {
            if let Some(value) = value {
                specs.set(attr, value);
            }
        }
        specs
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(Heuristics::default())
    }
}

fn processor_field(raw: &str, _lower: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_string())
}

fn ram_field(_raw: &str, lower: &str) -> Option<String> {
    FIELD_GB.captures(lower).map(|c| format!("{}GB", &c[1]))
}

fn storage_field(_raw: &str, lower: &str) -> Option<String> {
    FIELD_CAPACITY
        .captures(lower)
        .map(|c| format_capacity(&c[1], &c[2]))
}

fn display_field(_raw: &str, lower: &str) -> Option<String> {
    let caps = FIELD_LENGTH.captures(lower)?;
    let amount: f64 = caps[1].parse().ok()?;
    length_to_inches(amount, &caps[2]).map(format_inches)
}

fn gpu_field(_raw: &str, lower: &str) -> Option<String> {
    if lower.contains("integrated") {
        return Some("Integrated".to_string());
    }
    fields::gpu(lower)
}

fn gpu_memory_field(_raw: &str, lower: &str) -> Option<String> {
    FIELD_GB.captures(lower).map(|c| format!("{}GB graphics", &c[1]))
}

fn os_field(_raw: &str, lower: &str) -> Option<String> {
    fields::os(lower)
}

fn weight_field(_raw: &str, lower: &str) -> Option<String> {
    let caps = FIELD_KG.captures(lower)?;
    caps[1].parse().ok().map(format_kg)
}

fn battery_field(_raw: &str, lower: &str) -> Option<String> {
    FIELD_HOURS
        .captures(lower)
        .map(|c| format!("{} Hours", &c[1]))
}

fn refresh_field(_raw: &str, lower: &str) -> Option<String> {
    fields::refresh_rate(lower)
}

fn resolution_field(_raw: &str, lower: &str) -> Option<String> {
    fields::resolution(lower, false)
}
