// Per-attribute extraction rules over lower-cased listing text

use super::rules::{Rule, RuleTable, group1, whole};
use crate::normalizer::{format_capacity, format_inches, format_kg, length_to_inches, round1};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Plausible laptop screen range used to gate the display fallbacks.
pub const SCREEN_INCHES: std::ops::RangeInclusive<f64> = 12.0..=17.0;

const GEN: &str = r"(?:\s*\d{1,2}(?:th)?\s*gen)?";
const MODEL_NO: &str = r"[\s-]*\d{4,5}[a-z]{0,2}\d?";

static PROCESSOR: LazyLock<RuleTable> = LazyLock::new(|| {
    RuleTable::new(vec![
        Rule::new(
            "vendor-tier",
            &format!(
                r"(?:intel\s*core\s*(?:i[3-9]|ultra\s*[5-9])|amd\s*ryzen\s*[3-9]|snapdragon|apple\s*m[1-4]){GEN}(?:{MODEL_NO})?"
            ),
            processor_value,
        ),
        Rule::new(
            "tier-model",
            &format!(r"\b(?:core\s*)?i[3-9]{GEN}{MODEL_NO}"),
            processor_value,
        ),
        Rule::new("core-tier", &format!(r"\bcore\s*i[3-9]{GEN}"), processor_value),
    ])
});

static RAM: LazyLock<RuleTable> = LazyLock::new(|| {
    RuleTable::new(vec![
        Rule::new(
            "labelled",
            r"\b(\d{1,3})\s*gb\s*(?:ram|lpddr\d*x?|ddr\d*|\(ram\)|unified\s*memory|memory)",
            gigabytes,
        ),
        Rule::new(
            "boundary",
            r"\b(\d{1,2})\s*gb(?:$|[/,)|-]|\s+([a-z0-9.]*))",
            unlabelled_ram,
        ),
    ])
});

static STORAGE: LazyLock<RuleTable> = LazyLock::new(|| {
    RuleTable::new(vec![
        Rule::new(
            "labelled",
            r"\b(\d{1,4})\s*(gb|tb)\s*(?:(?:pcie|nvme|m\.2)\s*)*(?:ssd|hdd|emmc|ufs|storage)",
            capacity,
        ),
        Rule::new("terabytes", r"\b([1-8])\s*(tb)\b", capacity),
        Rule::new("drive-size", r"\b(128|256|512|1024|2048)\s*(gb)\b", capacity),
    ])
});

static DISPLAY: LazyLock<RuleTable> = LazyLock::new(|| {
    RuleTable::new(vec![
        Rule::new(
            "unit",
            r#"\b(\d{1,2}(?:\.\d{1,2})?)\s*-?\s*(inch(?:es)?|cm|centimet(?:er|re)s?|"|''|”)"#,
            length,
        ),
        Rule::new(
            "model-suffix",
            r"(?:^|[^\d.])(\d{1,2}(?:\.\d)?)\s*(?:g\d+|evo|plus|pro|thin|light|laptop|modern|firefly|victus|inspiron|inbook|pavilion|\.\.\.)",
            screen_in_range,
        ),
        Rule::new(
            "model-prefix",
            r"(?:victus|inspiron|inbook|pavilion|vivobook|ideapad|zenbook|thinkbook|aspire|nitro|omen|envy)\s*(\d{1,2}(?:\.\d)?)(?:$|[^\d.])",
            screen_in_range,
        ),
    ])
});

static DISPLAY_STRICT: LazyLock<RuleTable> = LazyLock::new(|| {
    RuleTable::new(vec![Rule::new(
        "unit-display",
        r"(\d{1,2}(?:\.\d{1,2})?)\s*(inch(?:es)?|cm)\s*(?:\([^)]*\)\s*)?(?:display|screen)",
        length,
    )])
});

static DISPLAY_LINK: LazyLock<RuleTable> = LazyLock::new(|| {
    RuleTable::new(vec![Rule::new(
        "model-code",
        r"(?:/|-)(\d{1,2}(?:\.\d)?)(?:-fa|-eh|-nbc|-inbook|-inspiron|-dy|-ey)",
        screen_in_range,
    )])
});

static GPU: LazyLock<RuleTable> = LazyLock::new(|| {
    RuleTable::new(vec![
        Rule::new(
            "geforce-model",
            r"(?:nvidia\s*)?(?:geforce\s*)?(?:rtx|gtx)\s*\d{3,4}(?:\s*ti)?",
            whole,
        ),
        Rule::new(
            "vendor",
            r"nvidia\s*geforce|amd\s*radeon(?:\s*rx\s*\d{3,4}[a-z]{0,2})?|intel\s*arc|iris\s*xe|adreno|\brtx\b",
            whole,
        ),
        Rule::new(
            "dedicated-memory",
            r"\b(\d{1,2})\s*gb\s*(?:dedicated\s*)?(?:graphics|gddr\d|vram)",
            |caps| Some(format!("{}GB graphics", &caps[1])),
        ),
        Rule::new("integrated", r"integrated", |_| Some("Integrated".to_string())),
    ])
});

static OS: LazyLock<RuleTable> = LazyLock::new(|| {
    RuleTable::new(vec![Rule::new(
        "os",
        r"\b(windows(?:\s*\d+)?|win\s*\d+|mac\s*os|macos|chrome\s*os|jioos)",
        |caps| group1(caps).map(|raw| normalize_os(&raw)),
    )])
});

static WEIGHT: LazyLock<RuleTable> = LazyLock::new(|| {
    RuleTable::new(vec![Rule::new(
        "kilograms",
        r"(\d+(?:\.\d+)?)\s*kgs?\b",
        |caps| caps[1].parse().ok().map(format_kg),
    )])
});

static RESOLUTION: LazyLock<RuleTable> = LazyLock::new(|| {
    RuleTable::new(vec![Rule::new(
        "panel",
        r"\b(fhd|wuxga|qhd|2k|4k|\d{3,4}\s*x\s*\d{3,4})\b",
        |caps| group1(caps).map(|r| r.replace(char::is_whitespace, "").to_uppercase()),
    )])
});

static BATTERY: LazyLock<RuleTable> = LazyLock::new(|| {
    RuleTable::new(vec![Rule::new(
        "hours",
        r"\b(\d{1,2}(?:\.\d)?)\s*(?:hours?|hrs?)\b",
        |caps| Some(format!("{} Hours", &caps[1])),
    )])
});

static REFRESH_RATE: LazyLock<RuleTable> = LazyLock::new(|| {
    RuleTable::new(vec![Rule::new(
        "hertz",
        r"\b(\d{2,3})\s*hz\b",
        |caps| Some(format!("{}Hz", &caps[1])),
    )])
});

static WINDOWS_TWICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"windows\s*windows").unwrap());
static WINDOWS_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^windows\s*(\d+)$").unwrap());
static HIGH_REFRESH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"144\s*hz").unwrap());

fn processor_value(caps: &Captures) -> Option<String> {
    let value = caps.get(0)?.as_str().trim().trim_end_matches('-').trim_end();
    (!value.is_empty()).then(|| value.to_string())
}

fn gigabytes(caps: &Captures) -> Option<String> {
    Some(format!("{}GB", &caps[1]))
}

fn unlabelled_ram(caps: &Captures) -> Option<String> {
    let next = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    let storage_or_vram = [
        "ssd", "hdd", "emmc", "ufs", "storage", "graphics", "dedicated", "vram", "nvme", "pcie",
    ]
    .iter()
    .any(|w| next.starts_with(*w))
        || next.starts_with("gddr");
    (!storage_or_vram).then(|| format!("{}GB", &caps[1]))
}

fn capacity(caps: &Captures) -> Option<String> {
    Some(format_capacity(&caps[1], &caps[2]))
}

fn length(caps: &Captures) -> Option<String> {
    let amount: f64 = caps[1].parse().ok()?;
    length_to_inches(amount, &caps[2]).map(format_inches)
}

fn screen_in_range(caps: &Captures) -> Option<String> {
    let size: f64 = caps[1].parse().ok()?;
    SCREEN_INCHES.contains(&size).then(|| format_inches(round1(size)))
}

/// Maps `win` to `windows`, collapses repeated `windows` and normalizes
/// version spacing (`windows11` → `windows 11`).
pub fn normalize_os(raw: &str) -> String {
    let mut value = raw.trim().to_lowercase();
    if value.starts_with("win") && !value.starts_with("windows") {
        value = value.replacen("win", "windows", 1);
    }
    value = WINDOWS_TWICE.replace_all(&value, "windows").into_owned();
    if let Some(caps) = WINDOWS_VERSION.captures(&value) {
        return format!("windows {}", &caps[1]);
    }
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn processor(text: &str) -> Option<String> {
    PROCESSOR.extract(text)
}

pub fn ram(text: &str) -> Option<String> {
    RAM.extract(text)
}

pub fn storage(text: &str) -> Option<String> {
    STORAGE.extract(text)
}

/// Unit-tagged size first, then the model-token fallbacks gated to [12, 17].
pub fn display_size(text: &str) -> Option<String> {
    DISPLAY.extract(text)
}

/// Only sizes explicitly followed by "display" or "screen".
pub fn display_size_strict(text: &str) -> Option<String> {
    DISPLAY_STRICT.extract(text)
}

pub fn display_size_from_link(link: &str) -> Option<String> {
    DISPLAY_LINK.extract(&link.to_lowercase())
}

pub fn gpu(text: &str) -> Option<String> {
    GPU.extract(text)
}

/// Operating system without any default for a bare "windows".
pub fn os(text: &str) -> Option<String> {
    let text = WINDOWS_TWICE.replace_all(text, "windows");
    OS.extract(&text)
}

pub fn weight(text: &str) -> Option<String> {
    WEIGHT.extract(text)
}

/// Panel resolution. With `downgrade_4k_at_144hz`, a `4K` match in text that
/// also mentions 144Hz resolves to `FHD`.
pub fn resolution(text: &str, downgrade_4k_at_144hz: bool) -> Option<String> {
    let value = RESOLUTION.extract(text)?;
    if downgrade_4k_at_144hz && value == "4K" && HIGH_REFRESH.is_match(text) {
        return Some("FHD".to_string());
    }
    Some(value)
}

pub fn battery(text: &str) -> Option<String> {
    BATTERY.extract(text)
}

pub fn refresh_rate(text: &str) -> Option<String> {
    REFRESH_RATE.extract(text)
}
