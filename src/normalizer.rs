// Unit normalization for capacities, lengths, masses, prices and ratings

use regex::Regex;
use std::sync::LazyLock;

pub const GB_PER_TB: f64 = 1000.0;
pub const CM_PER_INCH: f64 = 2.54;

static CAPACITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(gb|tb)").unwrap());
static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityUnit {
    Gb,
    Tb,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capacity {
    pub amount: f64,
    pub unit: CapacityUnit,
}

impl Capacity {
    /// Finds the first `<number> GB|TB` in `text`.
    pub fn parse(text: &str) -> Option<Self> {
        let caps = CAPACITY.captures(text)?;
        let amount = caps[1].parse().ok()?;
        let unit = match caps[2].to_ascii_lowercase().as_str() {
            "tb" => CapacityUnit::Tb,
            _ => CapacityUnit::Gb,
        };
        Some(Self { amount, unit })
    }

    pub fn as_gb(&self) -> f64 {
        match self.unit {
            CapacityUnit::Gb => self.amount,
            CapacityUnit::Tb => self.amount * GB_PER_TB,
        }
    }
}

/// Formats a capacity as `<digits><UNIT>` (e.g. `512GB`, `1TB`).
pub fn format_capacity(digits: &str, unit: &str) -> String {
    format!("{}{}", digits.trim(), unit.trim().to_ascii_uppercase())
}

pub fn cm_to_inches(cm: f64) -> f64 {
    round1(cm / CM_PER_INCH)
}

/// Converts `<amount> <unit>` to inches. Accepts inch, inches, `"` and cm/centimetre(s).
pub fn length_to_inches(amount: f64, unit: &str) -> Option<f64> {
    let unit = unit.trim().to_ascii_lowercase();
    if unit.starts_with("cm") || unit.starts_with("centimet") {
        Some(cm_to_inches(amount))
    } else if unit.contains("inch") || unit.contains('"') || unit.contains('\'') || unit.contains('”') {
        Some(round1(amount))
    } else {
        None
    }
}

pub fn format_inches(inches: f64) -> String {
    format!("{:.1} inch", inches)
}

pub fn format_kg(kg: f64) -> String {
    format!("{} kg", format_float(kg))
}

/// Extracts the kilogram value from a canonical weight string such as `1.65 kg`.
/// Anything that is not a plain number followed by `kg` yields `None`.
pub fn parse_kg(text: &str) -> Option<f64> {
    let text = text.trim().to_ascii_lowercase();
    let number = text.strip_suffix("kg").unwrap_or(&text).trim();
    number.parse().ok()
}

/// First number appearing anywhere in `text`.
pub fn first_number(text: &str) -> Option<f64> {
    NUMBER.find(text).and_then(|m| m.as_str().parse().ok())
}

/// Parses listing price text such as `₹54,990` or `54,990.`.
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .trim_start_matches(|c: char| !c.is_ascii_digit())
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let cleaned = cleaned.trim().trim_end_matches('.');
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Parses a rating such as `4.3` or `4.3 out of 5 stars`.
pub fn parse_rating(text: &str) -> Option<f64> {
    text.split_whitespace()
        .next()
        .and_then(|token| token.parse::<f64>().ok())
        .filter(|r| r.is_finite())
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Renders a float with at least one decimal place (`2` → `2.0`, `1.65` → `1.65`).
pub fn format_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_terabytes_are_thousand_gigabytes() {
        let tb = Capacity::parse("1TB").unwrap();
        let gb = Capacity::parse("1000 gb").unwrap();
        assert_eq!(tb.unit, CapacityUnit::Tb);
        assert_eq!(tb.as_gb(), gb.as_gb());
        assert!(Capacity::parse("2 tb").unwrap().as_gb() > Capacity::parse("1024GB").unwrap().as_gb());
    }

    #[test]
    fn capacity_rejects_other_units() {
        assert!(Capacity::parse("512 MB").is_none());
        assert!(Capacity::parse("unknown").is_none());
    }

    #[test]
    fn centimetres_convert_to_one_decimal_inch() {
        assert_eq!(cm_to_inches(39.6), 15.6);
        assert_eq!(cm_to_inches(35.56), 14.0);
        assert_eq!(length_to_inches(33.78, "cm"), Some(13.3));
        assert_eq!(length_to_inches(15.6, "inches"), Some(15.6));
        assert_eq!(length_to_inches(15.6, "mm"), None);
        assert_eq!(format_inches(14.0), "14.0 inch");
    }

    #[test]
    fn kilograms_format_and_parse() {
        assert_eq!(format_kg(1.65), "1.65 kg");
        assert_eq!(format_kg(2.0), "2.0 kg");
        assert_eq!(parse_kg("1.65 kg"), Some(1.65));
        assert_eq!(parse_kg("1.8"), Some(1.8));
        assert_eq!(parse_kg("unknown"), None);
    }

    #[test]
    fn prices_strip_currency_and_separators() {
        assert_eq!(parse_price("₹54,990"), Some(54990.0));
        assert_eq!(parse_price("54,990."), Some(54990.0));
        assert_eq!(parse_price(" ₹1,09,990.00 "), Some(109990.0));
        assert_eq!(parse_price("N/A"), None);
        assert_eq!(parse_price(""), None);
    }

    #[test]
    fn ratings_take_leading_number() {
        assert_eq!(parse_rating("4.3 out of 5 stars"), Some(4.3));
        assert_eq!(parse_rating("4.1"), Some(4.1));
        assert_eq!(parse_rating("N/A"), None);
        assert_eq!(parse_rating(""), None);
    }
}
