// Ordered pattern rules; the first rule that produces a value wins

use regex::{Captures, Regex};

/// Turns a regex match into a canonical value. Returning `None` rejects the
/// candidate and lets the rule keep scanning the rest of the text.
pub type Build = fn(&Captures) -> Option<String>;

pub struct Rule {
    pub name: &'static str,
    pattern: Regex,
    build: Build,
}

impl Rule {
    /// Panics on an invalid pattern; rule tables are static and covered by tests.
    pub fn new(name: &'static str, pattern: &str, build: Build) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern)
                .unwrap_or_else(|e| panic!("invalid pattern for rule `{name}`: {e}")),
            build,
        }
    }

    /// First accepted candidate in `text`.
    pub fn apply(&self, text: &str) -> Option<String> {
        self.pattern
            .captures_iter(text)
            .find_map(|caps| (self.build)(&caps))
    }
}

pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Value and name of the first matching rule.
    pub fn first_match(&self, text: &str) -> Option<(&'static str, String)> {
        self.rules
            .iter()
            .find_map(|rule| rule.apply(text).map(|value| (rule.name, value)))
    }

    pub fn extract(&self, text: &str) -> Option<String> {
        self.first_match(text).map(|(_, value)| value)
    }
}

/// Whole match, trimmed.
pub fn whole(caps: &Captures) -> Option<String> {
    let value = caps.get(0)?.as_str().trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// First capture group, trimmed.
pub fn group1(caps: &Captures) -> Option<String> {
    let value = caps.get(1)?.as_str().trim();
    (!value.is_empty()).then(|| value.to_string())
}
