// Utility functions
use rand::Rng;
use std::time::Duration;

/// Uniformly random duration in `[min_ms, max_ms]`.
pub fn jitter(min_ms: u64, max_ms: u64) -> Duration {
    let (lo, hi) = if min_ms <= max_ms { (min_ms, max_ms) } else { (max_ms, min_ms) };
    if lo == hi {
        return Duration::from_millis(lo);
    }
    Duration::from_millis(rand::rng().random_range(lo..=hi))
}

/// Search query as used in listing URLs (`laptop 16gb` → `laptop+16gb`).
pub fn to_query_param(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join("+")
}

/// Collapses whitespace runs into single spaces and trims.
pub fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitter_stays_in_range() {
        for _ in 0..50 {
            let d = jitter(10, 20);
            assert!(d >= Duration::from_millis(10) && d <= Duration::from_millis(20));
        }
        assert_eq!(jitter(5, 5), Duration::from_millis(5));
        assert!(jitter(20, 10) <= Duration::from_millis(20));
    }

    #[test]
    fn query_and_whitespace_helpers() {
        assert_eq!(to_query_param(" laptop  with i5 "), "laptop+with+i5");
        assert_eq!(squash_whitespace(" Item\n  Weight \t"), "Item Weight");
    }
}
