pub mod detail;
pub mod extractor;
pub mod fields;
pub mod listing;
pub mod rules;

pub use detail::{DetailPage, DetailParser};
pub use extractor::FieldExtractor;
pub use listing::{AmazonParser, FlipkartParser, ListingParser, RawListing, for_site};
