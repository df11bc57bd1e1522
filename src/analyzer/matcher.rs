// Two-tier requirement matching: hard constraints reject on missing evidence,
// soft preferences are skipped when the product does not state them.
use crate::model::{Attribute, ProductListing, Requirements};
use crate::normalizer::{Capacity, first_number, parse_price};
use thiserror::Error;
use tracing::debug;

pub const HARD_TIER: [Attribute; 3] = [Attribute::Processor, Attribute::Ram, Attribute::Storage];
pub const SOFT_TIER: [Attribute; 4] = [
    Attribute::Weight,
    Attribute::Gpu,
    Attribute::Os,
    Attribute::Resolution,
];

/// Why a listing failed its requirement set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("price {price} exceeds max_price {max}")]
    OverBudget { price: f64, max: f64 },
    #[error("price {0:?} is not a number")]
    UnparseablePrice(String),
    #[error("{0} is required but unknown")]
    MissingHard(Attribute),
    #[error("{attr} {actual:?} does not contain {required:?}")]
    NotContained {
        attr: Attribute,
        actual: String,
        required: String,
    },
    #[error("{attr} {actual:?} is below {required:?}")]
    TooSmall {
        attr: Attribute,
        actual: String,
        required: String,
    },
    #[error("{attr} {actual:?} cannot be compared with {required:?}")]
    Unparseable {
        attr: Attribute,
        actual: String,
        required: String,
    },
    #[error("weight {actual:?} exceeds {required:?}")]
    TooHeavy { actual: String, required: String },
}

pub struct RequirementMatcher {
    requirements: Requirements,
}

impl RequirementMatcher {
    pub fn new(requirements: Requirements) -> Self {
        Self { requirements }
    }

    /// Price first, then the hard tier, then the soft tier.
    pub fn check(&self, product: &ProductListing) -> Result<(), Rejection> {
        self.check_price(&product.price)?;

        let specs = &product.specifications;
        for attr in HARD_TIER {
            let Some(required) = self.requirements.get(attr) else {
                continue;
            };
            let actual = specs.get(attr).ok_or(Rejection::MissingHard(attr))?;
            match attr {
                Attribute::Processor => contains(attr, actual, required)?,
                _ => at_least(attr, actual, required)?,
            }
        }

        for attr in SOFT_TIER {
            let (Some(required), Some(actual)) = (self.requirements.get(attr), specs.get(attr)) else {
                continue;
            };
            match attr {
                Attribute::Weight => at_most(actual, required)?,
                _ => contains(attr, actual, required)?,
            }
        }
        Ok(())
    }

    pub fn matches(&self, product: &ProductListing) -> bool {
        match self.check(product) {
            Ok(()) => true,
            Err(reason) => {
                debug!(name = product.name.as_str(), %reason, "rejected");
                false
            }
        }
    }

    fn check_price(&self, price: &str) -> Result<(), Rejection> {
        let value = parse_price(price).ok_or_else(|| Rejection::UnparseablePrice(price.to_string()))?;
        match self.requirements.max_price {
            Some(max) if value > max => Err(Rejection::OverBudget { price: value, max }),
            _ => Ok(()),
        }
    }
}

pub fn matches(product: &ProductListing, requirements: &Requirements) -> bool {
    RequirementMatcher::new(requirements.clone()).matches(product)
}

fn contains(attr: Attribute, actual: &str, required: &str) -> Result<(), Rejection> {
    if actual.to_lowercase().contains(&required.to_lowercase()) {
        Ok(())
    } else {
        Err(Rejection::NotContained {
            attr,
            actual: actual.to_string(),
            required: required.to_string(),
        })
    }
}

fn at_least(attr: Attribute, actual: &str, required: &str) -> Result<(), Rejection> {
    let (Some(have), Some(need)) = (Capacity::parse(actual), Capacity::parse(required)) else {
        return Err(Rejection::Unparseable {
            attr,
            actual: actual.to_string(),
            required: required.to_string(),
        });
    };
    if have.as_gb() < need.as_gb() {
        return Err(Rejection::TooSmall {
            attr,
            actual: actual.to_string(),
            required: required.to_string(),
        });
    }
    Ok(())
}

fn at_most(actual: &str, required: &str) -> Result<(), Rejection> {
    let (Some(have), Some(limit)) = (first_number(actual), first_number(required)) else {
        return Err(Rejection::Unparseable {
            attr: Attribute::Weight,
            actual: actual.to_string(),
            required: required.to_string(),
        });
    };
    if have > limit {
        return Err(Rejection::TooHeavy {
            actual: actual.to_string(),
            required: required.to_string(),
        });
    }
    Ok(())
}
