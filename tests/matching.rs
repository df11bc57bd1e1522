use spec_sniper::analyzer::{Rejection, RequirementMatcher, matches};
use spec_sniper::model::{Attribute, ProductListing, Requirements, SpecRecord};
use spec_sniper::parser::FieldExtractor;

fn listing(name: &str, price: &str, specs: SpecRecord) -> ProductListing {
    ProductListing {
        site: "Amazon".into(),
        category: "laptop".into(),
        name: name.into(),
        price: price.into(),
        rating: "4.3 out of 5 stars".into(),
        link: "https://www.amazon.in/dp/B0TEST".into(),
        specifications: specs,
    }
}

fn record(pairs: &[(Attribute, &str)]) -> SpecRecord {
    let mut specs = SpecRecord::default();
    for (attr, value) in pairs {
        specs.set(*attr, *value);
    }
    specs
}

fn requirements(json: &str) -> Requirements {
    serde_json::from_str(json).unwrap()
}

#[test]
fn processor_substring_match() {
    let req = requirements(r#"{"processor": "i5"}"#);
    let product = listing("x", "50000", record(&[(Attribute::Processor, "Intel Core i5-1135G7")]));
    assert!(matches(&product, &req));
}

#[test]
fn ram_and_storage_hard_tier() {
    let ram = requirements(r#"{"ram": "16GB"}"#);
    assert!(!matches(&listing("x", "1", record(&[(Attribute::Ram, "8GB")])), &ram));

    let storage = requirements(r#"{"ssd": "512GB"}"#);
    assert!(matches(&listing("x", "1", record(&[(Attribute::Storage, "1TB")])), &storage));
}

#[test]
fn soft_tier_unknown_is_not_a_rejection() {
    let req = requirements(r#"{"gpu": "rtx", "os": "windows", "resolution": "fhd"}"#);
    assert!(matches(&listing("x", "1", SpecRecord::default()), &req));
}

#[test]
fn soft_tier_mismatch_rejects() {
    let req = requirements(r#"{"resolution": "qhd"}"#);
    let product = listing("x", "1", record(&[(Attribute::Resolution, "FHD")]));
    assert!(matches!(
        RequirementMatcher::new(req).check(&product),
        Err(Rejection::NotContained { attr: Attribute::Resolution, .. })
    ));
}

#[test]
fn numeric_requirement_values() {
    let req = requirements(r#"{"weight": 1.5, "max_price": 70000}"#);
    let light = listing("x", "₹69,990", record(&[(Attribute::Weight, "1.4 kg")]));
    let heavy = listing("x", "₹69,990", record(&[(Attribute::Weight, "2.1 kg")]));
    let pricey = listing("x", "₹79,990", record(&[(Attribute::Weight, "1.4 kg")]));
    assert!(matches(&light, &req));
    assert!(!matches(&heavy, &req));
    assert!(!matches(&pricey, &req));
}

#[test]
fn extracted_name_feeds_the_matcher() {
    let name = "Lenovo IdeaPad Slim 3 Intel Core i5 12th Gen 1235U - (16 GB/512 GB SSD/Windows 11 Home) 15.6 inch 1.63 kg";
    let specs = FieldExtractor::default().from_name(name, None);
    let product = listing(name, "₹56,990", specs);
    let req = requirements(
        r#"{"processor": "i5", "ram": "16GB", "ssd": "512GB", "os": "windows 11", "weight": "1.8", "max_price": 60000}"#,
    );
    assert_eq!(RequirementMatcher::new(req).check(&product), Ok(()));
}
