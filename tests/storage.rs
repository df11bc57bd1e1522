use chrono::Utc;
use spec_sniper::model::{Attribute, Category, ProductListing, Recommendation, Report, Site, SpecRecord};
use spec_sniper::storage::JsonStorage;
use std::fs;
use tempfile::tempdir;

fn product() -> ProductListing {
    let mut specs = SpecRecord::default();
    specs.set(Attribute::Ram, "16GB");
    specs.set(Attribute::Storage, "512GB");
    ProductListing {
        site: "Flipkart".into(),
        category: "laptop".into(),
        name: "HP 15s Core i5".into(),
        price: "₹52,990".into(),
        rating: "4.2".into(),
        link: "https://www.flipkart.com/hp-15s/p/itm1".into(),
        specifications: specs,
    }
}

#[test]
fn source_results_survive_a_round_trip() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::new(dir.path()).unwrap();
    storage.save_source_results(Site::Flipkart, &[product()]).unwrap();

    assert!(dir.path().join("flipkart_results.json").exists());
    let loaded = storage.load_source_results(Site::Flipkart).unwrap();
    assert_eq!(loaded, vec![product()]);

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(storage.results_path(Site::Flipkart)).unwrap()).unwrap();
    assert_eq!(raw[0]["specifications"]["ssd"], "512GB");
    assert_eq!(raw[0]["specifications"]["gpu"], "unknown");
}

#[test]
fn missing_results_file_loads_empty() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::new(dir.path()).unwrap();
    assert!(storage.load_source_results(Site::Amazon).unwrap().is_empty());
}

#[test]
fn report_pairs_products_with_categories() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::new(dir.path()).unwrap();
    let report = Report {
        generated_at: Utc::now(),
        query: "laptop".into(),
        recommendations: vec![Recommendation {
            product: product(),
            category: Category::Productivity,
            score: 15.7,
        }],
    };
    storage.save_recommendations(&report).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("recommended_laptops.json")).unwrap()).unwrap();
    let entry = &raw["recommendations"][0];
    assert_eq!(entry["product"]["name"], "HP 15s Core i5");
    assert_eq!(entry["product"]["category"], "laptop");
    assert_eq!(entry["category"], "Productivity");
    assert_eq!(raw["query"], "laptop");
}
