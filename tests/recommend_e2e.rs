use spec_sniper::analyzer::Aggregator;
use spec_sniper::analyzer::aggregator::categorize;
use spec_sniper::config::parse_config;
use spec_sniper::model::{Category, ProductListing, Site};
use spec_sniper::parser::FieldExtractor;
use std::collections::HashSet;

fn listing(site: &str, name: &str, price: &str, rating: &str) -> ProductListing {
    ProductListing {
        site: site.into(),
        category: "laptop".into(),
        name: name.into(),
        price: price.into(),
        rating: rating.into(),
        link: format!("https://www.example.in/{}", name.len()),
        specifications: FieldExtractor::default().from_name(name, None),
    }
}

fn flipkart() -> Vec<ProductListing> {
    vec![
        listing("Flipkart", "ASUS TUF Gaming F15 Core i5 16 GB/512 GB SSD NVIDIA GeForce RTX 3050 2.3 kg", "₹62,990", "4.5"),
        listing("Flipkart", "HP Victus Gaming Laptop AMD Radeon RX 6500M 16 GB/512 GB SSD", "₹64,990", "4.4"),
        listing("Flipkart", "Lenovo ThinkBook Core i5 16 GB/512 GB SSD Windows 11 1.8 kg", "₹55,990", "4.0"),
    ]
}

fn amazon() -> Vec<ProductListing> {
    vec![
        listing("Amazon", "Acer Swift Go Core i5 16 GB/512 GB SSD 1.2 kg", "₹69,990", "4.1 out of 5 stars"),
        listing("Amazon", "ASUS Vivobook S14 OLED 2.8K Core i5 16 GB/512 GB SSD QHD 1.6 kg", "₹74,990", "3.9 out of 5 stars"),
        listing("Amazon", "ASUS TUF Gaming F15 Core i5 with extra bundle", "₹59,990", "4.8 out of 5 stars"),
        listing("Amazon", "MSI Katana GF63 RTX 4050 16 GB/512 GB SSD 2.25 kg", "₹71,990", "4.6 out of 5 stars"),
    ]
}

#[test]
fn categories_of_fixture_products() {
    let cats: Vec<_> = flipkart()
        .iter()
        .chain(amazon().iter())
        .map(|p| categorize(&p.specifications))
        .collect();
    assert_eq!(
        cats,
        [
            Category::Gaming,
            Category::Gaming,
            Category::Productivity,
            Category::Ultraportable,
            Category::Creator,
            Category::Productivity,
            Category::Gaming,
        ]
    );
}

#[test]
fn top_five_covers_every_category_first() {
    let recs = Aggregator::new(5).recommend(&[flipkart(), amazon()]);
    assert_eq!(recs.len(), 5);

    let names: HashSet<_> = recs.iter().map(|r| r.product.name.as_str()).collect();
    assert!(!names.contains("ASUS TUF Gaming F15 Core i5 with extra bundle"));

    let first_four: HashSet<_> = recs.iter().take(4).map(|r| r.category).collect();
    assert_eq!(first_four.len(), 4);
    assert_eq!(recs[0].category, Category::Gaming);
    assert_eq!(recs[0].product.site, "Flipkart");
}

#[test]
fn small_top_n_still_ranks_by_score_within_diversity() {
    let recs = Aggregator::new(2).recommend(&[flipkart(), amazon()]);
    assert_eq!(recs.len(), 2);
    assert_ne!(recs[0].category, recs[1].category);
    assert!(recs[0].score >= recs[1].score);
}

#[test]
fn default_source_order_keeps_the_flipkart_duplicate() {
    let cfg = parse_config(r#"{"query":"laptop"}"#).unwrap();
    assert_eq!(cfg.sources[0].site, Site::Flipkart);

    let results: Vec<_> = cfg
        .sources
        .iter()
        .map(|source| match source.site {
            Site::Flipkart => flipkart(),
            Site::Amazon => amazon(),
        })
        .collect();
    let recs = Aggregator::new(10).recommend(&results);

    let tuf: Vec<_> = recs
        .iter()
        .filter(|r| r.product.name.starts_with("ASUS TUF Gaming F15"))
        .collect();
    assert_eq!(tuf.len(), 1);
    assert_eq!(tuf[0].product.site, "Flipkart");
    assert_eq!(tuf[0].product.price, "₹62,990");
}
