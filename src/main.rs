use chrono::Utc;
use futures::future::join_all;
use spec_sniper::analyzer::Aggregator;
use spec_sniper::config::{AppConfig, SourceConfig, load_config};
use spec_sniper::model::{Attribute, ProductListing, Report};
use spec_sniper::parser::for_site;
use spec_sniper::pipeline::Pipeline;
use spec_sniper::scraper::ScraperImpl;
use spec_sniper::storage::JsonStorage;
use tracing::{error, info, warn};

const DEFAULT_CONFIG: &str = "config.json";
const COMBINE_ONLY: &str = "--combine-only";

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let combine_only = args.iter().any(|a| a == COMBINE_ONLY);
    let config_path = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .map(String::as_str)
        .unwrap_or(DEFAULT_CONFIG);

    let config = match load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return;
        }
    };

    let storage = match JsonStorage::new(&config.output_dir) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to initialize storage: {}", e);
            return;
        }
    };

    let results = if combine_only {
        info!("Combining previously saved results");
        load_saved(&config, &storage)
    } else {
        match scrape_all(&config).await {
            Some(results) => {
                for (source, products) in config.sources.iter().zip(&results) {
                    if let Err(e) = storage.save_source_results(source.site, products) {
                        warn!("Failed to save {} results: {}", source.site.name(), e);
                    }
                }
                results
            }
            None => return,
        }
    };

    let recommendations = Aggregator::new(config.top_n).recommend(&results);
    if recommendations.is_empty() {
        warn!("No products matched the requirements");
    }
    for (rank, rec) in recommendations.iter().enumerate() {
        let specs = &rec.product.specifications;
        info!(
            "{}. {} ({}): {} | {} | {}",
            rank + 1,
            rec.product.name,
            rec.product.site,
            rec.product.price,
            rec.category,
            [
                Attribute::Processor,
                Attribute::Ram,
                Attribute::Storage,
                Attribute::DisplaySize,
                Attribute::Resolution,
                Attribute::Weight,
                Attribute::Gpu,
                Attribute::Os,
            ]
            .map(|attr| specs.display(attr))
            .join(", ")
        );
    }

    let report = Report {
        generated_at: Utc::now(),
        query: config.query.clone(),
        recommendations,
    };
    if let Err(e) = storage.save_recommendations(&report) {
        error!("Failed to save recommendations: {}", e);
    }
}

/// Runs every configured source concurrently. `None` when the HTTP client or
/// a page parser cannot be built.
async fn scrape_all(config: &AppConfig) -> Option<Vec<Vec<ProductListing>>> {
    let scraper = match ScraperImpl::new(config.retry.clone()) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return None;
        }
    };
    let pipeline = match Pipeline::new(
        config.query.clone(),
        config.requirements.clone(),
        config.heuristics.clone(),
    ) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to build detail parser: {}", e);
            return None;
        }
    };

    let tasks = config
        .sources
        .iter()
        .map(|source| process_source(&pipeline, &scraper, source));
    Some(join_all(tasks).await)
}

async fn process_source(pipeline: &Pipeline, scraper: &ScraperImpl, source: &SourceConfig) -> Vec<ProductListing> {
    let parser = match for_site(source.site) {
        Ok(p) => p,
        Err(e) => {
            warn!("No listing parser for {}: {}", source.site.name(), e);
            return Vec::new();
        }
    };
    pipeline.process_source(scraper, parser.as_ref(), source).await
}

fn load_saved(config: &AppConfig, storage: &JsonStorage) -> Vec<Vec<ProductListing>> {
    config
        .sources
        .iter()
        .map(|source| {
            storage.load_source_results(source.site).unwrap_or_else(|e| {
                warn!("Failed to load {} results: {}", source.site.name(), e);
                Vec::new()
            })
        })
        .collect()
}
