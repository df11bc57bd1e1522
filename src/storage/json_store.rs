use crate::model::{ProductListing, Report, Site, StorageError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const RECOMMENDATIONS_FILE: &str = "recommended_laptops.json";

/// Result files under one output directory.
pub struct JsonStorage {
    dir: PathBuf,
}

impl JsonStorage {
    /// Creates the directory if it does not exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn results_path(&self, site: Site) -> PathBuf {
        self.dir.join(format!("{}_results.json", site.slug()))
    }

    pub fn recommendations_path(&self) -> PathBuf {
        self.dir.join(RECOMMENDATIONS_FILE)
    }

    pub fn save_source_results(&self, site: Site, products: &[ProductListing]) -> Result<(), StorageError> {
        let path = self.results_path(site);
        write_json(&path, products)?;
        info!(site = site.name(), count = products.len(), path = %path.display(), "saved source results");
        Ok(())
    }

    /// Previously saved results; a missing file yields an empty list.
    pub fn load_source_results(&self, site: Site) -> Result<Vec<ProductListing>, StorageError> {
        let path = self.results_path(site);
        if !path.exists() {
            warn!(path = %path.display(), "no saved results");
            return Ok(Vec::new());
        }
        read_json(&path)
    }

    pub fn save_recommendations(&self, report: &Report) -> Result<(), StorageError> {
        let path = self.recommendations_path();
        write_json(&path, report)?;
        info!(count = report.recommendations.len(), path = %path.display(), "saved recommendations");
        Ok(())
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
