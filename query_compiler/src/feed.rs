//! Price feed loading and fetching
//!
//! A league's prices come as one JSON file per item kind. Lines that fail to
//! parse are dropped; an entry missing from the feed is simply unpriced.

use crate::error::{QueryError, Result};
use search_common::{by_value_desc, CategoryCatalog, PricedEntry};
use serde::Deserialize;
use std::path::Path;

/// Item kinds published per league
pub const FEED_KINDS: [&str; 4] = ["Accessory", "Armour", "Jewel", "Weapon"];

/// League used when none is given
pub const DEFAULT_LEAGUE: &str = "Sanctum";

/// File name of one feed kind, e.g. `eco_Sanctum_UniqueArmour.json`
pub fn feed_file_name(league: &str, kind: &str) -> String {
    format!("eco_{league}_Unique{kind}.json")
}

#[derive(Debug, Deserialize)]
struct FeedFile {
    #[serde(default)]
    lines: Vec<serde_json::Value>,
}

/// Priced entries in feed order
#[derive(Debug, Clone, Default)]
pub struct PriceFeed {
    entries: Vec<PricedEntry>,
}

impl PriceFeed {
    pub fn from_entries(entries: Vec<PricedEntry>) -> Self {
        Self { entries }
    }

    /// Parse one feed document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: FeedFile = serde_json::from_str(json)?;
        let total = file.lines.len();

        let entries: Vec<PricedEntry> = file
            .lines
            .into_iter()
            .filter_map(|line| match serde_json::from_value::<PricedEntry>(line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::debug!("Skipping malformed feed line: {}", e);
                    None
                }
            })
            .collect();

        if entries.len() < total {
            log::warn!("Dropped {} malformed feed lines", total - entries.len());
        }
        Ok(Self { entries })
    }

    /// Load one feed file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading price feed from: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let feed = Self::from_json_str(&content)?;

        log::info!("Loaded {} price entries", feed.len());
        Ok(feed)
    }

    /// Load every feed kind of `league` from `dir`. Missing kinds are skipped.
    pub fn load_dir<P: AsRef<Path>>(dir: P, league: &str) -> Result<Self> {
        let dir = dir.as_ref();
        let mut feed = Self::default();

        for kind in FEED_KINDS {
            let path = dir.join(feed_file_name(league, kind));
            if !path.exists() {
                log::warn!("No {} feed at {}, skipping", kind, path.display());
                continue;
            }
            feed.extend(Self::load(&path)?);
        }

        Ok(feed)
    }

    /// Fetch every feed kind of `league` below `base_url`
    pub async fn fetch(base_url: &str, league: &str) -> Result<Self> {
        let client = reqwest::Client::new();
        let mut feed = Self::default();

        for kind in FEED_KINDS {
            let url = format!(
                "{}/{}",
                base_url.trim_end_matches('/'),
                feed_file_name(league, kind)
            );
            log::info!("Fetching {} prices from {}...", kind, url);

            let response = client
                .get(&url)
                .header("User-Agent", "query_compiler/1.0")
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(QueryError::HttpStatus(response.status()));
            }

            let body = response.text().await?;
            let part = Self::from_json_str(&body)?;
            log::info!("Fetched {} {} entries", part.len(), kind);
            feed.extend(part);
        }

        Ok(feed)
    }

    /// Append another feed's entries
    pub fn extend(&mut self, other: PriceFeed) {
        self.entries.extend(other.entries);
    }

    /// Entries eligible for valuation and selection: unlinked, listed under
    /// their category in `catalog`, most valuable first
    pub fn obtainable(&self, catalog: &CategoryCatalog) -> Vec<PricedEntry> {
        let mut pool: Vec<PricedEntry> = self
            .entries
            .iter()
            .filter(|e| !e.is_linked())
            .filter(|e| catalog.contains_member(&e.category, &e.name))
            .cloned()
            .collect();
        pool.sort_by(by_value_desc);

        log::info!(
            "{} of {} feed entries are obtainable",
            pool.len(),
            self.entries.len()
        );
        pool
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries
    pub fn iter(&self) -> impl Iterator<Item = &PricedEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
#[path = "feed_tests.rs"]
mod tests;
