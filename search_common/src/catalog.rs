//! Static category catalog: category key -> fragment + member list
//!
//! The catalog is generated ahead of time and loaded once. Key order in the
//! source file is kept, since it is the tie-break order for valuation.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Lookup of clause-safe regex fragments by key
pub trait FragmentSource {
    /// Fragment registered under `key`, or an unknown-key error
    fn fragment(&self, key: &str) -> Result<&str>;

    /// Length of the fragment in characters
    fn fragment_len(&self, key: &str) -> Result<usize> {
        Ok(self.fragment(key)?.chars().count())
    }
}

/// A catalog member as listed in the static table (no price attached)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMember {
    pub name: String,
    #[serde(alias = "baseType")]
    pub category: String,
    #[serde(default)]
    pub icon: String,
}

/// A named grouping of entries sharing one regex fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub key: String,
    pub canonical_name: String,
    /// Pre-escaped alternation matching every member, without double quotes
    pub fragment: String,
    pub members: Vec<CatalogMember>,
}

impl Category {
    /// Create a category. Double quotes are stripped from the fragment so it can
    /// be placed inside a quoted clause as-is.
    pub fn new(key: &str, canonical_name: &str, fragment: &str, members: Vec<CatalogMember>) -> Self {
        Self {
            key: key.to_string(),
            canonical_name: canonical_name.to_string(),
            fragment: fragment.replace('"', ""),
            members,
        }
    }

    /// Check whether `name` is listed as a member
    pub fn has_member(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.name == name)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryRecord {
    canonical_name: String,
    #[serde(alias = "regex")]
    fragment_pattern: String,
    #[serde(default, alias = "items")]
    members: Vec<CatalogMember>,
}

/// Category table in source order with key lookup
#[derive(Debug, Clone, Default)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
    index: HashMap<String, usize>,
}

impl CategoryCatalog {
    /// Build a catalog from categories in table order. A repeated key replaces
    /// the earlier category in its original position.
    pub fn from_categories(categories: Vec<Category>) -> Self {
        let mut catalog = Self::default();
        for category in categories {
            match catalog.index.get(&category.key) {
                Some(&pos) => catalog.categories[pos] = category,
                None => {
                    catalog
                        .index
                        .insert(category.key.clone(), catalog.categories.len());
                    catalog.categories.push(category);
                }
            }
        }
        catalog
    }

    /// Load a catalog from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading category catalog from: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content)?;

        log::info!("Loaded {} categories", catalog.len());
        Ok(catalog)
    }

    /// Parse a catalog from its JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;

        let mut categories = Vec::with_capacity(raw.len());
        for (key, value) in raw {
            let record: CategoryRecord = serde_json::from_value(value)?;
            categories.push(Category::new(
                &key,
                &record.canonical_name,
                &record.fragment_pattern,
                record.members,
            ));
        }

        Ok(Self::from_categories(categories))
    }

    /// Look up a category by key
    pub fn get(&self, key: &str) -> Option<&Category> {
        self.index.get(key).map(|&pos| &self.categories[pos])
    }

    /// Look up a category that the caller expects to exist
    pub fn category(&self, key: &str) -> Result<&Category> {
        self.get(key)
            .ok_or_else(|| CatalogError::UnknownCategory(key.to_string()))
    }

    /// Check whether `name` is a member of category `key`
    pub fn contains_member(&self, key: &str, name: &str) -> bool {
        self.get(key).is_some_and(|c| c.has_member(name))
    }

    /// Get the number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Iterate over categories in table order
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }
}

impl FragmentSource for CategoryCatalog {
    fn fragment(&self, key: &str) -> Result<&str> {
        self.category(key).map(|c| c.fragment.as_str())
    }
}
