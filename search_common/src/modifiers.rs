//! Modifier catalog: modifier key -> sanitized regex token

use crate::catalog::FragmentSource;
use crate::error::{CatalogError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// A named modifier and the token that matches it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modifier {
    pub key: String,
    /// Quote-free regex token
    pub safe_fragment: String,
}

#[derive(Debug, Deserialize)]
struct ModifierRecord {
    #[serde(rename = "safeFragment", alias = "matchSafe")]
    safe_fragment: String,
}

/// Modifier lookup by key
#[derive(Debug, Clone, Default)]
pub struct ModifierCatalog {
    modifiers: HashMap<String, Modifier>,
}

impl ModifierCatalog {
    /// Build a catalog from `(key, fragment)` pairs
    pub fn from_pairs<K, F, I>(pairs: I) -> Self
    where
        K: Into<String>,
        F: AsRef<str>,
        I: IntoIterator<Item = (K, F)>,
    {
        let modifiers = pairs
            .into_iter()
            .map(|(key, fragment)| {
                let key = key.into();
                let modifier = Modifier {
                    key: key.clone(),
                    safe_fragment: fragment.as_ref().replace('"', ""),
                };
                (key, modifier)
            })
            .collect();
        Self { modifiers }
    }

    /// Load a modifier catalog from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading modifier catalog from: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content)?;

        log::info!("Loaded {} modifiers", catalog.len());
        Ok(catalog)
    }

    /// Parse a modifier catalog from its JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, ModifierRecord> = serde_json::from_str(json)?;
        Ok(Self::from_pairs(
            raw.into_iter().map(|(key, record)| (key, record.safe_fragment)),
        ))
    }

    /// Look up a modifier by key
    pub fn get(&self, key: &str) -> Option<&Modifier> {
        self.modifiers.get(key)
    }

    /// Get the number of modifiers
    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }
}

impl FragmentSource for ModifierCatalog {
    fn fragment(&self, key: &str) -> Result<&str> {
        self.get(key)
            .map(|m| m.safe_fragment.as_str())
            .ok_or_else(|| CatalogError::UnknownModifier(key.to_string()))
    }
}
