//! Priced catalog entries as delivered by the price feed

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A priced catalog instance. `value` is the market price and is never mutated
/// after the feed has been read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedEntry {
    pub name: String,
    #[serde(alias = "baseType")]
    pub category: String,
    #[serde(alias = "chaosValue")]
    pub value: f64,
    #[serde(default)]
    pub icon: String,
    /// Linked variants are listed separately by the feed and are never base-eligible
    #[serde(default, alias = "links", skip_serializing_if = "Option::is_none")]
    pub link_count: Option<u32>,
}

impl PricedEntry {
    /// Create an unlinked entry without an icon
    pub fn new(name: &str, category: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            value,
            icon: String::new(),
            link_count: None,
        }
    }

    /// True if the feed lists this entry as a linked variant
    pub fn is_linked(&self) -> bool {
        self.link_count.is_some()
    }
}

/// Comparator for a descending sort by value. Use with a stable sort so equal
/// values keep their original order.
pub fn by_value_desc(a: &PricedEntry, b: &PricedEntry) -> Ordering {
    b.value.total_cmp(&a.value)
}
