//! Budgeted selection of supplementary entries
//!
//! The user picks the entries they want (the mandatory selection). The
//! selector then fills the remaining room of the category query with the most
//! valuable entries from the pool. Entries whose category is already part of
//! the query cost nothing; any other entry pays for its fragment plus one
//! separator and is only taken while the running length stays within budget.

use search_common::{by_value_desc, CategoryCatalog, FragmentSource, PricedEntry, Result};
use std::collections::{HashMap, HashSet};

/// Maximum length of the category alternation, in characters
pub const SUPPLEMENT_BUDGET: usize = 50;

/// Entries at or below this value are never added automatically
pub const MIN_SUPPLEMENT_VALUE: f64 = 200.0;

/// Room reserved for the clause quotes when nothing is selected yet
const MIN_BASE_CHARS: usize = 2;

/// User-chosen entries, in selection order and unique by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    entries: Vec<PricedEntry>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection, keeping the first entry for each name
    pub fn from_entries<I: IntoIterator<Item = PricedEntry>>(entries: I) -> Self {
        let mut selection = Self::new();
        for entry in entries {
            selection.insert(entry);
        }
        selection
    }

    /// Add an entry. Returns false if an entry with that name is already selected.
    pub fn insert(&mut self, entry: PricedEntry) -> bool {
        if self.contains(&entry.name) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Remove the entry with `name`
    pub fn remove(&mut self, name: &str) -> Option<PricedEntry> {
        let pos = self.entries.iter().position(|e| e.name == name)?;
        Some(self.entries.remove(pos))
    }

    /// Select the entry if absent, deselect it if present. Returns whether it
    /// is selected afterwards.
    pub fn toggle(&mut self, entry: &PricedEntry) -> bool {
        if self.remove(&entry.name).is_some() {
            false
        } else {
            self.entries.push(entry.clone());
            true
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn as_slice(&self) -> &[PricedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Distinct categories in first-seen order
fn distinct_categories<'e, I>(entries: I) -> Vec<&'e str>
where
    I: IntoIterator<Item = &'e PricedEntry>,
{
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .map(|e| e.category.as_str())
        .filter(|category| seen.insert(*category))
        .collect()
}

/// Length of the `|`-joined fragments of `categories`
fn joined_len<S: FragmentSource>(categories: &[&str], fragments: &S) -> Result<usize> {
    let mut total = categories.len().saturating_sub(1);
    for category in categories {
        total += fragments.fragment_len(category)?;
    }
    Ok(total)
}

/// Pick supplementary entries from `pool` for the given mandatory selection.
///
/// Candidates are scanned once, most valuable first (stable on ties). The
/// result is re-derived from the inputs on every call.
pub fn select_supplementary<S: FragmentSource>(
    mandatory: &[PricedEntry],
    pool: &[PricedEntry],
    fragments: &S,
) -> Result<Vec<PricedEntry>> {
    let base_categories = distinct_categories(mandatory);
    let mut used = joined_len(&base_categories, fragments)?.max(MIN_BASE_CHARS);
    let mut represented: HashSet<&str> = base_categories.into_iter().collect();

    let mandatory_names: HashSet<&str> = mandatory.iter().map(|e| e.name.as_str()).collect();
    let mut candidates: Vec<&PricedEntry> = pool
        .iter()
        .filter(|e| !mandatory_names.contains(e.name.as_str()))
        .collect();
    candidates.sort_by(|a, b| by_value_desc(a, b));

    let mut accepted = Vec::new();
    for entry in candidates {
        if entry.value.is_nan() || entry.value <= MIN_SUPPLEMENT_VALUE {
            continue;
        }

        if represented.contains(entry.category.as_str()) {
            log::trace!("{} rides along with {}", entry.name, entry.category);
            accepted.push(entry.clone());
            continue;
        }

        let addition = 1 + fragments.fragment_len(&entry.category)?;
        if used + addition <= SUPPLEMENT_BUDGET {
            used += addition;
            represented.insert(entry.category.as_str());
            accepted.push(entry.clone());
        } else {
            log::trace!(
                "{} skipped: {} + {} exceeds budget",
                entry.name,
                used,
                addition
            );
        }
    }

    log::debug!(
        "Selected {} supplementary entries ({}/{} chars)",
        accepted.len(),
        used,
        SUPPLEMENT_BUDGET
    );
    Ok(accepted)
}

/// The category query: one quoted alternation of every represented category,
/// or an empty string when nothing is selected
pub fn expedition_query<S: FragmentSource>(
    mandatory: &[PricedEntry],
    supplementary: &[PricedEntry],
    fragments: &S,
) -> Result<String> {
    let categories = distinct_categories(mandatory.iter().chain(supplementary));
    if categories.is_empty() {
        return Ok(String::new());
    }

    let parts = categories
        .iter()
        .map(|category| fragments.fragment(category))
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("\"{}\"", parts.join("|").replace('"', "")))
}

/// Every priced entry the query matches as a side effect: members of any
/// represented category that were neither chosen nor added, most valuable first
pub fn other_matching(
    mandatory: &[PricedEntry],
    supplementary: &[PricedEntry],
    catalog: &CategoryCatalog,
    pool: &[PricedEntry],
) -> Result<Vec<PricedEntry>> {
    let chosen: HashSet<&str> = mandatory
        .iter()
        .chain(supplementary)
        .map(|e| e.name.as_str())
        .collect();
    let by_name: HashMap<&str, &PricedEntry> =
        pool.iter().map(|e| (e.name.as_str(), e)).collect();

    let mut seen = HashSet::new();
    let mut matched = Vec::new();
    for key in distinct_categories(mandatory.iter().chain(supplementary)) {
        for member in &catalog.category(key)?.members {
            let name = member.name.as_str();
            if chosen.contains(name) || !seen.insert(name) {
                continue;
            }
            if let Some(entry) = by_name.get(name) {
                matched.push((*entry).clone());
            }
        }
    }

    matched.sort_by(by_value_desc);
    Ok(matched)
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
