//! Expedition pipeline: category catalog + priced pool + user selection -> query

use crate::error::{QueryError, Result};
use crate::selector::{expedition_query, other_matching, select_supplementary, Selection};
use crate::valuation::{unresolved_members, valuate, CategoryValuation};
use search_common::{CategoryCatalog, PricedEntry};

/// Everything derived from one snapshot of catalog, pool and selection
#[derive(Debug, Clone)]
pub struct ExpeditionPlan {
    pub valuations: Vec<CategoryValuation>,
    /// Entries the selector would add, computed even when not applied
    pub supplementary: Vec<PricedEntry>,
    /// Entries matched only because their category is in the query
    pub other_matching: Vec<PricedEntry>,
    pub query: String,
}

/// Recompute the whole plan. `add_supplementary` controls whether the
/// selector's picks are part of the query.
pub fn plan(
    catalog: &CategoryCatalog,
    pool: &[PricedEntry],
    selection: &Selection,
    add_supplementary: bool,
) -> Result<ExpeditionPlan> {
    let valuations = valuate(catalog, pool);

    let missing = unresolved_members(&valuations);
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|m| m.name.as_str()).collect();
        log::warn!("Missing economy items on: {}", names.join(", "));
    }

    let mandatory = selection.as_slice();
    let supplementary = select_supplementary(mandatory, pool, catalog)?;
    let applied: &[PricedEntry] = if add_supplementary {
        &supplementary
    } else {
        &[]
    };

    let query = expedition_query(mandatory, applied, catalog)?;
    let other_matching = other_matching(mandatory, applied, catalog, pool)?;

    log::info!(
        "{} selected, {} added, {} also matching",
        mandatory.len(),
        applied.len(),
        other_matching.len()
    );

    Ok(ExpeditionPlan {
        valuations,
        supplementary,
        other_matching,
        query,
    })
}

/// Resolve entry names against the pool, in the order given
pub fn select_by_name(pool: &[PricedEntry], names: &[String]) -> Result<Selection> {
    let mut selection = Selection::new();
    for name in names {
        let entry = pool
            .iter()
            .find(|e| &e.name == name)
            .ok_or_else(|| QueryError::UnknownEntry(name.clone()))?;
        selection.insert(entry.clone());
    }
    Ok(selection)
}
