//! Per-category valuation
//!
//! For every category in the catalog, find its most valuable member and list
//! the rest. A category with any member missing from the price feed is
//! reported as unresolved and sorts after every priced category.

use search_common::{by_value_desc, CatalogMember, CategoryCatalog, PricedEntry};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Price of a category's best member, or a marker that pricing is incomplete
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pricing {
    Resolved(f64),
    Unresolved,
}

impl Pricing {
    pub fn value(&self) -> Option<f64> {
        match self {
            Pricing::Resolved(value) => Some(*value),
            Pricing::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Pricing::Resolved(_))
    }

    /// Descending by value, unresolved last
    pub fn cmp_desc(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Pricing::Resolved(a), Pricing::Resolved(b)) => b.total_cmp(a),
            (Pricing::Resolved(_), Pricing::Unresolved) => Ordering::Less,
            (Pricing::Unresolved, Pricing::Resolved(_)) => Ordering::Greater,
            (Pricing::Unresolved, Pricing::Unresolved) => Ordering::Equal,
        }
    }
}

/// A category member with its price, or a placeholder when the feed has none
#[derive(Debug, Clone, PartialEq)]
pub enum MemberValuation {
    Priced(PricedEntry),
    Unpriced(CatalogMember),
}

impl MemberValuation {
    pub fn name(&self) -> &str {
        match self {
            MemberValuation::Priced(entry) => &entry.name,
            MemberValuation::Unpriced(member) => &member.name,
        }
    }

    pub fn pricing(&self) -> Pricing {
        match self {
            MemberValuation::Priced(entry) => Pricing::Resolved(entry.value),
            MemberValuation::Unpriced(_) => Pricing::Unresolved,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryValuation {
    pub key: String,
    pub canonical_name: String,
    pub fragment: String,
    pub max_value: Pricing,
    /// None exactly when `max_value` is unresolved
    pub best_member: Option<PricedEntry>,
    /// Priced members sorted by value without the best one, or, for an
    /// unresolved category, every member in table order
    pub remainder: Vec<MemberValuation>,
}

impl CategoryValuation {
    /// Case-insensitive match on the category name or any member name
    fn matches(&self, needle: &str) -> bool {
        self.canonical_name.to_lowercase().contains(needle)
            || self
                .best_member
                .iter()
                .any(|e| e.name.to_lowercase().contains(needle))
            || self
                .remainder
                .iter()
                .any(|m| m.name().to_lowercase().contains(needle))
    }
}

/// Value every category of `catalog` against `prices`, most valuable first.
/// Unresolved categories come last in table order.
pub fn valuate(catalog: &CategoryCatalog, prices: &[PricedEntry]) -> Vec<CategoryValuation> {
    let by_name: HashMap<&str, &PricedEntry> =
        prices.iter().map(|e| (e.name.as_str(), e)).collect();

    let mut valuations: Vec<CategoryValuation> = catalog
        .iter()
        .map(|category| {
            let resolved: Vec<Option<&PricedEntry>> = category
                .members
                .iter()
                .map(|m| by_name.get(m.name.as_str()).copied())
                .collect();

            let complete = !resolved.is_empty() && resolved.iter().all(Option::is_some);
            if !complete {
                let remainder = category
                    .members
                    .iter()
                    .zip(&resolved)
                    .map(|(member, entry)| match entry {
                        Some(entry) => MemberValuation::Priced((*entry).clone()),
                        None => MemberValuation::Unpriced(member.clone()),
                    })
                    .collect();
                return CategoryValuation {
                    key: category.key.clone(),
                    canonical_name: category.canonical_name.clone(),
                    fragment: category.fragment.clone(),
                    max_value: Pricing::Unresolved,
                    best_member: None,
                    remainder,
                };
            }

            let mut members: Vec<PricedEntry> = resolved.into_iter().flatten().cloned().collect();
            members.sort_by(by_value_desc);
            let best = members.remove(0);

            CategoryValuation {
                key: category.key.clone(),
                canonical_name: category.canonical_name.clone(),
                fragment: category.fragment.clone(),
                max_value: Pricing::Resolved(best.value),
                best_member: Some(best),
                remainder: members.into_iter().map(MemberValuation::Priced).collect(),
            }
        })
        .collect();

    valuations.sort_by(|a, b| a.max_value.cmp_desc(&b.max_value));
    valuations
}

/// Placeholders of every unresolved category
pub fn unresolved_members(valuations: &[CategoryValuation]) -> Vec<&CatalogMember> {
    valuations
        .iter()
        .flat_map(|v| v.remainder.iter())
        .filter_map(|m| match m {
            MemberValuation::Unpriced(member) => Some(member),
            MemberValuation::Priced(_) => None,
        })
        .collect()
}

/// Filter valuations by a search text and keep at most `limit`.
/// Queries shorter than three characters match everything.
pub fn search_valuations<'v>(
    valuations: &'v [CategoryValuation],
    query: &str,
    limit: usize,
) -> Vec<&'v CategoryValuation> {
    let needle = query.to_lowercase();
    let filter_active = needle.chars().count() >= 3;

    valuations
        .iter()
        .filter(|v| !filter_active || v.matches(&needle))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_common::Category;

    fn member(name: &str, category: &str) -> CatalogMember {
        CatalogMember {
            name: name.to_string(),
            category: category.to_string(),
            icon: format!("{name}.png"),
        }
    }

    fn test_catalog() -> CategoryCatalog {
        CategoryCatalog::from_categories(vec![
            Category::new(
                "Leather Belt",
                "Leather Belt",
                "r be",
                vec![member("Headhunter", "Leather Belt"), member("Wurm's Molt", "Leather Belt")],
            ),
            Category::new(
                "Gold Ring",
                "Gold Ring",
                "d ri",
                vec![member("Andvarius", "Gold Ring"), member("Ming's Heart", "Gold Ring")],
            ),
            Category::new(
                "Vaal Regalia",
                "Vaal Regalia",
                "l reg",
                vec![member("Shavronne's Wrappings", "Vaal Regalia")],
            ),
            Category::new(
                "Amber Amulet",
                "Amber Amulet",
                "mbe",
                vec![member("Astramentis", "Amber Amulet")],
            ),
        ])
    }

    fn prices() -> Vec<PricedEntry> {
        vec![
            PricedEntry::new("Wurm's Molt", "Leather Belt", 1.0),
            PricedEntry::new("Headhunter", "Leather Belt", 4000.0),
            PricedEntry::new("Andvarius", "Gold Ring", 30.0),
            PricedEntry::new("Shavronne's Wrappings", "Vaal Regalia", 90.0),
        ]
    }

    #[test]
    fn sorted_by_best_value_with_unresolved_last() {
        let valuations = valuate(&test_catalog(), &prices());

        let keys: Vec<&str> = valuations.iter().map(|v| v.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["Leather Belt", "Vaal Regalia", "Gold Ring", "Amber Amulet"]
        );
        assert_eq!(valuations[0].max_value, Pricing::Resolved(4000.0));
        assert_eq!(valuations[1].max_value, Pricing::Resolved(90.0));
        assert_eq!(valuations[2].max_value, Pricing::Unresolved);
        assert_eq!(valuations[3].max_value, Pricing::Unresolved);
    }

    #[test]
    fn resolved_category_splits_best_and_remainder() {
        let valuations = valuate(&test_catalog(), &prices());
        let belt = &valuations[0];

        assert_eq!(belt.best_member.as_ref().unwrap().name, "Headhunter");
        assert_eq!(belt.remainder.len(), 1);
        assert_eq!(belt.remainder[0].name(), "Wurm's Molt");
        assert_eq!(belt.remainder[0].pricing(), Pricing::Resolved(1.0));
        assert_eq!(belt.fragment, "r be");
    }

    #[test]
    fn unresolved_category_keeps_every_member() {
        let valuations = valuate(&test_catalog(), &prices());
        let ring = valuations.iter().find(|v| v.key == "Gold Ring").unwrap();

        assert!(ring.best_member.is_none());
        assert_eq!(ring.remainder.len(), 2);
        assert!(matches!(&ring.remainder[0], MemberValuation::Priced(e) if e.name == "Andvarius"));
        match &ring.remainder[1] {
            MemberValuation::Unpriced(m) => {
                assert_eq!(m.name, "Ming's Heart");
                assert_eq!(m.category, "Gold Ring");
                assert_eq!(m.icon, "Ming's Heart.png");
            }
            other => panic!("Expected placeholder, got: {other:?}"),
        }
    }

    #[test]
    fn unresolved_members_lists_placeholders() {
        let valuations = valuate(&test_catalog(), &prices());
        let missing: Vec<&str> = unresolved_members(&valuations)
            .iter()
            .map(|m| m.name.as_str())
            .collect();

        assert_eq!(missing, vec!["Ming's Heart", "Astramentis"]);
    }

    #[test]
    fn category_without_members_is_unresolved() {
        let catalog = CategoryCatalog::from_categories(vec![Category::new("Empty", "Empty", "e", vec![])]);
        let valuations = valuate(&catalog, &[]);

        assert_eq!(valuations[0].max_value, Pricing::Unresolved);
        assert!(valuations[0].remainder.is_empty());
    }

    #[test]
    fn later_feed_entry_wins_on_duplicate_name() {
        let mut feed = prices();
        feed.push(PricedEntry::new("Headhunter", "Leather Belt", 5000.0));

        let valuations = valuate(&test_catalog(), &feed);
        assert_eq!(valuations[0].max_value, Pricing::Resolved(5000.0));
    }

    #[test]
    fn pricing_order() {
        let mut values = vec![
            Pricing::Unresolved,
            Pricing::Resolved(1.0),
            Pricing::Resolved(-5.0),
            Pricing::Resolved(10.0),
        ];
        values.sort_by(Pricing::cmp_desc);

        assert_eq!(
            values,
            vec![
                Pricing::Resolved(10.0),
                Pricing::Resolved(1.0),
                Pricing::Resolved(-5.0),
                Pricing::Unresolved
            ]
        );
        assert_eq!(Pricing::Resolved(3.0).value(), Some(3.0));
        assert!(!Pricing::Unresolved.is_resolved());
    }

    #[test]
    fn search_matches_category_and_members() {
        let valuations = valuate(&test_catalog(), &prices());

        let hits = search_valuations(&valuations, "RING", 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].key, "Gold Ring");

        let hits = search_valuations(&valuations, "wurm", 10);
        assert_eq!(hits[0].key, "Leather Belt");

        let hits = search_valuations(&valuations, "ming", 10);
        assert_eq!(hits[0].key, "Gold Ring");
    }

    #[test]
    fn short_search_matches_everything_up_to_limit() {
        let valuations = valuate(&test_catalog(), &prices());

        assert_eq!(search_valuations(&valuations, "", 10).len(), 4);
        assert_eq!(search_valuations(&valuations, "zz", 10).len(), 4);
        assert_eq!(search_valuations(&valuations, "", 2).len(), 2);
    }
}
