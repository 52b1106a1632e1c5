//! Query Compiler - search strings from thresholds, flags and catalog picks
//!
//! Compiles numeric thresholds into digit patterns, assembles quoted clauses
//! into a map-modifier query, and fills a category query with the most
//! valuable entries that fit its length budget.

pub mod clauses;
pub mod error;
pub mod expedition;
pub mod feed;
pub mod range;
pub mod selector;
pub mod settings;
pub mod valuation;

pub use clauses::ClauseBuilder;
pub use error::{QueryError, Result};
pub use expedition::{plan, select_by_name, ExpeditionPlan};
pub use feed::PriceFeed;
pub use range::{compile, simplify_classes, NumericSetting};
pub use selector::{expedition_query, other_matching, select_supplementary, Selection};
pub use settings::{default_settings_path, MapSettings, RaritySettings};
pub use valuation::{search_valuations, unresolved_members, valuate, CategoryValuation, Pricing};
