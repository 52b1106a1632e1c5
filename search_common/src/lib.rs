//! Search Common - shared catalog types for query compilation
//!
//! Price entries, category and modifier catalogs, and the error type shared by
//! every crate that assembles search queries from them.

pub mod catalog;
pub mod entry;
pub mod error;
pub mod modifiers;

pub use catalog::{CatalogMember, Category, CategoryCatalog, FragmentSource};
pub use entry::{by_value_desc, PricedEntry};
pub use error::{CatalogError, Result};
pub use modifiers::{Modifier, ModifierCatalog};
