//! Product cost basis.
//!
//! Products carry their cost-per-unit in a custom field; this crate models
//! the record and the lookup used to read it.

pub mod product;

pub use product::{CostSource, DEFAULT_COST_FIELD, ProductCostRecord, unit_cost};
