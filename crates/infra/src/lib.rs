//! Infrastructure adapters for the order and cost lookups.
//!
//! In-memory stores for tests and dev, and loaders that fill them from JSON
//! fixture files.

pub mod fixtures;
pub mod store;

pub use fixtures::{FixtureError, load_costs, load_orders};
pub use store::{InMemoryCostStore, InMemoryOrderStore};
