//! Orders as the profit calculation sees them.
//!
//! Read-only views over whatever the commerce platform stores, plus the
//! lookup trait used to fetch them. Nothing here performs IO.

pub mod order;

pub use order::{LineItem, Order, OrderSource};
