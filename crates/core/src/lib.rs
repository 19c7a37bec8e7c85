//! `profitlayer-core`: shared building blocks.
//!
//! Identifiers, the loose field values a commerce platform hands back, and the
//! error types every other crate speaks. No IO lives here.

pub mod error;
pub mod id;
pub mod value;

pub use error::{DomainError, DomainResult, SourceError};
pub use id::{OrderId, ProductId};
pub use value::FieldValue;
