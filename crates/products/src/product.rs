use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use profitlayer_core::{FieldValue, ProductId, SourceError};

/// Custom-field key the cost-per-unit is stored under unless configured otherwise.
pub const DEFAULT_COST_FIELD: &str = "uniliving_inkoopprijs";

/// Custom fields recorded against a product or variation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCostRecord {
    pub product_id: ProductId,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl ProductCostRecord {
    pub fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            fields: BTreeMap::new(),
        }
    }

    /// Record with a single cost field under [`DEFAULT_COST_FIELD`].
    pub fn with_cost(product_id: ProductId, cost: impl Into<FieldValue>) -> Self {
        Self::new(product_id).field(DEFAULT_COST_FIELD, cost)
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }
}

/// Usable cost-per-unit reading of a stored field value.
///
/// The value must be truthy and numeric; anything else reads as `None`.
pub fn unit_cost(value: &FieldValue) -> Option<f64> {
    if value.is_truthy() {
        value.as_number()
    } else {
        None
    }
}

/// Read-only lookup of a product's custom field.
///
/// `Ok(None)` covers both "no such product" and "field not set".
pub trait CostSource: Send + Sync {
    fn cost_field(
        &self,
        product_id: ProductId,
        key: &str,
    ) -> Result<Option<FieldValue>, SourceError>;
}

impl<S> CostSource for Arc<S>
where
    S: CostSource + ?Sized,
{
    fn cost_field(
        &self,
        product_id: ProductId,
        key: &str,
    ) -> Result<Option<FieldValue>, SourceError> {
        (**self).cost_field(product_id, key)
    }
}

impl<S> CostSource for &S
where
    S: CostSource + ?Sized,
{
    fn cost_field(
        &self,
        product_id: ProductId,
        key: &str,
    ) -> Result<Option<FieldValue>, SourceError> {
        (**self).cost_field(product_id, key)
    }
}
