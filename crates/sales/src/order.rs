use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use profitlayer_core::{FieldValue, OrderId, ProductId, SourceError};

/// Order line: product, optional variation, quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    /// Set when the line refers to a specific variation of `product_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_id: Option<ProductId>,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            variation_id: None,
            quantity,
        }
    }

    pub fn with_variation(mut self, variation_id: ProductId) -> Self {
        self.variation_id = Some(variation_id);
        self
    }

    /// Identifier the line's cost basis is recorded under.
    ///
    /// A positive variation id wins over the parent product id.
    pub fn cost_key(&self) -> ProductId {
        match self.variation_id {
            Some(variation) if variation.is_set() => variation,
            _ => self.product_id,
        }
    }
}

/// Read view of a placed order.
///
/// Timestamps keep the offset they were recorded in. Money fields are
/// [`FieldValue`] because the platform does not guarantee they are numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub paid_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub total: FieldValue,
    #[serde(default)]
    pub shipping_total: FieldValue,
    #[serde(default)]
    pub total_tax: FieldValue,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl Order {
    /// An order created at `created_at` with no money fields and no lines.
    pub fn new(id: OrderId, created_at: DateTime<FixedOffset>) -> Self {
        Self {
            id,
            created_at: Some(created_at),
            paid_at: None,
            total: FieldValue::Null,
            shipping_total: FieldValue::Null,
            total_tax: FieldValue::Null,
            items: Vec::new(),
        }
    }

    pub fn paid_at(mut self, paid_at: DateTime<FixedOffset>) -> Self {
        self.paid_at = Some(paid_at);
        self
    }

    pub fn totals(
        mut self,
        total: impl Into<FieldValue>,
        shipping_total: impl Into<FieldValue>,
        total_tax: impl Into<FieldValue>,
    ) -> Self {
        self.total = total.into();
        self.shipping_total = shipping_total.into();
        self.total_tax = total_tax.into();
        self
    }

    pub fn item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }
}

/// Read-only order lookup.
///
/// `Ok(None)` means the order does not exist; `Err` means the source could
/// not answer.
pub trait OrderSource: Send + Sync {
    fn order(&self, id: OrderId) -> Result<Option<Order>, SourceError>;
}

impl<S> OrderSource for Arc<S>
where
    S: OrderSource + ?Sized,
{
    fn order(&self, id: OrderId) -> Result<Option<Order>, SourceError> {
        (**self).order(id)
    }
}

impl<S> OrderSource for &S
where
    S: OrderSource + ?Sized,
{
    fn order(&self, id: OrderId) -> Result<Option<Order>, SourceError> {
        (**self).order(id)
    }
}
