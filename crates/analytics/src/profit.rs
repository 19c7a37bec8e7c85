//! Gross profit arithmetic.

use profitlayer_core::FieldValue;
use profitlayer_sales::{LineItem, Order};

/// Order money fields after normalisation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Financials {
    pub total: f64,
    pub shipping: f64,
    pub tax: f64,
}

impl Financials {
    /// Read the order's totals.
    ///
    /// `None` when the total is missing, zero, or not a number. Shipping and
    /// tax that are not numeric count as zero.
    pub fn from_order(order: &Order) -> Option<Self> {
        let total = Some(&order.total)
            .filter(|total| total.is_truthy())
            .and_then(FieldValue::as_number)?;
        Some(Self {
            total,
            shipping: order.shipping_total.number_or_zero(),
            tax: order.total_tax.number_or_zero(),
        })
    }

    pub fn net_total(&self) -> f64 {
        self.total - self.shipping - self.tax
    }
}

/// Cost contribution of one line: unit cost times quantity, or zero when the
/// unit cost is unknown.
pub fn line_cost(item: &LineItem, unit_cost: Option<f64>) -> f64 {
    unit_cost.map_or(0.0, |cost| cost * f64::from(item.quantity))
}

/// Every figure that went into a profit value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ProfitBreakdown {
    pub financials: Financials,
    pub net_total: f64,
    pub total_cost: f64,
    /// `max(net_total - total_cost, 0)`; never negative.
    pub profit: f64,
}

impl ProfitBreakdown {
    pub fn new(financials: Financials, total_cost: f64) -> Self {
        let net_total = financials.net_total();
        Self {
            financials,
            net_total,
            total_cost,
            profit: floor_at_zero(net_total - total_cost),
        }
    }
}

// Also collapses NaN, infinities and -0.0 to 0.0.
fn floor_at_zero(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
