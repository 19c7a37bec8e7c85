//! Order → profit event pipeline.
//!
//! Every guard either hands the next step what it needs or returns a [`Skip`].
//! Callers of [`ProfitEventEmitter::emit`] only see "markup" or "nothing";
//! the skip reason goes to the logs.

use thiserror::Error;
use tracing::{debug, debug_span, info, warn};

use profitlayer_core::{DomainResult, OrderId, SourceError};
use profitlayer_products::{CostSource, unit_cost};
use profitlayer_sales::{LineItem, OrderSource};

use crate::clock::{Clock, SystemClock};
use crate::config::EmitterConfig;
use crate::event::ProfitEvent;
use crate::profit::{self, Financials, ProfitBreakdown};
use crate::render;
use crate::window::OrderAge;

/// Why an order produced no event.
///
/// All of these are "ineligible"; none is surfaced to the page.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Skip {
    #[error("order not found")]
    OrderNotFound,

    #[error("order lookup failed: {0}")]
    LookupFailed(SourceError),

    #[error("order has no creation date")]
    MissingCreatedAt,

    #[error(
        "outside eligibility window (created {created_seconds}s ago, {})",
        describe_payment(.paid_seconds)
    )]
    OutsideWindow {
        created_seconds: i64,
        paid_seconds: Option<i64>,
    },

    #[error("order total is missing, zero or not numeric")]
    MissingTotal,

    #[error("order has no line items")]
    NoLineItems,
}

fn describe_payment(paid_seconds: &Option<i64>) -> String {
    match paid_seconds {
        Some(seconds) => format!("paid {seconds}s ago"),
        None => "never paid".to_string(),
    }
}

/// Builds the gross-profit data-layer push for a confirmation page.
pub struct ProfitEventEmitter<O, C, K = SystemClock> {
    config: EmitterConfig,
    orders: O,
    costs: C,
    clock: K,
}

impl<O, C> ProfitEventEmitter<O, C, SystemClock>
where
    O: OrderSource,
    C: CostSource,
{
    /// Validates `config` and wires the two lookups against the system clock.
    pub fn new(config: EmitterConfig, orders: O, costs: C) -> DomainResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            orders,
            costs,
            clock: SystemClock,
        })
    }
}

impl<O, C, K> ProfitEventEmitter<O, C, K>
where
    O: OrderSource,
    C: CostSource,
    K: Clock,
{
    /// Swap the clock ages are measured against.
    pub fn with_clock<K2: Clock>(self, clock: K2) -> ProfitEventEmitter<O, C, K2> {
        ProfitEventEmitter {
            config: self.config,
            orders: self.orders,
            costs: self.costs,
            clock,
        }
    }

    /// Rendered `<script>` for `order_id`, or `None` when the order is not
    /// eligible for an event.
    pub fn emit(&self, order_id: OrderId) -> Option<String> {
        self.evaluate(order_id)
            .ok()
            .map(|event| render::script(&event, &self.config.data_layer))
    }

    /// Run the pipeline and keep the outcome, skip reason included.
    pub fn evaluate(&self, order_id: OrderId) -> Result<ProfitEvent, Skip> {
        let span = debug_span!("profit_event", order_id = %order_id);
        let _enter = span.enter();

        let outcome = self.run(order_id);
        match &outcome {
            Ok(event) => info!(
                profit = event.profit(),
                net_total = event.breakdown().net_total,
                total_cost = event.breakdown().total_cost,
                "profit event emitted"
            ),
            Err(skip) => debug!(reason = %skip, "profit event skipped"),
        }
        outcome
    }

    fn run(&self, order_id: OrderId) -> Result<ProfitEvent, Skip> {
        let order = self
            .orders
            .order(order_id)
            .map_err(|e| {
                warn!(error = %e, "order lookup failed");
                Skip::LookupFailed(e)
            })?
            .ok_or(Skip::OrderNotFound)?;

        let created_at = order.created_at.ok_or(Skip::MissingCreatedAt)?;

        let age = OrderAge::measure(self.clock.now(), created_at, order.paid_at);
        if !age.within(self.config.window()) {
            return Err(Skip::OutsideWindow {
                created_seconds: age.created_seconds,
                paid_seconds: age.paid_seconds,
            });
        }

        let financials = Financials::from_order(&order).ok_or(Skip::MissingTotal)?;

        if order.items.is_empty() && !self.config.emit_without_items {
            return Err(Skip::NoLineItems);
        }

        let total_cost: f64 = order.items.iter().map(|item| self.item_cost(item)).sum();

        Ok(ProfitEvent::new(
            &self.config,
            ProfitBreakdown::new(financials, total_cost),
        ))
    }

    fn item_cost(&self, item: &LineItem) -> f64 {
        let key = item.cost_key();
        let cost = match self.costs.cost_field(key, &self.config.cost_field) {
            Ok(value) => value.as_ref().and_then(unit_cost),
            Err(e) => {
                warn!(
                    product_id = %key,
                    error = %e,
                    "cost lookup failed; counting as zero"
                );
                None
            }
        };
        if cost.is_none() {
            debug!(product_id = %key, "no usable cost for line item");
        }
        profit::line_cost(item, cost)
    }
}
