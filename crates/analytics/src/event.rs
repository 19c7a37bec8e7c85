//! The profit event handed to the page.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::EmitterConfig;
use crate::profit::ProfitBreakdown;
use crate::render;

/// A gross-profit event, ready to be rendered.
///
/// Serializes as `{"event": <name>, <profit_field>: "<profit>"}`; the figures
/// behind the value stay available through [`breakdown`](Self::breakdown)
/// but are not part of the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfitEvent {
    event_name: String,
    profit_field: String,
    value: String,
    breakdown: ProfitBreakdown,
}

impl ProfitEvent {
    pub fn new(config: &EmitterConfig, breakdown: ProfitBreakdown) -> Self {
        Self {
            event_name: config.event_name.clone(),
            profit_field: config.profit_field.clone(),
            value: render::format_amount(breakdown.profit, config.precision),
            breakdown,
        }
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn profit_field(&self) -> &str {
        &self.profit_field
    }

    /// Stringified profit, as pushed to the page.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn profit(&self) -> f64 {
        self.breakdown.profit
    }

    pub fn breakdown(&self) -> &ProfitBreakdown {
        &self.breakdown
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Serialize for ProfitEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("event", &self.event_name)?;
        map.serialize_entry(&self.profit_field, &self.value)?;
        map.end()
    }
}
