//! Emitter configuration.
//!
//! Every knob has a compiled-in default matching what the confirmation page
//! has always pushed. Hosts can override them from a JSON file (via serde) or
//! from `PROFITLAYER_*` environment variables.

use core::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use profitlayer_core::{DomainError, DomainResult};
use profitlayer_products::DEFAULT_COST_FIELD;

pub const DEFAULT_WINDOW_MINUTES: u32 = 39;
pub const DEFAULT_EVENT_NAME: &str = "EpsilonSigmaAlpha";
pub const DEFAULT_PROFIT_FIELD: &str = "TimeoutValue";
pub const DEFAULT_DATA_LAYER: &str = "dataLayer";
pub const DEFAULT_PRECISION: u8 = 14;

const ENV_PREFIX: &str = "PROFITLAYER_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitterConfig {
    /// How long after creation (or payment) an order still gets an event.
    pub window_minutes: u32,
    /// Value of the `event` key in the pushed object.
    pub event_name: String,
    /// Key carrying the profit in the pushed object.
    pub profit_field: String,
    /// Product custom-field key holding the cost-per-unit.
    pub cost_field: String,
    /// Name of the page-global queue (`window.<data_layer>`).
    pub data_layer: String,
    /// Significant digits used when printing the profit.
    pub precision: u8,
    /// Emit `profit = net total` for orders without line items instead of
    /// skipping them.
    pub emit_without_items: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            window_minutes: DEFAULT_WINDOW_MINUTES,
            event_name: DEFAULT_EVENT_NAME.to_string(),
            profit_field: DEFAULT_PROFIT_FIELD.to_string(),
            cost_field: DEFAULT_COST_FIELD.to_string(),
            data_layer: DEFAULT_DATA_LAYER.to_string(),
            precision: DEFAULT_PRECISION,
            emit_without_items: false,
        }
    }
}

impl EmitterConfig {
    /// Defaults overridden by `PROFITLAYER_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each
    /// `PROFITLAYER_*` key. Unparseable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        override_from(&lookup, "WINDOW_MINUTES", &mut config.window_minutes);
        override_from(&lookup, "EVENT_NAME", &mut config.event_name);
        override_from(&lookup, "PROFIT_FIELD", &mut config.profit_field);
        override_from(&lookup, "COST_FIELD", &mut config.cost_field);
        override_from(&lookup, "DATA_LAYER", &mut config.data_layer);
        override_from(&lookup, "PRECISION", &mut config.precision);
        override_from(&lookup, "EMIT_WITHOUT_ITEMS", &mut config.emit_without_items);
        config
    }

    pub fn window(&self) -> Duration {
        Duration::minutes(i64::from(self.window_minutes))
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.window_minutes == 0 {
            return Err(DomainError::validation("window_minutes must be positive"));
        }
        if self.event_name.is_empty() {
            return Err(DomainError::validation("event_name must not be empty"));
        }
        if self.profit_field.is_empty() {
            return Err(DomainError::validation("profit_field must not be empty"));
        }
        if self.cost_field.is_empty() {
            return Err(DomainError::validation("cost_field must not be empty"));
        }
        if !is_js_identifier(&self.data_layer) {
            return Err(DomainError::validation(format!(
                "data_layer must be a JavaScript identifier (got {:?})",
                self.data_layer
            )));
        }
        if !(1..=17).contains(&self.precision) {
            return Err(DomainError::validation("precision must be between 1 and 17"));
        }
        Ok(())
    }
}

fn override_from<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, slot: &mut T)
where
    T: FromStr,
{
    let key = format!("{ENV_PREFIX}{name}");
    let Some(raw) = lookup(key.as_str()) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => *slot = value,
        Err(_) => tracing::warn!(
            key = %key,
            value = %raw,
            "ignoring unparseable config override"
        ),
    }
}

fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_confirmation_page_constants() {
        let config = EmitterConfig::default();
        assert_eq!(config.window(), Duration::minutes(39));
        assert_eq!(config.event_name, "EpsilonSigmaAlpha");
        assert_eq!(config.profit_field, "TimeoutValue");
        assert_eq!(config.cost_field, "uniliving_inkoopprijs");
        assert_eq!(config.data_layer, "dataLayer");
        assert!(!config.emit_without_items);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = EmitterConfig::from_lookup(lookup_from(&[
            ("PROFITLAYER_WINDOW_MINUTES", "15"),
            ("PROFITLAYER_EVENT_NAME", "orderProfit"),
            ("PROFITLAYER_EMIT_WITHOUT_ITEMS", "true"),
        ]));
        assert_eq!(config.window_minutes, 15);
        assert_eq!(config.event_name, "orderProfit");
        assert!(config.emit_without_items);
        assert_eq!(config.profit_field, DEFAULT_PROFIT_FIELD);
    }

    #[test]
    fn unparseable_override_keeps_default() {
        let lookup = lookup_from(&[("PROFITLAYER_WINDOW_MINUTES", "soon")]);
        let config = EmitterConfig::from_lookup(lookup);
        assert_eq!(config.window_minutes, DEFAULT_WINDOW_MINUTES);
    }

    #[test]
    fn partial_json_config_fills_in_defaults() {
        let config: EmitterConfig =
            serde_json::from_str(r#"{"cost_field": "cost_price"}"#).unwrap();
        assert_eq!(config.cost_field, "cost_price");
        assert_eq!(config.window_minutes, DEFAULT_WINDOW_MINUTES);
    }

    #[test]
    fn unknown_json_keys_are_rejected() {
        let result = serde_json::from_str::<EmitterConfig>(r#"{"window": 5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let cases = [
            EmitterConfig {
                window_minutes: 0,
                ..EmitterConfig::default()
            },
            EmitterConfig {
                event_name: String::new(),
                ..EmitterConfig::default()
            },
            EmitterConfig {
                data_layer: "data-layer".to_string(),
                ..EmitterConfig::default()
            },
            EmitterConfig {
                data_layer: "1st".to_string(),
                ..EmitterConfig::default()
            },
            EmitterConfig {
                precision: 0,
                ..EmitterConfig::default()
            },
            EmitterConfig {
                precision: 18,
                ..EmitterConfig::default()
            },
        ];
        for config in cases {
            match config.validate() {
                Err(DomainError::Validation(_)) => {}
                other => panic!("Expected Validation error for {config:?}, got {other:?}"),
            }
        }
    }
}
