//! JSON fixture loading.
//!
//! Orders files hold a JSON array of orders; cost files hold a JSON array of
//! `{"product_id": .., "fields": {..}}` records.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use profitlayer_products::ProductCostRecord;
use profitlayer_sales::Order;

use crate::store::{InMemoryCostStore, InMemoryOrderStore};

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn parse_orders(json: &str) -> serde_json::Result<InMemoryOrderStore> {
    let orders: Vec<Order> = serde_json::from_str(json)?;
    Ok(orders.into_iter().collect())
}

pub fn parse_costs(json: &str) -> serde_json::Result<InMemoryCostStore> {
    let records: Vec<ProductCostRecord> = serde_json::from_str(json)?;
    Ok(records.into_iter().collect())
}

pub fn load_orders(path: impl AsRef<Path>) -> Result<InMemoryOrderStore, FixtureError> {
    let path = path.as_ref();
    let store = parse_orders(&read(path)?).map_err(|source| FixtureError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), orders = store.len(), "loaded order fixtures");
    Ok(store)
}

pub fn load_costs(path: impl AsRef<Path>) -> Result<InMemoryCostStore, FixtureError> {
    let path = path.as_ref();
    let store = parse_costs(&read(path)?).map_err(|source| FixtureError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), products = store.len(), "loaded cost fixtures");
    Ok(store)
}

fn read(path: &Path) -> Result<String, FixtureError> {
    fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use profitlayer_core::{FieldValue, OrderId, ProductId};
    use profitlayer_products::{CostSource, DEFAULT_COST_FIELD};
    use profitlayer_sales::OrderSource;

    #[test]
    fn parses_order_array() {
        let store = parse_orders(
            r#"[
                {"id": 1, "created_at": "2024-03-01T12:00:00+01:00", "total": 100},
                {"id": 2, "created_at": null, "total": "50.00", "items": []}
            ]"#,
        )
        .unwrap();
        assert_eq!(store.len(), 2);
        let second = store.order(OrderId::new(2)).unwrap().unwrap();
        assert_eq!(second.created_at, None);
        assert_eq!(second.total, FieldValue::text("50.00"));
    }

    #[test]
    fn parses_cost_array() {
        let store = parse_costs(
            r#"[{"product_id": 7, "fields": {"uniliving_inkoopprijs": "20", "colour": "red"}}]"#,
        )
        .unwrap();
        assert_eq!(
            store.cost_field(ProductId::new(7), DEFAULT_COST_FIELD),
            Ok(Some(FieldValue::text("20")))
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(parse_orders(r#"{"id": 1}"#).is_err());
        assert!(parse_costs("not json").is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        match load_orders("/nonexistent/profitlayer/orders.json") {
            Err(FixtureError::Io { path, .. }) => {
                assert!(path.ends_with("orders.json"));
            }
            other => panic!("Expected Io error, got {other:?}"),
        }
    }
}
