use std::collections::HashMap;
use std::sync::RwLock;

use tracing::warn;

use profitlayer_core::{FieldValue, OrderId, ProductId, SourceError};
use profitlayer_products::{CostSource, ProductCostRecord};
use profitlayer_sales::{Order, OrderSource};

/// In-memory order store for tests/dev.
#[derive(Debug)]
pub struct InMemoryOrderStore {
    inner: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert(&self, order: Order) {
        match self.inner.write() {
            Ok(mut map) => {
                map.insert(order.id, order);
            }
            Err(_) => warn!(order_id = %order.id, "order store lock poisoned; insert dropped"),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Order> for InMemoryOrderStore {
    fn from_iter<I: IntoIterator<Item = Order>>(iter: I) -> Self {
        let map = iter.into_iter().map(|order| (order.id, order)).collect();
        Self {
            inner: RwLock::new(map),
        }
    }
}

impl OrderSource for InMemoryOrderStore {
    fn order(&self, id: OrderId) -> Result<Option<Order>, SourceError> {
        let map = self
            .inner
            .read()
            .map_err(|_| SourceError::unavailable("order store lock poisoned"))?;
        Ok(map.get(&id).cloned())
    }
}

/// In-memory product custom-field store for tests/dev.
#[derive(Debug)]
pub struct InMemoryCostStore {
    inner: RwLock<HashMap<ProductId, ProductCostRecord>>,
}

impl InMemoryCostStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace the record for `record.product_id`.
    pub fn upsert(&self, record: ProductCostRecord) {
        match self.inner.write() {
            Ok(mut map) => {
                map.insert(record.product_id, record);
            }
            Err(_) => warn!(
                product_id = %record.product_id,
                "cost store lock poisoned; upsert dropped"
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryCostStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<ProductCostRecord> for InMemoryCostStore {
    fn from_iter<I: IntoIterator<Item = ProductCostRecord>>(iter: I) -> Self {
        let map = iter
            .into_iter()
            .map(|record| (record.product_id, record))
            .collect();
        Self {
            inner: RwLock::new(map),
        }
    }
}

impl CostSource for InMemoryCostStore {
    fn cost_field(
        &self,
        product_id: ProductId,
        key: &str,
    ) -> Result<Option<FieldValue>, SourceError> {
        let map = self
            .inner
            .read()
            .map_err(|_| SourceError::unavailable("cost store lock poisoned"))?;
        Ok(map.get(&product_id).and_then(|record| record.get(key)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profitlayer_products::DEFAULT_COST_FIELD;

    #[test]
    fn unknown_ids_read_as_none() {
        let orders = InMemoryOrderStore::new();
        let costs = InMemoryCostStore::new();
        assert_eq!(orders.order(OrderId::new(1)), Ok(None));
        assert_eq!(costs.cost_field(ProductId::new(1), DEFAULT_COST_FIELD), Ok(None));
        assert!(orders.is_empty());
        assert!(costs.is_empty());
    }

    #[test]
    fn upsert_replaces_existing_record() {
        let costs = InMemoryCostStore::new();
        costs.upsert(ProductCostRecord::with_cost(ProductId::new(7), "20"));
        costs.upsert(ProductCostRecord::with_cost(ProductId::new(7), "25"));

        assert_eq!(costs.len(), 1);
        assert_eq!(
            costs.cost_field(ProductId::new(7), DEFAULT_COST_FIELD),
            Ok(Some(FieldValue::text("25")))
        );
    }

    #[test]
    fn missing_field_on_known_product_reads_as_none() {
        let costs: InMemoryCostStore =
            [ProductCostRecord::new(ProductId::new(7)).field("colour", "red")]
                .into_iter()
                .collect();
        assert_eq!(costs.cost_field(ProductId::new(7), DEFAULT_COST_FIELD), Ok(None));
    }

    fn poison<T>(lock: &RwLock<T>) {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = lock.write().unwrap();
            panic!("poison the lock");
        }));
        assert!(lock.is_poisoned());
    }

    #[test]
    fn poisoned_order_store_reports_unavailable() {
        let orders = InMemoryOrderStore::new();
        poison(&orders.inner);

        let created = chrono::DateTime::parse_from_rfc3339("2024-03-01T12:00:00+01:00").unwrap();
        orders.insert(Order::new(OrderId::new(1), created));

        match orders.order(OrderId::new(1)) {
            Err(SourceError::Unavailable(_)) => {}
            other => panic!("Expected Unavailable, got {other:?}"),
        }
        assert_eq!(orders.len(), 0);
    }

    #[test]
    fn poisoned_cost_store_reports_unavailable() {
        let costs = InMemoryCostStore::new();
        poison(&costs.inner);

        costs.upsert(ProductCostRecord::with_cost(ProductId::new(7), "20"));

        match costs.cost_field(ProductId::new(7), DEFAULT_COST_FIELD) {
            Err(SourceError::Unavailable(_)) => {}
            other => panic!("Expected Unavailable, got {other:?}"),
        }
    }
}
