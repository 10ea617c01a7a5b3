use std::sync::Arc;

use super::{KeyValueStore, StoreError};
use crate::types::StepId;

/// Repository for the manual step order
pub trait OrderStore: Send + Sync {
    /// Read the persisted order. Absent or unreadable data is an empty order.
    fn load(&self) -> Vec<StepId>;

    /// Overwrite the persisted order
    fn save(&self, order: &[StepId]) -> Result<(), StoreError>;
}

/// Order kept as a JSON array of ids under a single store key
#[derive(Clone)]
pub struct KeyedOrderStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl KeyedOrderStore {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }
}

impl OrderStore for KeyedOrderStore {
    fn load(&self) -> Vec<StepId> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read step order");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Option<Vec<StepId>>>(&raw) {
            Ok(order) => order.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Ignoring unparseable step order");
                Vec::new()
            }
        }
    }

    fn save(&self, order: &[StepId]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(order).map_err(|source| StoreError::Encode {
            key: self.key.clone(),
            source,
        })?;
        self.store.set(&self.key, &payload)?;
        tracing::debug!(key = %self.key, steps = order.len(), "Saved step order");
        Ok(())
    }
}
