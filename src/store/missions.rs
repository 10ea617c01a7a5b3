use serde_json::Value;
use std::sync::Arc;

use super::KeyValueStore;
use crate::types::Mission;

/// Read-only view of the mission snapshot written by the host application
#[derive(Clone)]
pub struct MissionSource {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl MissionSource {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Load the current missions.
    ///
    /// Never fails: a missing or unparseable entry is an empty list, and a
    /// malformed mission is skipped without discarding the others.
    pub fn load(&self) -> Vec<Mission> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read missions");
                return Vec::new();
            }
        };

        let entries = match serde_json::from_str::<Option<Vec<Value>>>(&raw) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Ignoring unparseable missions");
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<Mission>(entry) {
                Ok(mission) => Some(mission),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping malformed mission");
                    None
                }
            })
            .collect()
    }
}
