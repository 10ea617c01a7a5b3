use std::sync::Arc;

use crate::config::Config;
use crate::steps::derive_steps;
use crate::store::{FileStore, KeyValueStore, KeyedOrderStore, MissionSource, OrderStore, StoreError};
use crate::types::{Step, StepId};

use super::{InteractionController, Reconciler, ReorderCommand};

/// Entry point for a presenter: pull the ordered list, push new orders
pub struct RoutePlanner {
    missions: MissionSource,
    orders: Arc<dyn OrderStore>,
}

impl RoutePlanner {
    pub fn new(missions: MissionSource, orders: Arc<dyn OrderStore>) -> Self {
        Self { missions, orders }
    }

    /// Build a planner over one key/value store holding both entries
    pub fn with_store(store: Arc<dyn KeyValueStore>, missions_key: &str, order_key: &str) -> Self {
        Self::new(
            MissionSource::new(Arc::clone(&store), missions_key),
            Arc::new(KeyedOrderStore::new(store, order_key)),
        )
    }

    /// Planner over the configured on-disk store
    pub fn open(config: &Config) -> Self {
        let store = FileStore::new(config.data_path());
        Self::with_store(Arc::new(store), &config.store.missions_key, &config.store.order_key)
    }

    /// Derive the steps from the current missions and apply the manual order
    pub fn current_steps(&self) -> Vec<Step> {
        let steps = derive_steps(&self.missions.load());
        Reconciler::new(Arc::clone(&self.orders)).reconcile(steps)
    }

    /// Controller seeded with the current ordered list
    pub fn controller(&self) -> InteractionController {
        InteractionController::from_steps(Arc::clone(&self.orders), &self.current_steps())
    }

    /// Apply one gesture against the current list
    pub fn apply(&self, command: &ReorderCommand) -> Result<bool, StoreError> {
        self.controller().apply(command)
    }

    /// Persist a full on-screen order
    pub fn commit(&self, order: Vec<StepId>) -> Result<(), StoreError> {
        self.controller().commit(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    const MISSIONS: &str = r#"[
        {"id": "m1", "name": "Ore run", "type": "hauling", "cargos": [
            {"id": 1, "material": "Agricium", "pickupLocation": "Outpost (Pad 2)",
             "dropoffLocation": "Station", "containers": [{"size": 8, "status": "pending"}]},
            {"id": 2, "material": "Gold", "pickupLocation": "Mine",
             "dropoffLocation": "Port (Bay 1)", "containers": [{"size": 24, "status": "loaded"}]},
            {"id": 3, "material": "Tin", "pickupLocation": "Mine",
             "dropoffLocation": "Port", "containers": [{"size": 2, "status": "delivered"}]}
        ]}
    ]"#;

    fn planner() -> (MemoryStore, RoutePlanner) {
        let memory = MemoryStore::new();
        memory.insert("missions", MISSIONS);
        let planner = RoutePlanner::with_store(Arc::new(memory.clone()), "missions", "order");
        (memory, planner)
    }

    fn ids(steps: &[Step]) -> Vec<&str> {
        steps.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_current_steps_in_canonical_order() {
        let (memory, planner) = planner();

        let steps = planner.current_steps();

        assert_eq!(ids(&steps), vec!["pickup-1", "delivery-1", "delivery-2"]);
        assert!(steps[2].is_ready_for_delivery());
        assert_eq!(steps[2].location, "Port (Bay 1)");
        assert_eq!(
            memory.get("order").unwrap().as_deref(),
            Some(r#"["pickup-1","delivery-1","delivery-2"]"#)
        );
    }

    #[test]
    fn test_gesture_survives_refresh() {
        let (memory, planner) = planner();

        assert!(planner
            .apply(&ReorderCommand::MoveUp { id: "delivery-2".into() })
            .unwrap());
        assert_eq!(
            ids(&planner.current_steps()),
            vec!["pickup-1", "delivery-2", "delivery-1"]
        );

        // Cargo 1 gets loaded: its pickup disappears, the rest keeps its order
        let loaded = MISSIONS.replace(
            r#""size": 8, "status": "pending""#,
            r#""size": 8, "status": "loaded""#,
        );
        memory.insert("missions", &loaded);
        assert_eq!(ids(&planner.current_steps()), vec!["delivery-2", "delivery-1"]);
    }

    #[test]
    fn test_commit_then_pull() {
        let (_, planner) = planner();

        planner
            .commit(vec!["delivery-2".into(), "delivery-1".into(), "pickup-1".into()])
            .unwrap();

        assert_eq!(
            ids(&planner.current_steps()),
            vec!["delivery-2", "delivery-1", "pickup-1"]
        );
    }

    #[test]
    fn test_no_missions_is_empty_list() {
        let memory = MemoryStore::new();
        let planner = RoutePlanner::with_store(Arc::new(memory.clone()), "missions", "order");

        assert!(planner.current_steps().is_empty());
        assert_eq!(memory.write_count(), 0);
    }
}
