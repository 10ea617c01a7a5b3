//! Merge the persisted manual order with freshly derived steps

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::store::OrderStore;
use crate::types::{Step, StepId};

/// Applies the persisted order to a canonical step list and heals the stored
/// order when it has drifted.
pub struct Reconciler {
    store: Arc<dyn OrderStore>,
}

impl Reconciler {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Order `steps` by the persisted order.
    ///
    /// Never fails. When the resulting id sequence differs from the stored
    /// one it is written back; a failed write is logged and the ordered list
    /// is still returned.
    pub fn reconcile(&self, steps: Vec<Step>) -> Vec<Step> {
        let stored = self.store.load();
        let ordered = merge_order(steps, &stored);

        let ids: Vec<StepId> = ordered.iter().map(|s| s.id.clone()).collect();
        if ids != stored {
            let known: HashSet<&StepId> = ids.iter().collect();
            let dropped = stored.iter().filter(|id| !known.contains(id)).count();
            tracing::debug!(
                stored = stored.len(),
                emitted = ids.len(),
                dropped,
                "Step order drifted, writing back"
            );
            if let Err(e) = self.store.save(&ids) {
                tracing::warn!(error = %e, "Failed to persist reconciled step order");
            }
        }

        ordered
    }
}

/// Pure merge: stored ids that still exist keep their relative order, stale
/// and repeated ids are dropped, and steps missing from the stored order are
/// appended in canonical order.
pub fn merge_order(steps: Vec<Step>, stored: &[StepId]) -> Vec<Step> {
    let lookup: HashMap<StepId, usize> = steps
        .iter()
        .enumerate()
        .map(|(index, step)| (step.id.clone(), index))
        .collect();

    let mut slots: Vec<Option<Step>> = steps.into_iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(slots.len());

    for id in stored {
        if let Some(step) = lookup.get(id).and_then(|&index| slots[index].take()) {
            ordered.push(step);
        }
    }

    ordered.extend(slots.into_iter().flatten());
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{KeyValueStore, KeyedOrderStore, MemoryStore};
    use crate::types::StepKind;

    const KEY: &str = "order";

    fn step(raw: &str) -> Step {
        let id = StepId::from(raw);
        let (kind, cargo_id) = id.parts().unwrap();
        Step {
            kind,
            cargo_id: cargo_id.to_string(),
            id,
            mission_id: "m".to_string(),
            location: String::new(),
            mission_name: String::new(),
            mission_type: String::new(),
            material: String::new(),
            containers_text: String::new(),
            ready_for_delivery: (kind == StepKind::Delivery).then_some(false),
        }
    }

    fn steps(raw: &[&str]) -> Vec<Step> {
        raw.iter().map(|r| step(r)).collect()
    }

    fn reconciler(stored: Option<&str>) -> (MemoryStore, Reconciler) {
        let memory = MemoryStore::new();
        if let Some(stored) = stored {
            memory.insert(KEY, stored);
        }
        let store = KeyedOrderStore::new(Arc::new(memory.clone()), KEY);
        (memory, Reconciler::new(Arc::new(store)))
    }

    fn ids(steps: &[Step]) -> Vec<&str> {
        steps.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_stale_entries_dropped_and_store_rewritten() {
        let (memory, reconciler) = reconciler(Some(r#"["pickup-9","delivery-3"]"#));

        let ordered = reconciler.reconcile(steps(&["delivery-3"]));

        assert_eq!(ids(&ordered), vec!["delivery-3"]);
        assert_eq!(memory.get(KEY).unwrap().as_deref(), Some(r#"["delivery-3"]"#));
        assert_eq!(memory.write_count(), 1);
    }

    #[test]
    fn test_new_steps_appended_in_canonical_order() {
        let (memory, reconciler) = reconciler(Some(r#"["delivery-3"]"#));

        let ordered = reconciler.reconcile(steps(&["pickup-7", "delivery-3", "delivery-7"]));

        assert_eq!(ids(&ordered), vec!["delivery-3", "pickup-7", "delivery-7"]);
        assert_eq!(
            memory.get(KEY).unwrap().as_deref(),
            Some(r#"["delivery-3","pickup-7","delivery-7"]"#)
        );
    }

    #[test]
    fn test_manual_order_preserved() {
        let (memory, reconciler) = reconciler(Some(r#"["delivery-2","pickup-1","delivery-1"]"#));

        let ordered = reconciler.reconcile(steps(&["pickup-1", "delivery-1", "delivery-2"]));

        assert_eq!(ids(&ordered), vec!["delivery-2", "pickup-1", "delivery-1"]);
        assert_eq!(memory.write_count(), 0);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let (memory, reconciler) = reconciler(Some(r#"["pickup-9","delivery-2"]"#));
        let canonical = steps(&["pickup-1", "delivery-1", "delivery-2"]);

        let first = reconciler.reconcile(canonical.clone());
        let writes_after_first = memory.write_count();
        let second = reconciler.reconcile(canonical);

        assert_eq!(first, second);
        assert_eq!(writes_after_first, 1);
        assert_eq!(memory.write_count(), 1);
    }

    #[test]
    fn test_same_length_substitution_writes_back() {
        let (memory, reconciler) = reconciler(Some(r#"["pickup-9","delivery-3"]"#));

        let ordered = reconciler.reconcile(steps(&["pickup-4", "delivery-3"]));

        assert_eq!(ids(&ordered), vec!["delivery-3", "pickup-4"]);
        assert_eq!(
            memory.get(KEY).unwrap().as_deref(),
            Some(r#"["delivery-3","pickup-4"]"#)
        );
    }

    #[test]
    fn test_missing_order_uses_canonical_and_persists() {
        let (memory, reconciler) = reconciler(None);

        let ordered = reconciler.reconcile(steps(&["pickup-1", "delivery-1"]));

        assert_eq!(ids(&ordered), vec!["pickup-1", "delivery-1"]);
        assert_eq!(memory.write_count(), 1);
    }

    #[test]
    fn test_empty_steps_and_empty_order_write_nothing() {
        let (memory, reconciler) = reconciler(None);

        assert!(reconciler.reconcile(Vec::new()).is_empty());
        assert_eq!(memory.write_count(), 0);
    }

    #[test]
    fn test_repeated_stored_ids_collapse() {
        let ordered = merge_order(
            steps(&["pickup-1", "delivery-1"]),
            &[
                StepId::from("delivery-1"),
                StepId::from("delivery-1"),
                StepId::from("pickup-1"),
            ],
        );
        assert_eq!(ids(&ordered), vec!["delivery-1", "pickup-1"]);
    }
}
