use proptest::prelude::*;
use route_manual::types::{Cargo, Container, ContainerStatus, Mission};
use route_manual::StepId;

/// Strategy for container statuses
pub fn container_status_strategy() -> impl Strategy<Value = ContainerStatus> {
    prop_oneof![
        Just(ContainerStatus::Pending),
        Just(ContainerStatus::Loaded),
        Just(ContainerStatus::Delivered),
    ]
}

/// Strategy for a cargo with a given id and 0-4 containers
pub fn cargo_strategy(id: u32) -> impl Strategy<Value = Cargo> {
    prop::collection::vec(
        (prop::option::of((1u32..=32).prop_map(f64::from)), container_status_strategy()),
        0..4,
    )
    .prop_map(move |containers| Cargo {
        id: id.to_string(),
        material: "Ore".to_string(),
        pickup_location: "Outpost (Pad 1)".to_string(),
        dropoff_location: "Station".to_string(),
        containers: containers
            .into_iter()
            .map(|(size, status)| Container { size, status })
            .collect(),
    })
}

/// Strategy for one mission holding cargos with distinct ids below 40
pub fn missions_strategy() -> impl Strategy<Value = Vec<Mission>> {
    prop::collection::btree_set(0u32..40, 0..12)
        .prop_flat_map(|ids| {
            ids.into_iter()
                .map(cargo_strategy)
                .collect::<Vec<_>>()
        })
        .prop_map(|cargos| {
            vec![Mission {
                id: "m1".to_string(),
                name: "Generated".to_string(),
                mission_type: "hauling".to_string(),
                cargos,
            }]
        })
}

/// Strategy for step ids, including ones that will be stale
pub fn step_id_strategy() -> impl Strategy<Value = StepId> {
    (prop_oneof![Just("pickup"), Just("delivery")], 0u32..60)
        .prop_map(|(prefix, cargo)| StepId::from(format!("{prefix}-{cargo}")))
}

/// Strategy for a persisted order; may contain stale and repeated ids
pub fn stored_order_strategy() -> impl Strategy<Value = Vec<StepId>> {
    prop::collection::vec(step_id_strategy(), 0..25)
}
