//! Derive the canonical step list from mission snapshots

use std::collections::HashSet;

use crate::format::{location_label, summarize_containers};
use crate::types::{Cargo, CargoStatus, Mission, Step, StepId, StepKind};

/// Build the canonical step list: mission order, then cargo order, pickup
/// before delivery.
///
/// Delivered cargo yields nothing, pending cargo yields a pickup and a
/// not-yet-ready delivery, loaded cargo yields only a ready delivery. When two
/// cargos share an id, only the first one contributes steps.
pub fn derive_steps(missions: &[Mission]) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut seen: HashSet<StepId> = HashSet::new();

    for mission in missions {
        for cargo in &mission.cargos {
            for step in cargo_steps(mission, cargo) {
                if seen.insert(step.id.clone()) {
                    steps.push(step);
                } else {
                    tracing::debug!(step_id = %step.id, mission = %mission.id, "Skipping duplicate step");
                }
            }
        }
    }

    tracing::debug!(missions = missions.len(), steps = steps.len(), "Derived route steps");
    steps
}

fn cargo_steps(mission: &Mission, cargo: &Cargo) -> Vec<Step> {
    match cargo.status() {
        CargoStatus::Delivered => Vec::new(),
        CargoStatus::Pending => vec![
            build_step(mission, cargo, StepKind::Pickup),
            build_step(mission, cargo, StepKind::Delivery),
        ],
        CargoStatus::Loaded => vec![build_step(mission, cargo, StepKind::Delivery)],
    }
}

fn build_step(mission: &Mission, cargo: &Cargo, kind: StepKind) -> Step {
    let (location, ready_for_delivery) = match kind {
        StepKind::Pickup => (&cargo.pickup_location, None),
        StepKind::Delivery => (
            &cargo.dropoff_location,
            Some(cargo.status() == CargoStatus::Loaded),
        ),
    };

    Step {
        id: StepId::new(kind, &cargo.id),
        kind,
        mission_id: mission.id.clone(),
        cargo_id: cargo.id.clone(),
        location: location_label(location),
        mission_name: mission.name.clone(),
        mission_type: mission.mission_type.clone(),
        material: cargo.material.clone(),
        containers_text: summarize_containers(&cargo.containers),
        ready_for_delivery,
    }
}
