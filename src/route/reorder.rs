//! Reordering gestures on the rendered step list.
//!
//! Gestures arrive as toolkit-neutral [`ReorderCommand`]s. A drag is resolved
//! to a [`ReorderCommand::MoveTo`] from the on-screen card geometry with
//! [`ReorderCommand::drop_at`], so nothing here depends on a rendering surface.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::store::{OrderStore, StoreError};
use crate::types::{Step, StepId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ReorderCommand {
    /// Swap with the step directly above
    MoveUp { id: StepId },
    /// Swap with the step directly below
    MoveDown { id: StepId },
    /// Insert at `index` of the list with `id` removed, clamped to its end
    MoveTo { id: StepId, index: usize },
}

/// Vertical extent of a rendered card
#[derive(Debug, Clone, PartialEq)]
pub struct CardBox {
    pub id: StepId,
    pub top: f64,
    pub height: f64,
}

impl CardBox {
    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

impl ReorderCommand {
    /// Resolve a drop of `dragged` at vertical position `y`.
    ///
    /// The target is the card (other than the dragged one) whose midpoint is
    /// below `y` and closest to it; the dragged step is inserted before that
    /// card, or at the end when no card qualifies. A midpoint exactly at `y`
    /// does not qualify.
    pub fn drop_at(dragged: &StepId, cards: &[CardBox], y: f64) -> Self {
        let others = cards.iter().filter(|card| &card.id != dragged);

        let mut target: Option<(usize, f64)> = None;
        let mut count = 0;
        for (index, card) in others.enumerate() {
            count += 1;
            let offset = y - card.midpoint();
            if offset < 0.0 && target.is_none_or(|(_, best)| offset > best) {
                target = Some((index, offset));
            }
        }

        ReorderCommand::MoveTo {
            id: dragged.clone(),
            index: target.map(|(index, _)| index).unwrap_or(count),
        }
    }

    pub fn id(&self) -> &StepId {
        match self {
            ReorderCommand::MoveUp { id }
            | ReorderCommand::MoveDown { id }
            | ReorderCommand::MoveTo { id, .. } => id,
        }
    }
}

/// Apply a command to an id order in place. Returns whether the order
/// changed; unknown ids and moves past either end leave it untouched.
pub fn apply_command(order: &mut Vec<StepId>, command: &ReorderCommand) -> bool {
    let Some(position) = order.iter().position(|id| id == command.id()) else {
        return false;
    };

    match command {
        ReorderCommand::MoveUp { .. } => {
            if position == 0 {
                return false;
            }
            order.swap(position, position - 1);
            true
        }
        ReorderCommand::MoveDown { .. } => {
            if position + 1 >= order.len() {
                return false;
            }
            order.swap(position, position + 1);
            true
        }
        ReorderCommand::MoveTo { index, .. } => {
            let id = order.remove(position);
            let target = (*index).min(order.len());
            order.insert(target, id);
            target != position
        }
    }
}

/// Turns gestures on the current on-screen order into persisted orders
pub struct InteractionController {
    store: Arc<dyn OrderStore>,
    order: Vec<StepId>,
}

impl InteractionController {
    pub fn new(store: Arc<dyn OrderStore>, order: Vec<StepId>) -> Self {
        Self {
            store,
            order: dedup(order),
        }
    }

    /// Start from a rendered step list
    pub fn from_steps(store: Arc<dyn OrderStore>, steps: &[Step]) -> Self {
        Self::new(store, steps.iter().map(|s| s.id.clone()).collect())
    }

    /// The current on-screen order
    pub fn order(&self) -> &[StepId] {
        &self.order
    }

    /// Apply a gesture and write the resulting order through to the store.
    ///
    /// Every gesture on a listed step writes, including boundary moves that
    /// leave the order as it was. Returns whether the order changed. A command
    /// for an id that is not listed is ignored and writes nothing.
    pub fn apply(&mut self, command: &ReorderCommand) -> Result<bool, StoreError> {
        if !self.order.contains(command.id()) {
            tracing::debug!(command = ?command, "Ignoring reorder of unlisted step");
            return Ok(false);
        }

        let changed = apply_command(&mut self.order, command);
        tracing::debug!(command = ?command, changed, "Applied reorder");
        self.store.save(&self.order)?;
        Ok(changed)
    }

    /// Replace the order with the full on-screen arrangement and persist it
    pub fn commit(&mut self, order: Vec<StepId>) -> Result<(), StoreError> {
        self.order = dedup(order);
        self.store.save(&self.order)
    }
}

fn dedup(order: Vec<StepId>) -> Vec<StepId> {
    let mut seen = HashSet::new();
    order.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
