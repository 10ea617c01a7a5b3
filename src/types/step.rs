//! Route steps and their identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Pickup,
    Delivery,
}

impl StepKind {
    /// Identifier prefix for this kind (`pickup` / `delivery`)
    pub fn prefix(self) -> &'static str {
        match self {
            StepKind::Pickup => "pickup",
            StepKind::Delivery => "delivery",
        }
    }

    /// Human label used by the text listing
    pub fn label(self) -> &'static str {
        match self {
            StepKind::Pickup => "Pickup",
            StepKind::Delivery => "Delivery",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Deterministic step identifier, `"{kind}-{cargo_id}"`.
///
/// This is the join key between derived steps and the persisted order. Any
/// string read back from the order store is accepted as an id; ids that no
/// longer match a derived step are simply dropped during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(String);

impl StepId {
    pub fn new(kind: StepKind, cargo_id: &str) -> Self {
        Self(format!("{}-{}", kind.prefix(), cargo_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the id back into its kind and cargo id, if it is well formed
    #[cfg(test)]
    pub(crate) fn parts(&self) -> Option<(StepKind, &str)> {
        [StepKind::Pickup, StepKind::Delivery]
            .into_iter()
            .find_map(|kind| {
                self.0
                    .strip_prefix(kind.prefix())
                    .and_then(|rest| rest.strip_prefix('-'))
                    .map(|cargo_id| (kind, cargo_id))
            })
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StepId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for StepId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// One actionable pickup or delivery, derived fresh on every pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: StepId,
    #[serde(rename = "type")]
    pub kind: StepKind,
    pub mission_id: String,
    pub cargo_id: String,
    /// Display label of the pickup or dropoff location
    pub location: String,
    pub mission_name: String,
    pub mission_type: String,
    pub material: String,
    pub containers_text: String,
    /// Only present on deliveries: true once every container is loaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_for_delivery: Option<bool>,
}

impl Step {
    pub fn is_ready_for_delivery(&self) -> bool {
        self.ready_for_delivery.unwrap_or(false)
    }
}
