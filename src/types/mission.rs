//! Mission snapshot types read from the external mission store.
//!
//! The store is written by another application, so decoding is lenient:
//! ids may be JSON strings or numbers, lists decode entry by entry (a broken
//! cargo or container is dropped, a non-array list is empty) and unknown
//! container statuses are kept as [`ContainerStatus::Unknown`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// A mission with its cargo manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub mission_type: String,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub cargos: Vec<Cargo>,
}

/// A single cargo entry: one material moved from a pickup to a dropoff
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cargo {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub material: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub pickup_location: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub dropoff_location: String,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub containers: Vec<Container>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Container size in SCU
    #[serde(default, deserialize_with = "lenient_size")]
    pub size: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ContainerStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerStatus {
    #[default]
    Pending,
    Loaded,
    Delivered,
    /// Any status string this crate does not know; counts as not loaded
    #[serde(other)]
    Unknown,
}

impl ContainerStatus {
    /// Whether the container is on board or already dropped off
    pub fn is_loaded(self) -> bool {
        matches!(self, ContainerStatus::Loaded | ContainerStatus::Delivered)
    }
}

/// Overall cargo status, derived from its containers and never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CargoStatus {
    Pending,
    Loaded,
    Delivered,
}

impl fmt::Display for CargoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CargoStatus::Pending => write!(f, "pending"),
            CargoStatus::Loaded => write!(f, "loaded"),
            CargoStatus::Delivered => write!(f, "delivered"),
        }
    }
}

impl Cargo {
    /// Compute the overall status from the container statuses.
    ///
    /// A cargo without containers is always pending.
    pub fn status(&self) -> CargoStatus {
        if self.containers.is_empty() {
            return CargoStatus::Pending;
        }
        if self
            .containers
            .iter()
            .all(|c| c.status == ContainerStatus::Delivered)
        {
            return CargoStatus::Delivered;
        }
        if self.containers.iter().all(|c| c.status.is_loaded()) {
            CargoStatus::Loaded
        } else {
            CargoStatus::Pending
        }
    }
}

/// Accept strings and numbers, anything else becomes empty text
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// Any finite number, or a string holding one
fn lenient_size<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let size = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(size.filter(|v| v.is_finite()))
}

fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(Value::Array(entries)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<T>(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(
                    index,
                    entry = std::any::type_name::<T>(),
                    error = %e,
                    "Skipping malformed entry"
                );
                None
            }
        })
        .collect())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
