//! Pure display formatting for locations and container manifests.

mod containers;
mod location;

pub use containers::{summarize_containers, UNSPECIFIED};
pub use location::{location_label, Location};
