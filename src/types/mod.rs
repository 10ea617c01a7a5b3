//! Domain types: mission snapshots in, route steps out.

mod mission;
mod step;

pub use mission::{Cargo, CargoStatus, Container, ContainerStatus, Mission};
pub use step::{Step, StepId, StepKind};
