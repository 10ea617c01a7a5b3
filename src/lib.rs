//! route-manual - manually ordered pickup/delivery route list
//!
//! Steps are derived from a mission snapshot on every pass; the user's manual
//! order is persisted separately and reconciled against each fresh derivation
//! so reordering survives data refreshes.

pub mod config;
pub mod format;
pub mod listing;
pub mod logging;
pub mod route;
pub mod scheduler;
pub mod steps;
pub mod store;
pub mod types;

pub use route::{InteractionController, Reconciler, ReorderCommand, RoutePlanner};
pub use steps::derive_steps;
pub use store::{FileStore, KeyValueStore, KeyedOrderStore, MemoryStore, OrderStore};
pub use types::{Mission, Step, StepId, StepKind};
