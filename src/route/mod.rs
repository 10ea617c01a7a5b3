//! Ordered route list: reconciliation of the manual order and reordering
//! gestures, plus the planner tying them to the stores.

mod planner;
mod reconcile;
mod reorder;

pub use planner::RoutePlanner;
pub use reconcile::{merge_order, Reconciler};
pub use reorder::{apply_command, CardBox, InteractionController, ReorderCommand};
