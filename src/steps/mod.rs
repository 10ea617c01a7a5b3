//! Step derivation from mission snapshots

mod deriver;

pub use deriver::derive_steps;
