//! Simulation systems

pub mod interaction;
pub mod reproduction;
pub mod vitals;

pub use interaction::{resolve_interactions, InteractionReport};
pub use reproduction::try_reproduce;
