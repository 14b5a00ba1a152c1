//! Microcosm - agent-based cell colony simulation

pub mod colony;
pub mod core;
