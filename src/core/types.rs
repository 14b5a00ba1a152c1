//! Core type definitions used throughout the codebase

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::core::error::SimError;

pub use glam::Vec3;

/// Unique identifier for agents, stable for the agent's lifetime
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[display(fmt = "agent#{}", _0)]
pub struct AgentId(pub u64);

impl AgentId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Simulation tick counter
pub type Tick = u64;

/// Cell kind enumeration
///
/// Fixed for an agent's lifetime. Selects behavior, drawing and the
/// per-kind profile defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Kind {
    Amoeba,
    Flagellate,
    Muscle,
    Bacterium,
    Ciliate,
    Antibody,
    Pathogen,
}

impl Kind {
    pub const ALL: [Kind; 7] = [
        Kind::Amoeba,
        Kind::Flagellate,
        Kind::Muscle,
        Kind::Bacterium,
        Kind::Ciliate,
        Kind::Antibody,
        Kind::Pathogen,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Kind::Amoeba => "amoeba",
            Kind::Flagellate => "flagellate",
            Kind::Muscle => "muscle",
            Kind::Bacterium => "bacterium",
            Kind::Ciliate => "ciliate",
            Kind::Antibody => "antibody",
            Kind::Pathogen => "pathogen",
        }
    }

    /// Position in [`Kind::ALL`], usable as a dense array index
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Kind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Kind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SimError::UnknownKind(s.to_string()))
    }
}

/// Planar (x/y) distance between two points, ignoring depth
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}
