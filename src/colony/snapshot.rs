//! Read-only agent views for renderers

use serde::{Deserialize, Serialize};

use crate::colony::agent::{Agent, Pseudopod};
use crate::core::config::SimulationConfig;
use crate::core::types::{AgentId, Kind, Vec3};

/// Depth at which a cell would shrink to nothing
const DEPTH_FALLOFF: f32 = 200.0;

/// Perspective factor for a depth: 1.0 at the surface, 0.5 at z = 100
pub fn depth_scale(z: f32) -> f32 {
    1.0 - z / DEPTH_FALLOFF
}

/// Everything a renderer needs to draw one agent
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub id: AgentId,
    pub kind: Kind,
    /// Hex color, e.g. `#4169E1`
    pub color: String,
    pub position: Vec3,
    pub depth_scale: f32,
    pub size: f32,
    /// `size * depth_scale`
    pub radius: f32,
    pub health: Option<f32>,
    pub energy: f32,
    pub fighting: bool,
    /// Amoeba extensions, empty for other kinds
    pub pseudopods: Vec<Pseudopod>,
    /// Muscle contraction, `None` for other kinds
    pub contraction_phase: Option<f32>,
}

impl AgentView {
    pub fn from_agent(agent: &Agent, config: &SimulationConfig) -> Self {
        let scale = depth_scale(agent.position.z);
        Self {
            id: agent.id,
            kind: agent.kind,
            color: config.profile(agent.kind).color.clone(),
            position: agent.position,
            depth_scale: scale,
            size: agent.size,
            radius: agent.size * scale,
            health: agent.health,
            energy: agent.energy,
            fighting: agent.is_fighting(),
            pseudopods: agent
                .amoeba_state()
                .map(|s| s.pseudopods.clone())
                .unwrap_or_default(),
            contraction_phase: agent.muscle_state().map(|s| s.contraction_phase),
        }
    }
}
