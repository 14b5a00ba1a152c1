//! Agent - one simulated cell and its kind-specific state

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::colony::behavior::{behavior_for, CellBehavior};
use crate::colony::events::DeathCause;
use crate::core::config::SimulationConfig;
use crate::core::types::{AgentId, Kind, Vec3};

/// Uniform draw in [-2, 2), the base of every random heading and scatter
pub fn random_speed<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    (rng.gen::<f32>() - 0.5) * 4.0
}

/// A transient amoeba extension, drawn relative to the cell center
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pseudopod {
    pub offset: Vec2,
    pub age: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AmoebaState {
    pub pseudopods: Vec<Pseudopod>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MuscleState {
    pub contraction_phase: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CiliateState {
    /// +1.0 or -1.0
    pub direction_sign: f32,
}

impl Default for CiliateState {
    fn default() -> Self {
        Self { direction_sign: 1.0 }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AntibodyState {
    /// Pursued pathogen; a lookup key only, re-validated every tick
    pub target: Option<AgentId>,
    pub fighting: bool,
}

/// Kind-specific auxiliary state
#[derive(Clone, Debug, PartialEq)]
pub enum KindState {
    Amoeba(AmoebaState),
    Muscle(MuscleState),
    Ciliate(CiliateState),
    Antibody(AntibodyState),
    Plain,
}

/// A single cell agent
#[derive(Clone, Debug)]
pub struct Agent {
    pub id: AgentId,
    pub kind: Kind,

    // Physical state
    pub position: Vec3,
    pub velocity: Vec3,
    pub size: f32,
    pub base_speed: f32,
    pub detection_range: f32,

    // Vitals
    pub age: f32,
    pub energy: f32,
    /// `None` for kinds that never fight
    pub health: Option<f32>,
    pub max_age: f32,

    // Reproduction
    pub reproduction_rate: f32,
    pub last_reproduction_age: f32,

    pub state: KindState,

    behavior: &'static dyn CellBehavior,
}

impl Agent {
    /// Build an agent with explicit physical state and profile defaults for its kind
    pub fn new(id: AgentId, kind: Kind, position: Vec3, velocity: Vec3, config: &SimulationConfig) -> Self {
        let profile = config.profile(kind);
        let behavior = behavior_for(kind);

        Self {
            id,
            kind,
            position,
            velocity,
            size: profile.size,
            base_speed: profile.base_speed,
            detection_range: profile.detection_range,
            age: 0.0,
            energy: config.starting_energy,
            health: profile.starting_health,
            max_age: profile.max_age,
            reproduction_rate: profile.reproduction_rate,
            last_reproduction_age: 0.0,
            state: behavior.initial_state(config),
            behavior,
        }
    }

    /// Build a newborn at (x, y) with random depth and a random heading
    pub fn spawn<R: Rng + ?Sized>(
        id: AgentId,
        kind: Kind,
        at: Vec2,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> Self {
        let speed = config.profile(kind).base_speed;
        let position = Vec3::new(at.x, at.y, rng.gen::<f32>() * config.depth_max);
        let velocity = Vec3::new(
            random_speed(rng) * speed,
            random_speed(rng) * speed,
            random_speed(rng) * speed,
        );
        Self::new(id, kind, position, velocity, config)
    }

    pub fn behavior(&self) -> &'static dyn CellBehavior {
        self.behavior
    }

    /// True while health (if the kind has any) is above zero
    pub fn has_health_left(&self) -> bool {
        self.health.map_or(true, |h| h > 0.0)
    }

    /// Natural death check: old age, exhaustion, or lost health
    pub fn natural_death(&self) -> Option<DeathCause> {
        if self.age > self.max_age {
            Some(DeathCause::OldAge)
        } else if self.energy <= 0.0 {
            Some(DeathCause::Exhausted)
        } else if !self.has_health_left() {
            Some(DeathCause::Killed)
        } else {
            None
        }
    }

    /// Reduce health, clamped at zero. No-op for kinds without health.
    pub fn take_damage(&mut self, amount: f32) {
        if let Some(health) = self.health.as_mut() {
            *health = (*health - amount).max(0.0);
        }
    }

    pub fn translate_planar(&mut self) {
        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;
    }

    pub fn amoeba_state(&self) -> Option<&AmoebaState> {
        match &self.state {
            KindState::Amoeba(s) => Some(s),
            _ => None,
        }
    }

    pub fn amoeba_state_mut(&mut self) -> Option<&mut AmoebaState> {
        match &mut self.state {
            KindState::Amoeba(s) => Some(s),
            _ => None,
        }
    }

    pub fn muscle_state(&self) -> Option<&MuscleState> {
        match &self.state {
            KindState::Muscle(s) => Some(s),
            _ => None,
        }
    }

    pub fn muscle_state_mut(&mut self) -> Option<&mut MuscleState> {
        match &mut self.state {
            KindState::Muscle(s) => Some(s),
            _ => None,
        }
    }

    pub fn ciliate_state_mut(&mut self) -> Option<&mut CiliateState> {
        match &mut self.state {
            KindState::Ciliate(s) => Some(s),
            _ => None,
        }
    }

    pub fn antibody_state(&self) -> Option<&AntibodyState> {
        match &self.state {
            KindState::Antibody(s) => Some(s),
            _ => None,
        }
    }

    pub fn antibody_state_mut(&mut self) -> Option<&mut AntibodyState> {
        match &mut self.state {
            KindState::Antibody(s) => Some(s),
            _ => None,
        }
    }

    /// Whether an antibody is currently in contact with its target
    pub fn is_fighting(&self) -> bool {
        self.antibody_state().map_or(false, |s| s.fighting)
    }
}
