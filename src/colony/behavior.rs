//! Cell behavior framework
//!
//! Every kind implements [`CellBehavior`]. The strategy is looked up once,
//! when the agent is built, and the population invokes it uniformly through
//! [`CellBehavior::update`].

use ahash::AHashSet;
use glam::Vec2;
use rand_chacha::ChaCha8Rng;

use crate::colony::agent::{Agent, KindState};
use crate::colony::events::{BirthCause, DeathCause};
use crate::colony::species::{
    AmoebaBehavior, AntibodyBehavior, BacteriumBehavior, CiliateBehavior, FlagellateBehavior,
    MuscleBehavior, PathogenBehavior,
};
use crate::colony::systems::vitals;
use crate::core::config::SimulationConfig;
use crate::core::types::{AgentId, Kind};

/// Request for a new agent; the population assigns the id and scatters the position
#[derive(Clone, Debug, PartialEq)]
pub struct BirthRequest {
    pub kind: Kind,
    pub origin: Vec2,
    pub cause: BirthCause,
}

/// Health damage dealt by one agent to another during its update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Strike {
    pub target: AgentId,
    pub damage: f32,
}

/// Side effects of one agent's update that touch the rest of the population
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Effects {
    pub births: Vec<BirthRequest>,
    pub strikes: Vec<Strike>,
    /// Set when an antibody locks onto a new target this tick
    pub engaged: Option<AgentId>,
}

/// Outcome of one agent's update
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    Alive(Effects),
    Died(DeathCause),
}

/// Read-only view of every other agent, in collection order
///
/// Agents that already died this tick are hidden.
#[derive(Clone, Copy)]
pub struct Neighborhood<'a> {
    before: &'a [Agent],
    after: &'a [Agent],
    fallen: &'a AHashSet<AgentId>,
}

impl<'a> Neighborhood<'a> {
    pub fn new(before: &'a [Agent], after: &'a [Agent], fallen: &'a AHashSet<AgentId>) -> Self {
        Self { before, after, fallen }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Agent> + 'a {
        let (before, after, fallen) = (self.before, self.after, self.fallen);
        before
            .iter()
            .chain(after.iter())
            .filter(move |agent| !fallen.contains(&agent.id))
    }

    pub fn get(&self, id: AgentId) -> Option<&'a Agent> {
        self.iter().find(|agent| agent.id == id)
    }

    /// Pathogens that are still present and have health left
    pub fn live_pathogens(&self) -> impl Iterator<Item = &'a Agent> + 'a {
        self.iter()
            .filter(|agent| agent.kind == Kind::Pathogen && agent.has_health_left())
    }
}

/// Everything a strategy may consult or consume while updating one agent
pub struct StepContext<'a> {
    pub config: &'a SimulationConfig,
    pub rng: &'a mut ChaCha8Rng,
    /// Simulation clock at the start of this tick (ms)
    pub clock_ms: f64,
    /// Current population including offspring already queued this tick
    pub population: usize,
    pub neighbors: Neighborhood<'a>,
}

/// Trait for kind-specific cell behavior
pub trait CellBehavior: Send + Sync + std::fmt::Debug {
    fn kind(&self) -> Kind;

    /// Kind-specific state for a newborn
    fn initial_state(&self, _config: &SimulationConfig) -> KindState {
        KindState::Plain
    }

    /// Physical update for one tick
    fn step(&self, agent: &mut Agent, ctx: &mut StepContext<'_>) -> Effects;

    /// Age the agent, then either report natural death or run the
    /// kind strategy followed by depth motion
    fn update(&self, agent: &mut Agent, ctx: &mut StepContext<'_>) -> Step {
        vitals::age(agent, ctx.config);
        if let Some(cause) = agent.natural_death() {
            return Step::Died(cause);
        }

        let effects = self.step(agent, ctx);
        vitals::drift_depth(agent, ctx.config.depth_max);
        Step::Alive(effects)
    }
}

static AMOEBA: AmoebaBehavior = AmoebaBehavior;
static FLAGELLATE: FlagellateBehavior = FlagellateBehavior;
static MUSCLE: MuscleBehavior = MuscleBehavior;
static BACTERIUM: BacteriumBehavior = BacteriumBehavior;
static CILIATE: CiliateBehavior = CiliateBehavior;
static ANTIBODY: AntibodyBehavior = AntibodyBehavior;
static PATHOGEN: PathogenBehavior = PathogenBehavior;

/// Get the behavior handler for a kind
pub fn behavior_for(kind: Kind) -> &'static dyn CellBehavior {
    match kind {
        Kind::Amoeba => &AMOEBA,
        Kind::Flagellate => &FLAGELLATE,
        Kind::Muscle => &MUSCLE,
        Kind::Bacterium => &BACTERIUM,
        Kind::Ciliate => &CILIATE,
        Kind::Antibody => &ANTIBODY,
        Kind::Pathogen => &PATHOGEN,
    }
}
