//! Cell Colony Simulation
//!
//! Agents of seven kinds move on a bounded plane with a depth axis, touch,
//! trade energy, fight (antibodies against pathogens), reproduce and die.
//! One [`Population`] owns every agent; renderers read [`AgentView`]s and
//! spawners append through a [`Spawner`].

pub mod agent;
pub mod behavior;
pub mod census;
pub mod events;
pub mod output;
pub mod population;
pub mod simulation;
pub mod snapshot;
pub mod spawn;
pub mod species;
pub mod systems;

pub use agent::{Agent, KindState};
pub use behavior::{behavior_for, CellBehavior};
pub use census::Census;
pub use events::{BirthCause, DeathCause, SimulationEvent};
pub use output::SimulationOutput;
pub use population::{Population, Spawner};
pub use simulation::{run, RunOptions};
pub use snapshot::AgentView;
pub use spawn::SpawnScheduler;
