pub mod config;
pub mod error;
pub mod types;

pub use config::{BehaviorConfig, KindCounts, KindProfile, KindProfiles, SimulationConfig, SpawnerConfig};
pub use error::{Result, SimError};
pub use types::{AgentId, Tick};
