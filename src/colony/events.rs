//! Lifecycle events reported by a tick

use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, Kind, Tick};

/// How an agent came to exist
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BirthCause {
    /// Part of the starting population
    Seeded,
    /// Offspring from the reproduction policy
    Reproduction,
    /// Pathogen division outside the reproduction policy
    Division,
    /// Injected by a spawner between ticks
    Spawned,
}

/// Why an agent was removed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    OldAge,
    Exhausted,
    /// Health reached zero
    Killed,
}

/// Events generated during a tick
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SimulationEvent {
    Born {
        id: AgentId,
        kind: Kind,
        parent: Option<AgentId>,
        cause: BirthCause,
        tick: Tick,
    },
    Died {
        id: AgentId,
        kind: Kind,
        cause: DeathCause,
        tick: Tick,
    },
    /// An antibody locked onto a new pathogen
    TargetAcquired {
        antibody: AgentId,
        pathogen: AgentId,
        tick: Tick,
    },
    /// Summary of the interaction pass
    Contacts {
        tick: Tick,
        contacts: u32,
        transfers: u32,
        combat_hits: u32,
    },
}
