//! Spawn scheduler - keeps the immune fight going between ticks
//!
//! At jittered intervals it tops up pathogens while antibodies outnumber
//! them, and tops up antibodies while they are below a floor. It only ever
//! appends through a [`Spawner`], never touching existing agents.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::colony::population::Spawner;
use crate::core::config::SpawnerConfig;
use crate::core::types::{AgentId, Kind};

pub struct SpawnScheduler {
    config: SpawnerConfig,
    rng: ChaCha8Rng,
    next_due_ms: f64,
}

impl SpawnScheduler {
    /// A scheduler whose first firing falls one interval after time zero
    pub fn new(config: SpawnerConfig, seed: u64) -> Self {
        let mut scheduler = Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_due_ms: 0.0,
        };
        scheduler.next_due_ms = scheduler.next_interval();
        scheduler
    }

    /// Simulated time of the next firing
    pub fn next_due_ms(&self) -> f64 {
        self.next_due_ms
    }

    fn next_interval(&mut self) -> f64 {
        let SpawnerConfig { min_interval_ms, max_interval_ms, .. } = self.config;
        if max_interval_ms > min_interval_ms {
            self.rng.gen_range(min_interval_ms..max_interval_ms)
        } else {
            min_interval_ms
        }
    }

    /// Fire if due at `now_ms`, returning the agents that were added
    pub fn poll(&mut self, now_ms: f64, spawner: &mut Spawner<'_>) -> Vec<(AgentId, Kind)> {
        if now_ms < self.next_due_ms {
            return Vec::new();
        }
        self.next_due_ms = now_ms + self.next_interval();
        self.fire(spawner)
    }

    /// Apply the balance rules once, regardless of timing
    pub fn fire(&mut self, spawner: &mut Spawner<'_>) -> Vec<(AgentId, Kind)> {
        let mut added = Vec::new();
        let census = spawner.census();
        if census.total() >= spawner.config().population_cap {
            return added;
        }

        let pathogens = census.get(Kind::Pathogen);
        let antibodies = census.get(Kind::Antibody);

        if pathogens < antibodies {
            if let Some(id) = spawner.add_agent(Kind::Pathogen, None) {
                added.push((id, Kind::Pathogen));
            }
        }
        if antibodies < self.config.antibody_floor {
            if let Some(id) = spawner.add_agent(Kind::Antibody, None) {
                added.push((id, Kind::Antibody));
            }
        }

        added
    }
}
