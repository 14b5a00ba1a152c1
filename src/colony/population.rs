//! Population - owns the agent arena and runs the tick
//!
//! A tick runs strictly in this order:
//! 1. prune pathogens whose health is gone
//! 2. update every agent in collection order (vitals, strategy, depth,
//!    reproduction), applying strikes immediately and queueing offspring
//! 3. remove agents that died naturally during the update
//! 4. resolve pairwise interactions between the survivors
//! 5. merge the queued offspring
//!
//! Offspring join only at the end, so they are first updated next tick.

use ahash::{AHashMap, AHashSet};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::colony::agent::{random_speed, Agent};
use crate::colony::behavior::{BirthRequest, Neighborhood, Step, StepContext, Strike};
use crate::colony::census::Census;
use crate::colony::events::{BirthCause, DeathCause, SimulationEvent};
use crate::colony::snapshot::AgentView;
use crate::colony::systems::{reproduction, resolve_interactions};
use crate::core::config::{KindCounts, SimulationConfig};
use crate::core::error::Result;
use crate::core::types::{AgentId, Kind, Tick};

/// The agent arena plus everything needed to advance it deterministically
pub struct Population {
    config: SimulationConfig,
    agents: Vec<Agent>,
    rng: ChaCha8Rng,
    current_tick: Tick,
    clock_ms: f64,
    next_agent_id: u64,
}

/// Offspring waiting to be merged at the end of the tick
struct QueuedBirth {
    request: BirthRequest,
    parent: AgentId,
}

impl Population {
    /// An empty population
    pub fn new(config: SimulationConfig, seed: u64) -> Self {
        Self {
            config,
            agents: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            current_tick: 0,
            clock_ms: 0.0,
            next_agent_id: 1,
        }
    }

    /// Seed a population with `counts` agents per kind at random positions
    pub fn seed(config: SimulationConfig, seed: u64, counts: &KindCounts) -> Self {
        let mut population = Self::new(config, seed);
        for kind in Kind::ALL {
            for _ in 0..counts.get(kind) {
                population.add_agent(kind, None);
            }
        }
        tracing::info!(
            "Seeded population with {} agents (seed {})",
            population.len(),
            seed
        );
        population
    }

    /// Seed from the config's `initial_population` table
    pub fn from_config(config: SimulationConfig, seed: u64) -> Self {
        let counts = config.initial_population;
        Self::seed(config, seed, &counts)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    /// Simulated milliseconds elapsed
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.id == id)
    }

    /// Mutable access to one agent between ticks, for scenario setup
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|agent| agent.id == id)
    }

    pub fn census(&self) -> Census {
        self.agents.iter().map(|agent| agent.kind).collect()
    }

    /// Read-only views in collection order, for renderers
    pub fn snapshot(&self) -> Vec<AgentView> {
        self.agents
            .iter()
            .map(|agent| AgentView::from_agent(agent, &self.config))
            .collect()
    }

    /// Append-only handle for spawners
    pub fn spawner(&mut self) -> Spawner<'_> {
        Spawner { population: self }
    }

    fn next_id(&mut self) -> AgentId {
        let id = AgentId(self.next_agent_id);
        self.next_agent_id += 1;
        id
    }

    fn random_point(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.gen::<f32>() * self.config.plane_width,
            self.rng.gen::<f32>() * self.config.plane_height,
        )
    }

    fn clamp_to_plane(&self, at: Vec2) -> Vec2 {
        at.clamp(
            Vec2::ZERO,
            Vec2::new(self.config.plane_width, self.config.plane_height),
        )
    }

    /// Append a fresh agent; suppressed (returns `None`) at the hard cap
    ///
    /// Without a position the agent appears at a random point of the plane.
    /// Positions off the plane are clamped onto it; non-finite ones are
    /// replaced by a random point.
    pub fn add_agent(&mut self, kind: Kind, position: Option<Vec2>) -> Option<AgentId> {
        if self.agents.len() >= self.config.population_cap {
            tracing::debug!("Population at cap ({}), {} not added", self.config.population_cap, kind);
            return None;
        }

        let at = match position {
            Some(at) if at.is_finite() => self.clamp_to_plane(at),
            Some(at) => {
                tracing::warn!("Non-finite position {:?} for new {}, placing at random", at, kind);
                self.random_point()
            }
            None => self.random_point(),
        };
        let id = self.next_id();
        let agent = Agent::spawn(id, kind, at, &self.config, &mut self.rng);
        self.agents.push(agent);
        Some(id)
    }

    /// Same as [`Population::add_agent`], with the kind given by name
    pub fn add_agent_named(&mut self, kind: &str, position: Option<Vec2>) -> Result<Option<AgentId>> {
        let kind: Kind = kind.parse()?;
        Ok(self.add_agent(kind, position))
    }

    /// Remove every pathogen with no health left
    fn prune_fallen_pathogens(&mut self, events: &mut Vec<SimulationEvent>) {
        let tick = self.current_tick;
        self.agents.retain(|agent| {
            let fallen = agent.kind == Kind::Pathogen && !agent.has_health_left();
            if fallen {
                tracing::debug!("Pruned {} ({})", agent.id, agent.kind);
                events.push(SimulationEvent::Died {
                    id: agent.id,
                    kind: agent.kind,
                    cause: DeathCause::Killed,
                    tick,
                });
            }
            !fallen
        });
    }

    /// Apply a strike to its target unless the target already left
    fn apply_strike(&mut self, strike: Strike, index: &AHashMap<AgentId, usize>, fallen: &AHashSet<AgentId>) {
        if fallen.contains(&strike.target) {
            return;
        }
        if let Some(&slot) = index.get(&strike.target) {
            self.agents[slot].take_damage(strike.damage);
        }
    }

    /// Advance the simulation by one tick
    ///
    /// Returns the lifecycle events of this tick; the resulting population
    /// is read through [`Population::snapshot`].
    pub fn tick(&mut self) -> Vec<SimulationEvent> {
        let mut events = Vec::new();
        let tick = self.current_tick;

        // 1. Prune
        self.prune_fallen_pathogens(&mut events);

        // 2. Update pass
        let index: AHashMap<AgentId, usize> = self
            .agents
            .iter()
            .enumerate()
            .map(|(slot, agent)| (agent.id, slot))
            .collect();
        let mut census = self.census();
        let mut fallen: AHashSet<AgentId> = AHashSet::new();
        let mut queued: Vec<QueuedBirth> = Vec::new();

        for slot in 0..self.agents.len() {
            let (before, rest) = self.agents.split_at_mut(slot);
            let Some((agent, after)) = rest.split_first_mut() else {
                break;
            };

            let mut ctx = StepContext {
                config: &self.config,
                rng: &mut self.rng,
                clock_ms: self.clock_ms,
                population: census.total(),
                neighbors: Neighborhood::new(before, after, &fallen),
            };

            let behavior = agent.behavior();
            let effects = match behavior.update(agent, &mut ctx) {
                Step::Died(cause) => {
                    tracing::debug!("{} ({}) died: {:?}", agent.id, agent.kind, cause);
                    events.push(SimulationEvent::Died {
                        id: agent.id,
                        kind: agent.kind,
                        cause,
                        tick,
                    });
                    census.remove(agent.kind);
                    fallen.insert(agent.id);
                    continue;
                }
                Step::Alive(effects) => effects,
            };

            if let Some(pathogen) = effects.engaged {
                events.push(SimulationEvent::TargetAcquired {
                    antibody: agent.id,
                    pathogen,
                    tick,
                });
            }

            let parent = agent.id;
            for request in effects.births {
                if census.total() >= self.config.population_cap {
                    break;
                }
                census.add(request.kind);
                queued.push(QueuedBirth { request, parent });
            }
            if let Some(request) = reproduction::try_reproduce(agent, &census, &self.config, &mut self.rng) {
                census.add(request.kind);
                queued.push(QueuedBirth { request, parent });
            }

            for strike in effects.strikes {
                self.apply_strike(strike, &index, &fallen);
            }
        }

        self.agents.retain(|agent| !fallen.contains(&agent.id));

        // 3. Interaction pass
        let report = resolve_interactions(&mut self.agents, &self.config);
        if report.contacts > 0 {
            events.push(SimulationEvent::Contacts {
                tick,
                contacts: report.contacts,
                transfers: report.transfers,
                combat_hits: report.combat_hits,
            });
        }

        // 4. Merge
        for QueuedBirth { request, parent } in queued {
            let scatter = self.config.offspring_scatter;
            let at = request.origin
                + Vec2::new(
                    random_speed(&mut self.rng) * scatter,
                    random_speed(&mut self.rng) * scatter,
                );
            let id = self.next_id();
            let child = Agent::spawn(id, request.kind, at, &self.config, &mut self.rng);
            tracing::debug!("{} ({}) born from {} by {:?}", id, request.kind, parent, request.cause);
            self.agents.push(child);
            events.push(SimulationEvent::Born {
                id,
                kind: request.kind,
                parent: Some(parent),
                cause: request.cause,
                tick,
            });
        }

        self.current_tick += 1;
        self.clock_ms += self.config.frame_ms;
        events
    }
}

/// Append-only access to a population, handed to spawners between ticks
pub struct Spawner<'a> {
    population: &'a mut Population,
}

impl Spawner<'_> {
    /// Per-kind counts, for balance policies
    pub fn census(&self) -> Census {
        self.population.census()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.population.config
    }

    pub fn add_agent(&mut self, kind: Kind, position: Option<Vec2>) -> Option<AgentId> {
        let added = self.population.add_agent(kind, position);
        match added {
            Some(id) => tracing::debug!("Spawned {} ({})", id, kind),
            None => tracing::warn!("Spawn of {} suppressed at the population cap", kind),
        }
        added
    }

    pub fn add_agent_named(&mut self, kind: &str, position: Option<Vec2>) -> Result<Option<AgentId>> {
        let kind: Kind = kind.parse()?;
        Ok(self.add_agent(kind, position))
    }
}

/// Birth event for agents appended outside a tick
pub fn spawned_event(id: AgentId, kind: Kind, tick: Tick) -> SimulationEvent {
    SimulationEvent::Born {
        id,
        kind,
        parent: None,
        cause: BirthCause::Spawned,
        tick,
    }
}
