//! Reproduction policy
//!
//! An agent reproduces when its random draw succeeds, its cooldown has
//! passed, it is well fed and healthy, and neither its kind nor the whole
//! population is at capacity. The parent pays nothing for the offspring.

use glam::Vec2;
use rand::Rng;

use crate::colony::agent::Agent;
use crate::colony::behavior::BirthRequest;
use crate::colony::census::Census;
use crate::colony::events::BirthCause;
use crate::core::config::SimulationConfig;

/// Whether the kind's census leaves room for another agent
pub fn has_room(census: &Census, agent: &Agent, config: &SimulationConfig) -> bool {
    census.get(agent.kind) < config.profile(agent.kind).population_cap
        && census.total() < config.population_cap
}

/// Evaluate the policy for one agent; on success records the reproduction age
///
/// `census` must include offspring already queued this tick.
pub fn try_reproduce<R: Rng + ?Sized>(
    agent: &mut Agent,
    census: &Census,
    config: &SimulationConfig,
    rng: &mut R,
) -> Option<BirthRequest> {
    let roll: f32 = rng.gen();
    if roll >= agent.reproduction_rate {
        return None;
    }

    let mature = agent.age - agent.last_reproduction_age > config.reproduction_cooldown;
    let fed = agent.energy > config.reproduction_min_energy;
    let healthy = agent.health.map_or(true, |h| h > config.reproduction_min_health);

    if !(mature && fed && healthy && has_room(census, agent, config)) {
        return None;
    }

    agent.last_reproduction_age = agent.age;
    Some(BirthRequest {
        kind: agent.kind,
        origin: Vec2::new(agent.position.x, agent.position.y),
        cause: BirthCause::Reproduction,
    })
}
