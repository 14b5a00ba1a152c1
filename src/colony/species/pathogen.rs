//! Invading pathogen: wanders, and now and then divides on its own

use glam::Vec2;
use rand::Rng;

use crate::colony::agent::{random_speed, Agent};
use crate::colony::behavior::{BirthRequest, CellBehavior, Effects, StepContext};
use crate::colony::events::BirthCause;
use crate::core::types::Kind;

#[derive(Debug)]
pub struct PathogenBehavior;

impl CellBehavior for PathogenBehavior {
    fn kind(&self) -> Kind {
        Kind::Pathogen
    }

    fn step(&self, agent: &mut Agent, ctx: &mut StepContext<'_>) -> Effects {
        let config = ctx.config;
        let mut effects = Effects::default();

        if ctx.rng.gen::<f32>() < config.behavior.pathogen_wander_chance {
            agent.velocity.x = random_speed(ctx.rng) * agent.base_speed;
            agent.velocity.y = random_speed(ctx.rng) * agent.base_speed;
        }

        agent.translate_planar();

        // Division bypasses the reproduction policy; only the hard cap applies
        if ctx.rng.gen::<f32>() < config.behavior.pathogen_division_chance
            && ctx.population < config.population_cap
        {
            effects.births.push(BirthRequest {
                kind: Kind::Pathogen,
                origin: Vec2::new(agent.position.x, agent.position.y),
                cause: BirthCause::Division,
            });
        }

        effects
    }
}
