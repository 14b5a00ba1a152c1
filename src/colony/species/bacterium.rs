//! Brownian motion: independent jitter on each planar axis

use rand::Rng;

use crate::colony::agent::Agent;
use crate::colony::behavior::{CellBehavior, Effects, StepContext};
use crate::core::types::Kind;

#[derive(Debug)]
pub struct BacteriumBehavior;

impl CellBehavior for BacteriumBehavior {
    fn kind(&self) -> Kind {
        Kind::Bacterium
    }

    fn step(&self, agent: &mut Agent, ctx: &mut StepContext<'_>) -> Effects {
        let step = ctx.config.behavior.brownian_step;
        agent.position.x += (ctx.rng.gen::<f32>() - 0.5) * step;
        agent.position.y += (ctx.rng.gen::<f32>() - 0.5) * step;
        Effects::default()
    }
}
