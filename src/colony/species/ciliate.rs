//! Ciliary (cyclosis) movement: a clock-driven orbit that occasionally reverses

use rand::Rng;

use crate::colony::agent::{Agent, CiliateState, KindState};
use crate::colony::behavior::{CellBehavior, Effects, StepContext};
use crate::core::config::SimulationConfig;
use crate::core::types::Kind;

#[derive(Debug)]
pub struct CiliateBehavior;

impl CellBehavior for CiliateBehavior {
    fn kind(&self) -> Kind {
        Kind::Ciliate
    }

    fn initial_state(&self, _config: &SimulationConfig) -> KindState {
        KindState::Ciliate(CiliateState::default())
    }

    fn step(&self, agent: &mut Agent, ctx: &mut StepContext<'_>) -> Effects {
        let config = ctx.config;
        let behavior = &config.behavior;
        let angle = ctx.clock_ms / behavior.ciliate_period_ms;
        let flip = ctx.rng.gen::<f32>() < behavior.ciliate_flip_chance;

        let Some(state) = agent.ciliate_state_mut() else {
            return Effects::default();
        };
        let sign = state.direction_sign;
        if flip {
            state.direction_sign = -state.direction_sign;
        }

        agent.position.x += angle.cos() as f32 * behavior.ciliate_speed * sign;
        agent.position.y += angle.sin() as f32 * behavior.ciliate_speed * sign;
        Effects::default()
    }
}
