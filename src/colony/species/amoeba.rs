//! Amoeboid movement: drift along the current heading while pseudopods
//! extend and retract

use glam::Vec2;
use rand::Rng;

use crate::colony::agent::{Agent, AmoebaState, KindState, Pseudopod};
use crate::colony::behavior::{CellBehavior, Effects, StepContext};
use crate::core::config::SimulationConfig;
use crate::core::types::Kind;

#[derive(Debug)]
pub struct AmoebaBehavior;

impl CellBehavior for AmoebaBehavior {
    fn kind(&self) -> Kind {
        Kind::Amoeba
    }

    fn initial_state(&self, _config: &SimulationConfig) -> KindState {
        KindState::Amoeba(AmoebaState::default())
    }

    fn step(&self, agent: &mut Agent, ctx: &mut StepContext<'_>) -> Effects {
        let config = ctx.config;
        let behavior = &config.behavior;

        if let Some(state) = agent.amoeba_state_mut() {
            if ctx.rng.gen::<f32>() < behavior.pseudopod_chance {
                let spread = behavior.pseudopod_spread;
                let offset = Vec2::new(
                    (ctx.rng.gen::<f32>() - 0.5) * spread,
                    (ctx.rng.gen::<f32>() - 0.5) * spread,
                );
                state.pseudopods.push(Pseudopod { offset, age: 0 });
            }

            let lifetime = behavior.pseudopod_lifetime;
            state.pseudopods.retain_mut(|pod| {
                pod.age += 1;
                pod.age <= lifetime
            });
        }

        // No boundary reflection: amoebae may wander off the plane
        agent.translate_planar();
        Effects::default()
    }
}
