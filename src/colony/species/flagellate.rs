//! Flagellar movement: straight runs that bounce off the plane edges

use crate::colony::agent::Agent;
use crate::colony::behavior::{CellBehavior, Effects, StepContext};
use crate::core::types::Kind;

#[derive(Debug)]
pub struct FlagellateBehavior;

/// Clamp `pos` into [0, max] and point `vel` back inside when it left
fn bounce(pos: &mut f32, vel: &mut f32, max: f32) {
    if *pos <= 0.0 {
        *pos = 0.0;
        *vel = vel.abs();
    } else if *pos >= max {
        *pos = max;
        *vel = -vel.abs();
    }
}

impl CellBehavior for FlagellateBehavior {
    fn kind(&self) -> Kind {
        Kind::Flagellate
    }

    fn step(&self, agent: &mut Agent, ctx: &mut StepContext<'_>) -> Effects {
        let config = ctx.config;
        let body = config.behavior.flagellate_body_width;

        agent.translate_planar();
        bounce(&mut agent.position.x, &mut agent.velocity.x, config.plane_width - body);
        bounce(&mut agent.position.y, &mut agent.velocity.y, config.plane_height - body);

        Effects::default()
    }
}
