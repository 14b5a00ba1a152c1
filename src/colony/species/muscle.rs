//! Contractile cells: anchored in place, pulsing with the simulation clock

use crate::colony::agent::{Agent, KindState, MuscleState};
use crate::colony::behavior::{CellBehavior, Effects, StepContext};
use crate::core::config::SimulationConfig;
use crate::core::types::Kind;

#[derive(Debug)]
pub struct MuscleBehavior;

impl CellBehavior for MuscleBehavior {
    fn kind(&self) -> Kind {
        Kind::Muscle
    }

    /// Newborns rest at the middle of the pulse until their first update
    fn initial_state(&self, config: &SimulationConfig) -> KindState {
        KindState::Muscle(MuscleState {
            contraction_phase: config.behavior.muscle_rest,
        })
    }

    fn step(&self, agent: &mut Agent, ctx: &mut StepContext<'_>) -> Effects {
        let behavior = &ctx.config.behavior;
        let pulse = (ctx.clock_ms / behavior.muscle_period_ms).sin() as f32;

        if let Some(state) = agent.muscle_state_mut() {
            state.contraction_phase = pulse * behavior.muscle_amplitude + behavior.muscle_rest;
        }

        Effects::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::behavior::test_support::Harness;
    use crate::core::types::{AgentId, Vec3};

    #[test]
    fn test_pulses_without_moving() {
        let mut harness = Harness::new();
        harness.clock_ms = 200.0 * std::f64::consts::FRAC_PI_2;
        let mut agent = Agent::new(
            AgentId(1),
            Kind::Muscle,
            Vec3::new(40.0, 40.0, 50.0),
            Vec3::new(3.0, 3.0, 0.0),
            &harness.config,
        );

        let mut ctx = harness.context(&[]);
        MuscleBehavior.step(&mut agent, &mut ctx);

        assert_eq!(agent.position, Vec3::new(40.0, 40.0, 50.0));
        let phase = agent.muscle_state().unwrap().contraction_phase;
        assert!((phase - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_newborn_starts_at_rest() {
        let harness = Harness::new();
        let agent = Agent::new(AgentId(1), Kind::Muscle, Vec3::ZERO, Vec3::ZERO, &harness.config);
        let phase = agent.muscle_state().unwrap().contraction_phase;
        assert_eq!(phase, harness.config.behavior.muscle_rest);
        assert!(phase > 0.0);
    }

    #[test]
    fn test_phase_stays_within_pulse_range() {
        let mut harness = Harness::new();
        let mut agent = Agent::new(AgentId(1), Kind::Muscle, Vec3::ZERO, Vec3::ZERO, &harness.config);

        for frame in 0..500 {
            harness.clock_ms = frame as f64 * 16.0;
            let mut ctx = harness.context(&[]);
            MuscleBehavior.step(&mut agent, &mut ctx);
            let phase = agent.muscle_state().unwrap().contraction_phase;
            assert!((10.0..=20.0).contains(&phase));
        }
    }
}
