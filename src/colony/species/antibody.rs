//! Immune antibody: hunts the nearest pathogen and wears it down on contact

use ordered_float::OrderedFloat;

use crate::colony::agent::{Agent, AntibodyState, KindState};
use crate::colony::behavior::{CellBehavior, Effects, Neighborhood, StepContext, Strike};
use crate::core::config::SimulationConfig;
use crate::core::types::{planar_distance, AgentId, Kind, Vec3};

#[derive(Debug)]
pub struct AntibodyBehavior;

/// Nearest live pathogen strictly inside `range` (planar distance)
///
/// Ties keep the first pathogen in collection order.
pub fn select_target<'a>(origin: Vec3, range: f32, neighbors: &Neighborhood<'a>) -> Option<&'a Agent> {
    neighbors
        .live_pathogens()
        .map(|pathogen| (planar_distance(origin, pathogen.position), pathogen))
        .filter(|(distance, _)| *distance < range)
        .min_by_key(|(distance, _)| OrderedFloat(*distance))
        .map(|(_, pathogen)| pathogen)
}

fn still_hunted<'a>(target: Option<AgentId>, neighbors: &Neighborhood<'a>) -> Option<&'a Agent> {
    let id = target?;
    neighbors
        .get(id)
        .filter(|agent| agent.kind == Kind::Pathogen && agent.has_health_left())
}

impl CellBehavior for AntibodyBehavior {
    fn kind(&self) -> Kind {
        Kind::Antibody
    }

    fn initial_state(&self, _config: &SimulationConfig) -> KindState {
        KindState::Antibody(AntibodyState::default())
    }

    fn step(&self, agent: &mut Agent, ctx: &mut StepContext<'_>) -> Effects {
        let mut effects = Effects::default();
        let origin = agent.position;
        let previous = agent.antibody_state().and_then(|s| s.target);

        let target = match still_hunted(previous, &ctx.neighbors) {
            Some(target) => Some(target),
            None => select_target(origin, agent.detection_range, &ctx.neighbors),
        };

        let mut fighting = false;
        if let Some(target) = target {
            if previous != Some(target.id) {
                effects.engaged = Some(target.id);
            }

            let angle = (target.position.y - origin.y).atan2(target.position.x - origin.x);
            agent.velocity.x = angle.cos() * agent.base_speed;
            agent.velocity.y = angle.sin() * agent.base_speed;

            if planar_distance(origin, target.position) < agent.size + target.size {
                fighting = true;
                effects.strikes.push(Strike {
                    target: target.id,
                    damage: ctx.config.behavior.pursuit_damage,
                });
            }
        }

        if let Some(state) = agent.antibody_state_mut() {
            state.target = target.map(|t| t.id);
            state.fighting = fighting;
        }

        agent.translate_planar();
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::behavior::test_support::Harness;

    fn antibody(harness: &Harness) -> Agent {
        Agent::new(
            AgentId(1),
            Kind::Antibody,
            Vec3::new(500.0, 400.0, 50.0),
            Vec3::new(0.5, 0.5, 0.0),
            &harness.config,
        )
    }

    fn pathogen(harness: &Harness, id: u64, x: f32, y: f32) -> Agent {
        Agent::new(AgentId(id), Kind::Pathogen, Vec3::new(x, y, 50.0), Vec3::ZERO, &harness.config)
    }

    #[test]
    fn test_targets_nearest_pathogen_in_range() {
        let mut harness = Harness::new();
        let mut agent = antibody(&harness);
        let others = vec![
            pathogen(&harness, 10, 580.0, 400.0),
            pathogen(&harness, 11, 500.0, 450.0),
            pathogen(&harness, 12, 700.0, 400.0),
        ];

        let mut ctx = harness.context(&others);
        let effects = AntibodyBehavior.step(&mut agent, &mut ctx);

        assert_eq!(agent.antibody_state().unwrap().target, Some(AgentId(11)));
        assert_eq!(effects.engaged, Some(AgentId(11)));
        assert!(effects.strikes.is_empty());
        // Steering straight down +y at base speed 2
        assert!(agent.velocity.x.abs() < 1e-5);
        assert!((agent.velocity.y - 2.0).abs() < 1e-5);
        assert!((agent.position.y - 402.0).abs() < 1e-4);
    }

    #[test]
    fn test_ignores_pathogens_out_of_range() {
        let mut harness = Harness::new();
        let mut agent = antibody(&harness);
        let others = vec![pathogen(&harness, 10, 650.0, 400.0)];

        let mut ctx = harness.context(&others);
        AntibodyBehavior.step(&mut agent, &mut ctx);

        assert_eq!(agent.antibody_state().unwrap().target, None);
        assert!(!agent.is_fighting());
        assert_eq!(agent.position.x, 500.5);
    }

    #[test]
    fn test_tie_keeps_first_in_scan_order() {
        let harness = Harness::new();
        let others = vec![
            pathogen(&harness, 10, 560.0, 400.0),
            pathogen(&harness, 11, 440.0, 400.0),
        ];
        let neighbors = Neighborhood::new(&[], &others, &harness.fallen);

        let chosen = select_target(Vec3::new(500.0, 400.0, 0.0), 150.0, &neighbors).unwrap();
        assert_eq!(chosen.id, AgentId(10));
    }

    #[test]
    fn test_keeps_live_target_even_when_closer_one_appears() {
        let mut harness = Harness::new();
        let mut agent = antibody(&harness);
        if let Some(state) = agent.antibody_state_mut() {
            state.target = Some(AgentId(12));
        }
        let others = vec![
            pathogen(&harness, 11, 510.0, 400.0),
            pathogen(&harness, 12, 600.0, 400.0),
        ];

        let mut ctx = harness.context(&others);
        let effects = AntibodyBehavior.step(&mut agent, &mut ctx);

        assert_eq!(agent.antibody_state().unwrap().target, Some(AgentId(12)));
        assert_eq!(effects.engaged, None);
    }

    #[test]
    fn test_dead_target_is_replaced() {
        let mut harness = Harness::new();
        let mut agent = antibody(&harness);
        if let Some(state) = agent.antibody_state_mut() {
            state.target = Some(AgentId(12));
        }
        let mut others = vec![
            pathogen(&harness, 11, 560.0, 400.0),
            pathogen(&harness, 12, 520.0, 400.0),
        ];
        others[1].health = Some(0.0);

        let mut ctx = harness.context(&others);
        AntibodyBehavior.step(&mut agent, &mut ctx);

        assert_eq!(agent.antibody_state().unwrap().target, Some(AgentId(11)));
    }

    #[test]
    fn test_vanished_target_is_cleared() {
        let mut harness = Harness::new();
        let mut agent = antibody(&harness);
        if let Some(state) = agent.antibody_state_mut() {
            state.target = Some(AgentId(99));
            state.fighting = true;
        }

        let mut ctx = harness.context(&[]);
        AntibodyBehavior.step(&mut agent, &mut ctx);

        let state = agent.antibody_state().unwrap();
        assert_eq!(state.target, None);
        assert!(!state.fighting);
    }

    #[test]
    fn test_strikes_target_in_contact() {
        let mut harness = Harness::new();
        let mut agent = antibody(&harness);
        let others = vec![pathogen(&harness, 10, 510.0, 400.0)];

        let mut ctx = harness.context(&others);
        let effects = AntibodyBehavior.step(&mut agent, &mut ctx);

        assert!(agent.is_fighting());
        assert_eq!(effects.strikes, vec![Strike { target: AgentId(10), damage: 1.0 }]);
    }
}
