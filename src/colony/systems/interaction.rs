//! Pairwise contact resolution: repulsion, energy transfer, combat
//!
//! O(n²) over the population; the hard population cap keeps n small.

use crate::colony::agent::Agent;
use crate::core::config::SimulationConfig;
use crate::core::types::Kind;

/// Counts from one interaction pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionReport {
    pub contacts: u32,
    pub transfers: u32,
    pub combat_hits: u32,
}

/// Whether two agents overlap in 3D
pub fn in_contact(a: &Agent, b: &Agent) -> bool {
    a.position.distance(b.position) < a.size + b.size
}

/// Point the planar velocity away from `other`, at the agent's own base speed
fn repel(agent: &mut Agent, other_x: f32, other_y: f32) {
    let angle = (agent.position.y - other_y).atan2(agent.position.x - other_x);
    agent.velocity.x = angle.cos() * agent.base_speed;
    agent.velocity.y = angle.sin() * agent.base_speed;
}

/// Move energy from the richer agent to the poorer one when the gap is wide enough
fn transfer_energy(a: &mut Agent, b: &mut Agent, config: &SimulationConfig) -> bool {
    let (giver, taker) = if a.energy - b.energy > config.transfer_margin {
        (a, b)
    } else if b.energy - a.energy > config.transfer_margin {
        (b, a)
    } else {
        return false;
    };

    giver.energy = (giver.energy - config.transfer_amount).max(0.0);
    taker.energy += config.transfer_amount;
    true
}

/// Antibody/pathogen collision damage; the pathogen takes the heavier blow
fn collide_combatants(a: &mut Agent, b: &mut Agent, config: &SimulationConfig) -> bool {
    let (antibody, pathogen) = match (a.kind, b.kind) {
        (Kind::Antibody, Kind::Pathogen) => (a, b),
        (Kind::Pathogen, Kind::Antibody) => (b, a),
        _ => return false,
    };

    pathogen.take_damage(config.collision_pathogen_damage);
    antibody.take_damage(config.collision_antibody_damage);
    true
}

/// Resolve every pair of agents in contact
pub fn resolve_interactions(agents: &mut [Agent], config: &SimulationConfig) -> InteractionReport {
    let mut report = InteractionReport::default();

    for j in 1..agents.len() {
        let (head, tail) = agents.split_at_mut(j);
        let b = &mut tail[0];

        for a in head.iter_mut() {
            if !in_contact(a, b) {
                continue;
            }
            report.contacts += 1;

            let (ax, ay) = (a.position.x, a.position.y);
            repel(a, b.position.x, b.position.y);
            repel(b, ax, ay);

            if transfer_energy(a, b, config) {
                report.transfers += 1;
            }
            if collide_combatants(a, b, config) {
                report.combat_hits += 1;
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AgentId, Vec3};

    fn place(id: u64, kind: Kind, x: f32, y: f32) -> Agent {
        Agent::new(
            AgentId(id),
            kind,
            Vec3::new(x, y, 50.0),
            Vec3::ZERO,
            &SimulationConfig::default(),
        )
    }

    #[test]
    fn test_energy_transfer_in_contact() {
        let config = SimulationConfig::default();
        let mut agents = vec![place(1, Kind::Ciliate, 100.0, 100.0), place(2, Kind::Ciliate, 110.0, 100.0)];
        agents[0].energy = 100.0;
        agents[1].energy = 70.0;

        let report = resolve_interactions(&mut agents, &config);

        assert_eq!(report.contacts, 1);
        assert_eq!(report.transfers, 1);
        assert_eq!(agents[0].energy, 90.0);
        assert_eq!(agents[1].energy, 80.0);
    }

    #[test]
    fn test_no_transfer_within_margin() {
        let config = SimulationConfig::default();
        let mut agents = vec![place(1, Kind::Ciliate, 100.0, 100.0), place(2, Kind::Ciliate, 110.0, 100.0)];
        agents[0].energy = 90.0;
        agents[1].energy = 70.0;

        let report = resolve_interactions(&mut agents, &config);

        assert_eq!(report.transfers, 0);
        assert_eq!(agents[0].energy, 90.0);
        assert_eq!(agents[1].energy, 70.0);
    }

    #[test]
    fn test_transfer_flows_from_second_to_first() {
        let config = SimulationConfig::default();
        let mut agents = vec![place(1, Kind::Ciliate, 100.0, 100.0), place(2, Kind::Ciliate, 110.0, 100.0)];
        agents[0].energy = 40.0;
        agents[1].energy = 95.0;

        resolve_interactions(&mut agents, &config);

        assert_eq!(agents[0].energy, 50.0);
        assert_eq!(agents[1].energy, 85.0);
    }

    #[test]
    fn test_collision_repels_at_base_speed() {
        let config = SimulationConfig::default();
        let mut agents = vec![place(1, Kind::Flagellate, 100.0, 100.0), place(2, Kind::Amoeba, 110.0, 100.0)];

        resolve_interactions(&mut agents, &config);

        // Flagellate (speed 2) pushed toward -x, amoeba (speed 1) toward +x
        assert!((agents[0].velocity.x + 2.0).abs() < 1e-5);
        assert!(agents[0].velocity.y.abs() < 1e-5);
        assert!((agents[1].velocity.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_depth_separates_agents() {
        let config = SimulationConfig::default();
        let mut agents = vec![place(1, Kind::Ciliate, 100.0, 100.0), place(2, Kind::Ciliate, 100.0, 100.0)];
        agents[0].position.z = 0.0;
        agents[1].position.z = 90.0;

        let report = resolve_interactions(&mut agents, &config);
        assert_eq!(report.contacts, 0);
    }

    #[test]
    fn test_antibody_pathogen_collision_damage() {
        let config = SimulationConfig::default();
        let mut agents = vec![place(1, Kind::Pathogen, 100.0, 100.0), place(2, Kind::Antibody, 105.0, 100.0)];

        let report = resolve_interactions(&mut agents, &config);

        assert_eq!(report.combat_hits, 1);
        assert_eq!(agents[0].health, Some(95.0));
        assert_eq!(agents[1].health, Some(99.0));
    }

    #[test]
    fn test_same_kind_combatants_do_not_fight() {
        let config = SimulationConfig::default();
        let mut agents = vec![place(1, Kind::Pathogen, 100.0, 100.0), place(2, Kind::Pathogen, 105.0, 100.0)];

        let report = resolve_interactions(&mut agents, &config);

        assert_eq!(report.combat_hits, 0);
        assert_eq!(agents[0].health, Some(100.0));
    }

    #[test]
    fn test_each_pair_resolved_once() {
        let config = SimulationConfig::default();
        let mut agents = vec![
            place(1, Kind::Pathogen, 100.0, 100.0),
            place(2, Kind::Antibody, 104.0, 100.0),
            place(3, Kind::Antibody, 100.0, 104.0),
        ];

        let report = resolve_interactions(&mut agents, &config);

        assert_eq!(report.contacts, 3);
        assert_eq!(report.combat_hits, 2);
        assert_eq!(agents[0].health, Some(90.0));
    }
}
