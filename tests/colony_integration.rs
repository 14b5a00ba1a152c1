//! Colony simulation integration tests

use std::collections::HashSet;

use glam::{Vec2, Vec3};
use microcosm::colony::{
    run, BirthCause, DeathCause, Population, RunOptions, SimulationEvent, SpawnScheduler,
};
use microcosm::core::types::{AgentId, Kind};
use microcosm::core::{KindCounts, SimError, SimulationConfig};

/// Defaults with every random birth switched off
fn quiet_config() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    for kind in Kind::ALL {
        config.kinds.get_mut(kind).reproduction_rate = 0.0;
    }
    config.behavior.pathogen_division_chance = 0.0;
    config.behavior.pathogen_wander_chance = 0.0;
    config
}

/// Place a motionless agent at mid depth
fn place(population: &mut Population, kind: Kind, x: f32, y: f32) -> AgentId {
    let id = population.add_agent(kind, Some(Vec2::new(x, y))).unwrap();
    let agent = population.get_mut(id).unwrap();
    agent.position.z = 50.0;
    agent.velocity = Vec3::ZERO;
    id
}

#[test]
fn test_seeded_amoebas_stay_valid_for_five_ticks() {
    let config = SimulationConfig::default();
    let counts: KindCounts = [(Kind::Amoeba, 5)].into_iter().collect();
    let mut population = Population::seed(config.clone(), 21, &counts);

    for _ in 0..5 {
        let _ = population.tick();
    }

    assert!(!population.is_empty());
    let mut ids = HashSet::new();
    for agent in population.agents() {
        assert!(ids.insert(agent.id));
        assert_eq!(agent.kind, Kind::Amoeba);
        assert!(agent.position.is_finite());
        assert!((0.0..=config.depth_max).contains(&agent.position.z));
        assert!(agent.energy >= 0.0);
        assert!(agent.age <= agent.max_age);
    }
}

#[test]
fn test_dead_pathogen_absent_after_one_tick() {
    let mut population = Population::new(quiet_config(), 5);
    let pathogen = place(&mut population, Kind::Pathogen, 200.0, 200.0);
    population.get_mut(pathogen).unwrap().health = Some(-3.0);

    let events = population.tick();

    assert!(population.get(pathogen).is_none());
    assert!(events.iter().any(|e| matches!(
        e,
        SimulationEvent::Died { id, cause: DeathCause::Killed, .. } if *id == pathogen
    )));
}

#[test]
fn test_contact_transfers_energy_through_tick() {
    let mut population = Population::new(quiet_config(), 5);
    let rich = place(&mut population, Kind::Muscle, 300.0, 300.0);
    let poor = place(&mut population, Kind::Muscle, 310.0, 300.0);
    population.get_mut(poor).unwrap().energy = 70.0;

    let events = population.tick();

    // Both decay by 0.05 first, then 10 moves from rich to poor
    assert!((population.get(rich).unwrap().energy - 89.95).abs() < 1e-3);
    assert!((population.get(poor).unwrap().energy - 79.95).abs() < 1e-3);
    assert!(events.iter().any(|e| matches!(
        e,
        SimulationEvent::Contacts { contacts: 1, transfers: 1, combat_hits: 0, .. }
    )));
}

#[test]
fn test_antibody_locks_onto_nearest_pathogen() {
    let mut population = Population::new(quiet_config(), 5);
    let antibody = place(&mut population, Kind::Antibody, 500.0, 400.0);
    let _far = place(&mut population, Kind::Pathogen, 580.0, 400.0);
    let near = place(&mut population, Kind::Pathogen, 500.0, 450.0);
    let _outside = place(&mut population, Kind::Pathogen, 700.0, 400.0);

    let events = population.tick();

    assert!(events.contains(&SimulationEvent::TargetAcquired {
        antibody,
        pathogen: near,
        tick: 0,
    }));
    let hunter = population.get(antibody).unwrap();
    assert!(hunter.velocity.x.abs() < 1e-5);
    assert!((hunter.velocity.y - 2.0).abs() < 1e-5);
}

#[test]
fn test_antibody_wears_pathogen_down() {
    let mut population = Population::new(quiet_config(), 5);
    let antibody = place(&mut population, Kind::Antibody, 500.0, 400.0);
    let pathogen = place(&mut population, Kind::Pathogen, 505.0, 400.0);

    let mut destroyed = false;
    for _ in 0..40 {
        let events = population.tick();
        if events.iter().any(|e| matches!(
            e,
            SimulationEvent::Died { id, cause: DeathCause::Killed, .. } if *id == pathogen
        )) {
            destroyed = true;
            break;
        }
        // Hold the pair in contact despite repulsion
        for (id, x) in [(antibody, 500.0), (pathogen, 505.0)] {
            if let Some(agent) = population.get_mut(id) {
                agent.position = Vec3::new(x, 400.0, 50.0);
                agent.velocity = Vec3::ZERO;
            }
        }
    }

    assert!(population.get(antibody).is_some());
    assert!(destroyed);
}

#[test]
fn test_flagellate_bounces_off_left_edge() {
    let config = quiet_config();
    let width = config.plane_width;
    let mut population = Population::new(config, 5);
    let id = place(&mut population, Kind::Flagellate, 0.0, 300.0);
    population.get_mut(id).unwrap().velocity = Vec3::new(-1.5, 0.0, 0.0);

    let _ = population.tick();

    let agent = population.get(id).unwrap();
    assert!(agent.velocity.x > 0.0);
    assert!(agent.position.x >= 0.0 && agent.position.x <= width);
}

#[test]
fn test_no_reproduction_at_kind_cap_with_forced_draw() {
    let mut config = quiet_config();
    config.kinds.get_mut(Kind::Bacterium).reproduction_rate = 1.0;
    let cap = config.profile(Kind::Bacterium).population_cap;
    let mut population = Population::new(config, 5);

    for i in 0..cap {
        let id = place(&mut population, Kind::Bacterium, 50.0 + 100.0 * i as f32, 100.0);
        let agent = population.get_mut(id).unwrap();
        agent.age = 110.0;
        agent.energy = 90.0;
    }

    let events = population.tick();

    assert!(!events.iter().any(|e| matches!(e, SimulationEvent::Born { .. })));
    assert_eq!(population.census().get(Kind::Bacterium), cap);
}

#[test]
fn test_queued_offspring_count_against_kind_cap() {
    let mut config = quiet_config();
    config.kinds.get_mut(Kind::Bacterium).reproduction_rate = 1.0;
    let cap = config.profile(Kind::Bacterium).population_cap;
    let mut population = Population::new(config, 5);

    for i in 0..cap - 1 {
        let id = place(&mut population, Kind::Bacterium, 50.0 + 100.0 * i as f32, 100.0);
        let agent = population.get_mut(id).unwrap();
        agent.age = 110.0;
        agent.energy = 90.0;
    }

    let births = population
        .tick()
        .into_iter()
        .filter(|e| matches!(e, SimulationEvent::Born { cause: BirthCause::Reproduction, .. }))
        .count();

    assert_eq!(births, 1);
    assert_eq!(population.census().get(Kind::Bacterium), cap);
}

#[test]
fn test_every_kind_dies_of_old_age() {
    let mut population = Population::new(quiet_config(), 5);
    for (i, kind) in Kind::ALL.into_iter().enumerate() {
        let id = place(&mut population, kind, 80.0 + 150.0 * i as f32, 400.0);
        let agent = population.get_mut(id).unwrap();
        agent.age = agent.max_age;
    }

    let events = population.tick();

    assert!(population.is_empty());
    let old_age = events
        .iter()
        .filter(|e| matches!(e, SimulationEvent::Died { cause: DeathCause::OldAge, .. }))
        .count();
    assert_eq!(old_age, Kind::ALL.len());
}

#[test]
fn test_unknown_kind_name_rejected() {
    let mut population = Population::new(SimulationConfig::default(), 5);
    let mut spawner = population.spawner();

    assert!(matches!(
        spawner.add_agent_named("virus", None),
        Err(SimError::UnknownKind(name)) if name == "virus"
    ));
    assert!(spawner.add_agent_named("Antibody", None).unwrap().is_some());
    assert_eq!(population.len(), 1);
}

#[test]
fn test_spawns_suppressed_at_hard_cap() {
    let mut config = SimulationConfig::default();
    config.population_cap = 100;
    let counts: KindCounts = [(Kind::Ciliate, 100)].into_iter().collect();
    let mut population = Population::seed(config, 5, &counts);

    let mut spawner = population.spawner();
    assert_eq!(spawner.add_agent(Kind::Pathogen, None), None);
    assert_eq!(spawner.add_agent_named("pathogen", None).unwrap(), None);
    assert_eq!(population.len(), 100);
}

#[test]
fn test_scheduler_balances_between_ticks() {
    let counts: KindCounts = [(Kind::Antibody, 3)].into_iter().collect();
    let mut population = Population::seed(quiet_config(), 5, &counts);
    let mut scheduler = SpawnScheduler::new(population.config().spawner.clone(), 6);

    let mut spawned = Vec::new();
    while population.clock_ms() < 3100.0 {
        let _ = population.tick();
        let now = population.clock_ms();
        spawned.extend(scheduler.poll(now, &mut population.spawner()));
    }

    assert!(!spawned.is_empty());
    assert_eq!(spawned[0].1, Kind::Pathogen);
    assert!(spawned.iter().any(|(_, kind)| *kind == Kind::Antibody));
}

#[test]
fn test_seeded_runs_are_deterministic() {
    let config = SimulationConfig::default();
    let options = RunOptions {
        ticks: 300,
        seed: 99,
        spawning: true,
    };

    let first = run(&config, options);
    let second = run(&config, options);

    assert_eq!(first.final_agents, second.final_agents);
    assert_eq!(first.events, second.events);
    assert_eq!(first.final_census, second.final_census);
}

#[test]
fn test_snapshot_matches_population() {
    let population = Population::from_config(SimulationConfig::default(), 8);
    let views = population.snapshot();

    assert_eq!(views.len(), population.len());
    for (view, agent) in views.iter().zip(population.agents()) {
        assert_eq!(view.id, agent.id);
        assert!((view.depth_scale - (1.0 - agent.position.z / 200.0)).abs() < 1e-6);
    }
}
