//! Main simulation loop: a seeded population plus the spawn scheduler

use crate::colony::events::{BirthCause, SimulationEvent};
use crate::colony::output::{RunTally, SimulationOutput};
use crate::colony::population::{spawned_event, Population};
use crate::colony::spawn::SpawnScheduler;
use crate::core::config::SimulationConfig;
use crate::core::types::{Kind, Tick};

/// What to run
#[derive(Clone, Copy, Debug)]
pub struct RunOptions {
    pub ticks: Tick,
    pub seed: u64,
    /// Run the pathogen/antibody spawn scheduler between ticks
    pub spawning: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            ticks: 600,
            seed: 12345,
            spawning: true,
        }
    }
}

/// Run the colony simulation
pub fn run(config: &SimulationConfig, options: RunOptions) -> SimulationOutput {
    let start = std::time::Instant::now();

    let mut population = Population::from_config(config.clone(), options.seed);
    // Separate stream so spawning does not perturb the population's draws
    let mut scheduler = SpawnScheduler::new(config.spawner.clone(), options.seed.wrapping_add(1));

    let mut events: Vec<SimulationEvent> = population
        .agents()
        .iter()
        .map(|agent| SimulationEvent::Born {
            id: agent.id,
            kind: agent.kind,
            parent: None,
            cause: BirthCause::Seeded,
            tick: 0,
        })
        .collect();

    let mut tally = RunTally {
        agents_at_start: population.len(),
        peak_population: population.len(),
        ..RunTally::default()
    };

    tracing::info!(
        "Starting run: {} ticks, seed {}, {} agents",
        options.ticks,
        options.seed,
        population.len()
    );

    for _ in 0..options.ticks {
        events.extend(population.tick());

        if options.spawning {
            let now_ms = population.clock_ms();
            let tick = population.current_tick();
            let spawned = scheduler.poll(now_ms, &mut population.spawner());
            events.extend(spawned.into_iter().map(|(id, kind)| spawned_event(id, kind, tick)));
        }

        tally.peak_population = tally.peak_population.max(population.len());

        if population.current_tick() % 600 == 0 {
            let census = population.census();
            tracing::info!(
                "Tick {}: {} agents ({} pathogens, {} antibodies)",
                population.current_tick(),
                population.len(),
                census.get(Kind::Pathogen),
                census.get(Kind::Antibody)
            );
        }
    }

    tally.ticks = population.current_tick();
    tally.simulated_ms = population.clock_ms();

    let output = SimulationOutput::new(
        options.seed,
        population.snapshot(),
        events,
        tally,
        start.elapsed(),
    );
    tracing::info!("Run finished: {}", output.summary().replace('\n', "; "));
    output
}
