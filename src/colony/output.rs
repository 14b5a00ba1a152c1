//! Simulation output and serialization

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::colony::census::Census;
use crate::colony::events::{DeathCause, SimulationEvent};
use crate::colony::snapshot::AgentView;
use crate::core::types::{Kind, Tick};

/// Complete output of one run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub seed: u64,
    pub final_agents: Vec<AgentView>,
    pub final_census: Census,
    pub events: Vec<SimulationEvent>,
    pub statistics: SimulationStats,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub ticks_simulated: Tick,
    pub simulated_ms: f64,
    pub wall_time_ms: u64,
    pub total_events: usize,
    pub agents_at_start: usize,
    pub agents_at_end: usize,
    pub peak_population: usize,
    pub births: usize,
    pub deaths: usize,
    pub pathogens_destroyed: usize,
}

impl SimulationStats {
    fn from_events(events: &[SimulationEvent]) -> (usize, usize, usize) {
        let mut births = 0;
        let mut deaths = 0;
        let mut pathogens_destroyed = 0;
        for event in events {
            match event {
                SimulationEvent::Born { .. } => births += 1,
                SimulationEvent::Died { kind, cause, .. } => {
                    deaths += 1;
                    if *kind == Kind::Pathogen && *cause == DeathCause::Killed {
                        pathogens_destroyed += 1;
                    }
                }
                _ => {}
            }
        }
        (births, deaths, pathogens_destroyed)
    }
}

/// Counters the run loop keeps while it goes
#[derive(Clone, Copy, Debug, Default)]
pub struct RunTally {
    pub ticks: Tick,
    pub simulated_ms: f64,
    pub agents_at_start: usize,
    pub peak_population: usize,
}

impl SimulationOutput {
    pub fn new(
        seed: u64,
        final_agents: Vec<AgentView>,
        events: Vec<SimulationEvent>,
        tally: RunTally,
        elapsed: Duration,
    ) -> Self {
        let final_census: Census = final_agents.iter().map(|view| view.kind).collect();
        let (births, deaths, pathogens_destroyed) = SimulationStats::from_events(&events);

        let statistics = SimulationStats {
            ticks_simulated: tally.ticks,
            simulated_ms: tally.simulated_ms,
            wall_time_ms: elapsed.as_millis() as u64,
            total_events: events.len(),
            agents_at_start: tally.agents_at_start,
            agents_at_end: final_agents.len(),
            peak_population: tally.peak_population,
            births,
            deaths,
            pathogens_destroyed,
        };

        Self {
            seed,
            final_agents,
            final_census,
            events,
            statistics,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        let census = self
            .final_census
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(kind, count)| format!("{} {}", count, kind))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Seed {}: simulated {} ticks ({:.1}s) in {}ms\n{} births, {} deaths, {} pathogens destroyed, peak {}\n{} agents remain: {}",
            self.seed,
            self.statistics.ticks_simulated,
            self.statistics.simulated_ms / 1000.0,
            self.statistics.wall_time_ms,
            self.statistics.births,
            self.statistics.deaths,
            self.statistics.pathogens_destroyed,
            self.statistics.peak_population,
            self.statistics.agents_at_end,
            census,
        )
    }
}
