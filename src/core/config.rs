//! Simulation configuration with documented constants
//!
//! All balance numbers are collected here so they can be tuned (and tested)
//! without touching the behavior code. Every field has a default; a TOML file
//! only needs to name the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::Kind;

/// Configuration for the colony simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === PLANE ===
    /// Width of the simulation plane (world units, x axis)
    pub plane_width: f32,

    /// Height of the simulation plane (world units, y axis)
    pub plane_height: f32,

    /// Upper bound of the depth axis; z lives in [0, depth_max]
    ///
    /// Depth only scales drawing and enters the 3D contact distance.
    pub depth_max: f32,

    // === CLOCK ===
    /// Simulated milliseconds per tick
    ///
    /// Drives the time-based strategies (muscle pulse, ciliate orbit) and
    /// the spawn scheduler. 16.67 approximates a 60 Hz frame driver.
    pub frame_ms: f64,

    // === VITALS ===
    /// Energy every agent is born with
    pub starting_energy: f32,

    /// Age added per tick
    pub age_increment: f32,

    /// Energy lost per tick
    ///
    /// At 0.05, an agent that never receives a transfer runs dry after
    /// 2000 ticks (age 200).
    pub energy_decay: f32,

    // === INTERACTION ===
    /// Energy gap above which contact triggers a transfer
    pub transfer_margin: f32,

    /// Energy moved from the richer to the poorer agent per contact
    pub transfer_amount: f32,

    /// Health a pathogen loses when it collides with an antibody
    pub collision_pathogen_damage: f32,

    /// Health an antibody loses when it collides with a pathogen
    pub collision_antibody_damage: f32,

    // === REPRODUCTION ===
    /// Age that must pass between two reproductions of one agent
    pub reproduction_cooldown: f32,

    /// Energy an agent needs (strictly above) to reproduce
    pub reproduction_min_energy: f32,

    /// Health an agent needs (strictly above) to reproduce
    ///
    /// Ignored for kinds without health.
    pub reproduction_min_health: f32,

    /// Offspring land within `random_speed() * offspring_scatter` of the parent
    pub offspring_scatter: f32,

    /// Hard ceiling on the total population
    ///
    /// Bounds the O(n²) interaction pass. At the cap, reproduction and
    /// spawns are suppressed rather than failed.
    pub population_cap: usize,

    // === TABLES ===
    pub behavior: BehaviorConfig,
    pub spawner: SpawnerConfig,
    pub kinds: KindProfiles,
    pub initial_population: KindCounts,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            plane_width: 1200.0,
            plane_height: 800.0,
            depth_max: 100.0,

            frame_ms: 1000.0 / 60.0,

            starting_energy: 100.0,
            age_increment: 0.1,
            energy_decay: 0.05,

            transfer_margin: 20.0,
            transfer_amount: 10.0,
            collision_pathogen_damage: 5.0,
            collision_antibody_damage: 1.0,

            reproduction_cooldown: 100.0,
            reproduction_min_energy: 70.0,
            reproduction_min_health: 50.0,
            offspring_scatter: 10.0,
            population_cap: 100,

            behavior: BehaviorConfig::default(),
            spawner: SpawnerConfig::default(),
            kinds: KindProfiles::default(),
            initial_population: KindCounts::standard_seeding(),
        }
    }
}

/// Constants of the per-kind movement strategies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Per-tick chance that an amoeba extends a new pseudopod
    pub pseudopod_chance: f32,

    /// Pseudopod offsets are drawn from [-spread/2, spread/2) on each axis
    pub pseudopod_spread: f32,

    /// Ticks a pseudopod lives before it is retracted
    pub pseudopod_lifetime: u32,

    /// Flagellates bounce once their body (this wide) touches an edge
    pub flagellate_body_width: f32,

    /// Brownian jitter is drawn from [-step/2, step/2) per axis
    pub brownian_step: f32,

    /// Radius-like speed of the ciliate orbit
    pub ciliate_speed: f32,

    /// Milliseconds per radian of the ciliate orbit
    pub ciliate_period_ms: f64,

    /// Per-tick chance that a ciliate reverses its orbit
    pub ciliate_flip_chance: f32,

    /// Milliseconds per radian of the muscle pulse
    pub muscle_period_ms: f64,

    /// Amplitude of the muscle pulse (drawing radius units)
    pub muscle_amplitude: f32,

    /// Rest radius around which the muscle pulses
    pub muscle_rest: f32,

    /// Health an antibody strips from its pursued target per tick of contact
    pub pursuit_damage: f32,

    /// Per-tick chance that a pathogen picks a new heading
    pub pathogen_wander_chance: f32,

    /// Per-tick chance that a pathogen divides outside the reproduction policy
    pub pathogen_division_chance: f32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            pseudopod_chance: 0.02,
            pseudopod_spread: 40.0,
            pseudopod_lifetime: 50,
            flagellate_body_width: 20.0,
            brownian_step: 2.0,
            ciliate_speed: 2.0,
            ciliate_period_ms: 1000.0,
            ciliate_flip_chance: 0.01,
            muscle_period_ms: 200.0,
            muscle_amplitude: 5.0,
            muscle_rest: 15.0,
            pursuit_damage: 1.0,
            pathogen_wander_chance: 0.02,
            pathogen_division_chance: 0.001,
        }
    }
}

/// Balance policy of the periodic pathogen/antibody spawner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Shortest delay between two spawn rounds (simulated ms)
    pub min_interval_ms: f64,

    /// Longest delay between two spawn rounds (simulated ms)
    pub max_interval_ms: f64,

    /// Antibodies are topped up while fewer than this many are alive
    pub antibody_floor: usize,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: 1000.0,
            max_interval_ms: 3000.0,
            antibody_floor: 5,
        }
    }
}

/// Per-kind parameter defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindProfile {
    /// Fill color as a `#RRGGBB` string
    pub color: String,

    /// Body radius; contact distance is the sum of two sizes
    pub size: f32,

    /// Speed multiplier for initial velocity, steering and collision rebound
    pub base_speed: f32,

    /// How far an antibody looks for pathogens (0 for other kinds)
    pub detection_range: f32,

    /// Starting health for kinds that take part in combat
    pub starting_health: Option<f32>,

    /// Age beyond which the agent dies naturally
    pub max_age: f32,

    /// Per-tick probability that an eligible agent reproduces
    pub reproduction_rate: f32,

    /// Same-kind population at which reproduction stops
    pub population_cap: usize,
}

impl KindProfile {
    fn new(color: &str, size: f32, base_speed: f32) -> Self {
        Self {
            color: color.to_string(),
            size,
            base_speed,
            detection_range: 0.0,
            starting_health: None,
            max_age: 180.0,
            reproduction_rate: 0.002,
            population_cap: 10,
        }
    }

    fn with_health(mut self, health: f32) -> Self {
        self.starting_health = Some(health);
        self
    }

    fn amoeba() -> Self {
        Self::new("#8B008B", 30.0, 1.0)
    }

    fn flagellate() -> Self {
        Self { max_age: 150.0, ..Self::new("#000080", 15.0, 2.0) }
    }

    fn muscle() -> Self {
        Self { max_age: 190.0, reproduction_rate: 0.001, ..Self::new("#8B0000", 20.0, 1.0) }
    }

    fn bacterium() -> Self {
        Self { max_age: 120.0, reproduction_rate: 0.003, ..Self::new("#FFD700", 8.0, 1.0) }
            .with_health(100.0)
    }

    fn ciliate() -> Self {
        Self { max_age: 160.0, ..Self::new("#006400", 12.0, 1.0) }
    }

    fn antibody() -> Self {
        Self {
            detection_range: 150.0,
            max_age: 150.0,
            population_cap: 20,
            ..Self::new("#4169E1", 12.0, 2.0)
        }
        .with_health(100.0)
    }

    fn pathogen() -> Self {
        Self {
            max_age: 140.0,
            reproduction_rate: 0.004,
            population_cap: 15,
            ..Self::new("#00FF00", 8.0, 1.5)
        }
        .with_health(100.0)
    }
}

/// Partial [`KindProfile`] as read from a config file
#[derive(Debug, Default, Deserialize)]
struct KindProfileOverride {
    color: Option<String>,
    size: Option<f32>,
    base_speed: Option<f32>,
    detection_range: Option<f32>,
    starting_health: Option<f32>,
    max_age: Option<f32>,
    reproduction_rate: Option<f32>,
    population_cap: Option<usize>,
}

impl KindProfileOverride {
    fn apply(self, base: KindProfile) -> KindProfile {
        KindProfile {
            color: self.color.unwrap_or(base.color),
            size: self.size.unwrap_or(base.size),
            base_speed: self.base_speed.unwrap_or(base.base_speed),
            detection_range: self.detection_range.unwrap_or(base.detection_range),
            starting_health: self.starting_health.or(base.starting_health),
            max_age: self.max_age.unwrap_or(base.max_age),
            reproduction_rate: self.reproduction_rate.unwrap_or(base.reproduction_rate),
            population_cap: self.population_cap.unwrap_or(base.population_cap),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KindProfilesOverride {
    amoeba: KindProfileOverride,
    flagellate: KindProfileOverride,
    muscle: KindProfileOverride,
    bacterium: KindProfileOverride,
    ciliate: KindProfileOverride,
    antibody: KindProfileOverride,
    pathogen: KindProfileOverride,
}

impl From<KindProfilesOverride> for KindProfiles {
    fn from(over: KindProfilesOverride) -> Self {
        Self {
            amoeba: over.amoeba.apply(KindProfile::amoeba()),
            flagellate: over.flagellate.apply(KindProfile::flagellate()),
            muscle: over.muscle.apply(KindProfile::muscle()),
            bacterium: over.bacterium.apply(KindProfile::bacterium()),
            ciliate: over.ciliate.apply(KindProfile::ciliate()),
            antibody: over.antibody.apply(KindProfile::antibody()),
            pathogen: over.pathogen.apply(KindProfile::pathogen()),
        }
    }
}

/// One [`KindProfile`] per kind
///
/// A config file may name any subset of kinds and fields; the rest keep
/// the kind's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "KindProfilesOverride")]
pub struct KindProfiles {
    pub amoeba: KindProfile,
    pub flagellate: KindProfile,
    pub muscle: KindProfile,
    pub bacterium: KindProfile,
    pub ciliate: KindProfile,
    pub antibody: KindProfile,
    pub pathogen: KindProfile,
}

impl Default for KindProfiles {
    fn default() -> Self {
        Self {
            amoeba: KindProfile::amoeba(),
            flagellate: KindProfile::flagellate(),
            muscle: KindProfile::muscle(),
            bacterium: KindProfile::bacterium(),
            ciliate: KindProfile::ciliate(),
            antibody: KindProfile::antibody(),
            pathogen: KindProfile::pathogen(),
        }
    }
}

impl KindProfiles {
    pub fn get(&self, kind: Kind) -> &KindProfile {
        match kind {
            Kind::Amoeba => &self.amoeba,
            Kind::Flagellate => &self.flagellate,
            Kind::Muscle => &self.muscle,
            Kind::Bacterium => &self.bacterium,
            Kind::Ciliate => &self.ciliate,
            Kind::Antibody => &self.antibody,
            Kind::Pathogen => &self.pathogen,
        }
    }

    pub fn get_mut(&mut self, kind: Kind) -> &mut KindProfile {
        match kind {
            Kind::Amoeba => &mut self.amoeba,
            Kind::Flagellate => &mut self.flagellate,
            Kind::Muscle => &mut self.muscle,
            Kind::Bacterium => &mut self.bacterium,
            Kind::Ciliate => &mut self.ciliate,
            Kind::Antibody => &mut self.antibody,
            Kind::Pathogen => &mut self.pathogen,
        }
    }
}

/// Agent count per kind, used for seeding
///
/// `Default` is all zeros; keys missing from a config file fall back to
/// [`KindCounts::standard_seeding`] instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default = "KindCounts::standard_seeding")]
pub struct KindCounts {
    pub amoeba: usize,
    pub flagellate: usize,
    pub muscle: usize,
    pub bacterium: usize,
    pub ciliate: usize,
    pub antibody: usize,
    pub pathogen: usize,
}

impl KindCounts {
    /// Five of each tissue kind plus ten antibodies, no pathogens
    pub fn standard_seeding() -> Self {
        Self {
            amoeba: 5,
            flagellate: 5,
            muscle: 5,
            bacterium: 5,
            ciliate: 5,
            antibody: 10,
            pathogen: 0,
        }
    }

    pub fn get(&self, kind: Kind) -> usize {
        match kind {
            Kind::Amoeba => self.amoeba,
            Kind::Flagellate => self.flagellate,
            Kind::Muscle => self.muscle,
            Kind::Bacterium => self.bacterium,
            Kind::Ciliate => self.ciliate,
            Kind::Antibody => self.antibody,
            Kind::Pathogen => self.pathogen,
        }
    }

    pub fn set(&mut self, kind: Kind, count: usize) {
        match kind {
            Kind::Amoeba => self.amoeba = count,
            Kind::Flagellate => self.flagellate = count,
            Kind::Muscle => self.muscle = count,
            Kind::Bacterium => self.bacterium = count,
            Kind::Ciliate => self.ciliate = count,
            Kind::Antibody => self.antibody = count,
            Kind::Pathogen => self.pathogen = count,
        }
    }

    pub fn total(&self) -> usize {
        Kind::ALL.iter().map(|kind| self.get(*kind)).sum()
    }
}

impl FromIterator<(Kind, usize)> for KindCounts {
    fn from_iter<I: IntoIterator<Item = (Kind, usize)>>(iter: I) -> Self {
        let mut counts = Self::default();
        for (kind, count) in iter {
            counts.set(kind, counts.get(kind) + count);
        }
        counts
    }
}

fn check_probability(name: &str, value: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SimError::InvalidConfig(format!(
            "{} ({}) must be a probability in [0, 1]",
            name, value
        )));
    }
    Ok(())
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML override document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn profile(&self, kind: Kind) -> &KindProfile {
        self.kinds.get(kind)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.plane_width <= self.behavior.flagellate_body_width
            || self.plane_height <= self.behavior.flagellate_body_width
        {
            return Err(SimError::InvalidConfig(format!(
                "plane ({}x{}) must be larger than the flagellate body width ({})",
                self.plane_width, self.plane_height, self.behavior.flagellate_body_width
            )));
        }

        if self.depth_max <= 0.0 {
            return Err(SimError::InvalidConfig("depth_max must be positive".into()));
        }

        if self.frame_ms <= 0.0 {
            return Err(SimError::InvalidConfig("frame_ms must be positive".into()));
        }

        if self.spawner.min_interval_ms > self.spawner.max_interval_ms {
            return Err(SimError::InvalidConfig(format!(
                "spawner min_interval_ms ({}) should be <= max_interval_ms ({})",
                self.spawner.min_interval_ms, self.spawner.max_interval_ms
            )));
        }

        // A transfer must not be able to flip which side is richer
        if self.transfer_amount * 2.0 > self.transfer_margin {
            return Err(SimError::InvalidConfig(format!(
                "transfer_amount ({}) should be at most half of transfer_margin ({})",
                self.transfer_amount, self.transfer_margin
            )));
        }

        check_probability("pseudopod_chance", self.behavior.pseudopod_chance)?;
        check_probability("ciliate_flip_chance", self.behavior.ciliate_flip_chance)?;
        check_probability("pathogen_wander_chance", self.behavior.pathogen_wander_chance)?;
        check_probability("pathogen_division_chance", self.behavior.pathogen_division_chance)?;

        for kind in Kind::ALL {
            let profile = self.profile(kind);
            if profile.size <= 0.0 {
                return Err(SimError::InvalidConfig(format!("{} size must be positive", kind)));
            }
            if profile.population_cap > self.population_cap {
                return Err(SimError::InvalidConfig(format!(
                    "{} population_cap ({}) exceeds the hard cap ({})",
                    kind, profile.population_cap, self.population_cap
                )));
            }
            check_probability(&format!("{} reproduction_rate", kind), profile.reproduction_rate)?;
        }

        if self.initial_population.total() > self.population_cap {
            return Err(SimError::InvalidConfig(format!(
                "initial population ({}) exceeds the hard cap ({})",
                self.initial_population.total(),
                self.population_cap
            )));
        }

        Ok(())
    }
}
