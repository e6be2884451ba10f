//! # Navigation Module
//!
//! Path planning and rendezvous solving over an [`ObstacleMap`].
//!
//! The planner and the solver are independent: both read the same clearance
//! oracle and neither calls the other. Their tuning lives in plain
//! serializable config structs so callers can keep policy out of code.
//!
//! [`ObstacleMap`]: crate::world::ObstacleMap

pub mod path;
pub mod planner;
pub mod rendezvous;

pub use path::*;
pub use planner::*;
pub use rendezvous::*;

use crate::config;
use crate::world::Palette;
use crate::NavResult;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Configuration for the path planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Buffer radius every non-goal cell on the path must keep from obstacles
    pub buffer_radius: u32,
    /// Cap on frontier pops; `None` uses the world's pixel count
    pub max_iterations: Option<usize>,
}

impl PlannerConfig {
    /// Creates a planner configuration with the given buffer radius.
    pub fn new(buffer_radius: u32) -> Self {
        Self {
            buffer_radius,
            max_iterations: None,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new(config::DEFAULT_PLANNER_BUFFER)
    }
}

/// Configuration for the rendezvous solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RendezvousConfig {
    /// Buffer radius a meeting point must keep from obstacles
    pub buffer_radius: u32,
    /// Largest radius probed by the annular scan
    pub max_search_radius: u32,
    /// Radius increment between annular scans, starting from 1
    pub radius_step: u32,
    /// Candidates collected in one scan before settling on the fairest
    pub candidate_limit: usize,
    /// Fractions along the agent-to-agent segment probed once the scan fails
    pub interpolation_fractions: Vec<f64>,
    /// Largest radius of the random probes around each agent
    pub probe_radius_limit: u32,
    /// Random probes attempted at each radius
    pub probes_per_radius: u32,
}

impl RendezvousConfig {
    /// Creates a rendezvous configuration with the given buffer radius.
    pub fn new(buffer_radius: u32) -> Self {
        Self {
            buffer_radius,
            max_search_radius: config::DEFAULT_MAX_SEARCH_RADIUS,
            radius_step: config::DEFAULT_RADIUS_STEP,
            candidate_limit: config::DEFAULT_CANDIDATE_LIMIT,
            interpolation_fractions: config::DEFAULT_INTERPOLATION_FRACTIONS.to_vec(),
            probe_radius_limit: config::DEFAULT_PROBE_RADIUS_LIMIT,
            probes_per_radius: config::DEFAULT_PROBES_PER_RADIUS,
        }
    }
}

impl Default for RendezvousConfig {
    fn default() -> Self {
        Self::new(config::DEFAULT_RENDEZVOUS_BUFFER)
    }
}

/// Complete navigation configuration.
///
/// # Examples
///
/// ```
/// use pixelnav::NavConfig;
///
/// let config = NavConfig::default();
/// assert_eq!(config.planner.buffer_radius, 7);
/// assert_eq!(config.rendezvous.buffer_radius, 5);
///
/// let restored = NavConfig::from_json(&config.to_json().unwrap()).unwrap();
/// assert_eq!(restored, config);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavConfig {
    /// Path planner tuning
    pub planner: PlannerConfig,
    /// Rendezvous solver tuning
    pub rendezvous: RendezvousConfig,
    /// Colours that mean clear and obstacle
    pub palette: Palette,
    /// Seed for the rendezvous solver's random probes
    pub seed: u64,
}

impl NavConfig {
    /// Creates the default configuration with a specific seed.
    pub fn new(seed: u64) -> Self {
        Self {
            planner: PlannerConfig::default(),
            rendezvous: RendezvousConfig::default(),
            palette: Palette::default(),
            seed,
        }
    }

    /// Creates a configuration for testing on small hand-drawn maps.
    ///
    /// Buffers are small enough that one-pixel corridors stay passable.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            planner: PlannerConfig::new(0),
            rendezvous: RendezvousConfig::new(1),
            palette: Palette::default(),
            seed,
        }
    }

    /// Creates a seeded random number generator for the rendezvous solver.
    pub fn create_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }

    /// Builds a planner from this configuration.
    pub fn planner(&self) -> PathPlanner {
        PathPlanner::new(self.planner.clone())
    }

    /// Builds a rendezvous solver from this configuration.
    pub fn rendezvous_solver(&self) -> RendezvousSolver {
        RendezvousSolver::new(self.rendezvous.clone())
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> NavResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> NavResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self::new(42)
    }
}
