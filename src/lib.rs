//! # Pixelnav
//!
//! Spatial reasoning for agents moving over a colour-coded bitmap world.
//!
//! ## Architecture Overview
//!
//! Terrain is a 2D field of RGB pixels. One colour means open ground, another
//! means an impassable obstacle, and anything else is decoration that agents
//! may not stand on. Three pieces sit on top of that field:
//!
//! - **Obstacle Map**: a clearance oracle answering "is this pixel open, and is
//!   every pixel within a square buffer free of obstacles?"
//! - **Path Planner**: a uniform-cost search over the 8-connected pixel grid
//!   that keeps the agent a buffer distance away from obstacles
//! - **Rendezvous Solver**: a staged search for a fair, obstacle-clear meeting
//!   point between two agents
//!
//! Every call is a fresh, independent search. Nothing is cached between calls
//! and the world is only ever read.
//!
//! ```
//! use pixelnav::{ColorMap, Coordinate, ObstacleMap, Palette, PathPlanner, Rgb};
//!
//! let world = ColorMap::filled(20, 20, Rgb::WHITE).unwrap();
//! let map = ObstacleMap::new(&world, Palette::default());
//! let path = PathPlanner::default().find_path(&map, (0, 0), (5, 5)).unwrap();
//! assert_eq!(path.goal(), Some(Coordinate::new(5, 5)));
//! ```

pub mod navigation;
pub mod utils;
pub mod world;

pub use navigation::*;
pub use utils::*;
pub use world::*;

/// Core error type for the pixelnav engine.
#[derive(thiserror::Error, Debug)]
pub enum NavError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A coordinate fell outside the world
    #[error("Coordinate ({x}, {y}) is outside the {width}x{height} world")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    /// Caller-supplied input is unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The planner ran out of frontier or iterations before settling the goal
    #[error("No path found after {iterations} iterations (iteration cap hit: {capped})")]
    SearchExhausted { iterations: usize, capped: bool },

    /// The colour source could not answer for an in-bounds pixel
    #[error("Malformed map: {0}")]
    MalformedMap(String),

}

/// Result type used throughout the pixelnav codebase.
pub type NavResult<T> = Result<T, NavError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tuning constants.
pub mod config {
    /// Buffer radius the planner keeps around every non-goal cell
    pub const DEFAULT_PLANNER_BUFFER: u32 = 7;

    /// Buffer radius a meeting point must keep from obstacles
    pub const DEFAULT_RENDEZVOUS_BUFFER: u32 = 5;

    /// Cost of an orthogonal grid step
    pub const ORTHOGONAL_STEP_COST: f64 = 1.0;

    /// Cost of a diagonal grid step
    pub const DIAGONAL_STEP_COST: f64 = 1.414;

    /// Largest radius probed by the annular meeting point scan
    pub const DEFAULT_MAX_SEARCH_RADIUS: u32 = 99;

    /// Radius increment between annular scans
    pub const DEFAULT_RADIUS_STEP: u32 = 2;

    /// Candidates collected in one scan before settling on the fairest
    pub const DEFAULT_CANDIDATE_LIMIT: usize = 10;

    /// Fractions along the agent-to-agent segment probed after the scan fails
    pub const DEFAULT_INTERPOLATION_FRACTIONS: [f64; 7] = [0.5, 0.4, 0.6, 0.3, 0.7, 0.2, 0.8];

    /// Largest radius of the random probes around each agent
    pub const DEFAULT_PROBE_RADIUS_LIMIT: u32 = 19;

    /// Random probes attempted at each radius around an agent
    pub const DEFAULT_PROBES_PER_RADIUS: u32 = 10;
}
