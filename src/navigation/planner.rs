//! # Path Planner
//!
//! Uniform-cost search over the 8-connected pixel grid.
//!
//! Every cell the agent passes through has to keep the configured buffer from
//! obstacles. The goal is the one exception: it is a fixed target chosen by
//! the caller, so it only has to be open ground itself.

use crate::config::{DIAGONAL_STEP_COST, ORTHOGONAL_STEP_COST};
use crate::navigation::{Path, PlannerConfig};
use crate::world::{ColorSource, Coordinate, ObstacleMap, Point};
use crate::{NavError, NavResult};
use log::{debug, warn};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Neighbour offsets in expansion order. Orthogonal moves come first.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Shortest-path planner over a clearance oracle.
///
/// # Examples
///
/// ```
/// use pixelnav::{ColorMap, Coordinate, ObstacleMap, Palette, PathPlanner, Rgb};
///
/// let world = ColorMap::filled(10, 10, Rgb::WHITE).unwrap();
/// let map = ObstacleMap::new(&world, Palette::default());
///
/// let path = PathPlanner::default().find_path(&map, (0, 0), (9, 9)).unwrap();
/// assert_eq!(path.len(), 10);
/// assert_eq!(path.start(), Some(Coordinate::new(0, 0)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathPlanner {
    config: PlannerConfig,
}

impl PathPlanner {
    /// Creates a planner with the given configuration.
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// The configuration this planner searches with.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Finds the cheapest path from `start` to `goal`.
    ///
    /// Both endpoints are truncated to pixel coordinates. They only have to
    /// lie inside the world; neither is held to the buffer rule.
    ///
    /// # Errors
    ///
    /// - [`NavError::InvalidInput`] if either endpoint is outside the world
    /// - [`NavError::SearchExhausted`] if the frontier runs dry or the
    ///   iteration cap is reached before the goal is settled. Iterations
    ///   count settled cells; stale frontier entries are free.
    pub fn find_path<S: ColorSource + ?Sized>(
        &self,
        map: &ObstacleMap<'_, S>,
        start: impl Into<Point>,
        goal: impl Into<Point>,
    ) -> NavResult<Path> {
        let start = start.into().to_coordinate();
        let goal = goal.into().to_coordinate();
        let bounds = map.bounds();

        if !map.in_bounds(start) {
            warn!("Invalid start position: {}", start);
            return Err(NavError::InvalidInput(format!(
                "start position {} is outside the {}x{} world",
                start, bounds.width, bounds.height
            )));
        }
        if !map.in_bounds(goal) {
            warn!("Invalid goal position: {}", goal);
            return Err(NavError::InvalidInput(format!(
                "goal position {} is outside the {}x{} world",
                goal, bounds.width, bounds.height
            )));
        }

        let max_iterations = self.config.max_iterations.unwrap_or_else(|| bounds.area());
        let mut search = SearchState::new(start);
        let mut iterations = 0;

        while iterations < max_iterations {
            let Some(entry) = search.frontier.pop() else {
                break;
            };

            let current = entry.coordinate;
            // Stale entry for a cell already settled at a lower cost.
            if !search.settled.insert(current) {
                continue;
            }
            // Only settling pops count, so the default cap of one per pixel
            // is never reached before every reachable cell is settled.
            iterations += 1;

            if current == goal {
                let path = search.reconstruct(goal);
                debug!(
                    "Path {} -> {} found: {} steps, cost {:.3}, {} iterations",
                    start,
                    goal,
                    path.len().saturating_sub(1),
                    entry.cost,
                    iterations
                );
                return Ok(path);
            }

            for (dx, dy) in NEIGHBOR_OFFSETS {
                let neighbor = current.offset(dx, dy);
                if !map.in_bounds(neighbor) || search.settled.contains(&neighbor) {
                    continue;
                }

                let admissible = if neighbor == goal {
                    map.is_exactly_clear(neighbor)
                } else {
                    map.is_clear(neighbor, self.config.buffer_radius)
                };
                if !admissible {
                    continue;
                }

                let step = if dx == 0 || dy == 0 {
                    ORTHOGONAL_STEP_COST
                } else {
                    DIAGONAL_STEP_COST
                };
                search.relax(current, neighbor, entry.cost + step);
            }
        }

        let capped = !search.frontier.is_empty();
        warn!(
            "No path from {} to {} after {} iterations (cap {}, reached: {})",
            start, goal, iterations, max_iterations, capped
        );
        Err(NavError::SearchExhausted { iterations, capped })
    }

    /// Like [`PathPlanner::find_path`], but reports failure as an empty
    /// sequence for callers that only want coordinates.
    pub fn find_path_or_empty<S: ColorSource + ?Sized>(
        &self,
        map: &ObstacleMap<'_, S>,
        start: impl Into<Point>,
        goal: impl Into<Point>,
    ) -> Vec<Coordinate> {
        match self.find_path(map, start, goal) {
            Ok(path) => path.into_vec(),
            Err(err) => {
                debug!("Returning empty path: {}", err);
                Vec::new()
            }
        }
    }
}

/// Bookkeeping for a single search. Dropped when the call returns.
struct SearchState {
    frontier: BinaryHeap<FrontierEntry>,
    costs: HashMap<Coordinate, f64>,
    came_from: HashMap<Coordinate, Coordinate>,
    settled: HashSet<Coordinate>,
    sequence: u64,
}

impl SearchState {
    fn new(start: Coordinate) -> Self {
        let mut state = Self {
            frontier: BinaryHeap::new(),
            costs: HashMap::new(),
            came_from: HashMap::new(),
            settled: HashSet::new(),
            sequence: 0,
        };
        state.costs.insert(start, 0.0);
        state.frontier.push(FrontierEntry {
            cost: 0.0,
            sequence: 0,
            coordinate: start,
        });
        state
    }

    /// Records `cost` for `neighbor` if it beats what is already known.
    fn relax(&mut self, current: Coordinate, neighbor: Coordinate, cost: f64) {
        let improves = self
            .costs
            .get(&neighbor)
            .map_or(true, |&known| cost < known);
        if !improves {
            return;
        }

        self.costs.insert(neighbor, cost);
        self.came_from.insert(neighbor, current);
        self.sequence += 1;
        self.frontier.push(FrontierEntry {
            cost,
            sequence: self.sequence,
            coordinate: neighbor,
        });
    }

    /// Walks predecessor links back from the goal.
    fn reconstruct(&self, goal: Coordinate) -> Path {
        let mut coordinates = vec![goal];
        let mut current = goal;
        while let Some(&previous) = self.came_from.get(&current) {
            coordinates.push(previous);
            current = previous;
        }
        coordinates.reverse();
        Path::new(coordinates)
    }
}

/// Frontier entry ordered by cost, then by discovery order.
#[derive(Debug, Clone)]
struct FrontierEntry {
    cost: f64,
    sequence: u64,
    coordinate: Coordinate,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior in BinaryHeap
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}
