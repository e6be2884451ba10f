//! # Grid Mathematics
//!
//! Distance measures on the pixel grid.

use crate::config::{DIAGONAL_STEP_COST, ORTHOGONAL_STEP_COST};
use crate::world::Coordinate;

/// Straight-line distance between two continuous positions.
pub fn euclidean_distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = ax - bx;
    let dy = ay - by;
    (dx * dx + dy * dy).sqrt()
}

/// Cost of a single step between two 8-connected neighbours.
///
/// Returns `None` when the coordinates are not adjacent.
pub fn step_cost(from: Coordinate, to: Coordinate) -> Option<f64> {
    let dx = (to.x as i64 - from.x as i64).abs();
    let dy = (to.y as i64 - from.y as i64).abs();
    match (dx, dy) {
        (0, 1) | (1, 0) => Some(ORTHOGONAL_STEP_COST),
        (1, 1) => Some(DIAGONAL_STEP_COST),
        _ => None,
    }
}

/// Shortest 8-connected path cost between two coordinates on an open grid.
///
/// # Examples
///
/// ```
/// use pixelnav::{octile_distance, Coordinate};
///
/// let cost = octile_distance(Coordinate::new(0, 0), Coordinate::new(3, 1));
/// assert!((cost - (1.414 + 2.0)).abs() < 1e-9);
/// ```
pub fn octile_distance(from: Coordinate, to: Coordinate) -> f64 {
    let dx = (to.x as i64 - from.x as i64).unsigned_abs();
    let dy = (to.y as i64 - from.y as i64).unsigned_abs();
    let diagonal = dx.min(dy);
    let straight = dx.max(dy) - diagonal;
    diagonal as f64 * DIAGONAL_STEP_COST + straight as f64 * ORTHOGONAL_STEP_COST
}
