//! # Paths
//!
//! The planner's result: an ordered run of pixels from start to goal.

use crate::utils::step_cost;
use crate::world::Coordinate;
use serde::{Deserialize, Serialize};

/// An ordered sequence of coordinates from start to goal, both inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    coordinates: Vec<Coordinate>,
}

impl Path {
    /// Wraps a sequence of coordinates.
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Self { coordinates }
    }

    /// Number of coordinates on the path.
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Whether the path has no coordinates at all.
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// First coordinate of the path.
    pub fn start(&self) -> Option<Coordinate> {
        self.coordinates.first().copied()
    }

    /// Last coordinate of the path.
    pub fn goal(&self) -> Option<Coordinate> {
        self.coordinates.last().copied()
    }

    /// The coordinates in order from start to goal.
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Iterates over the coordinates from start to goal.
    pub fn iter(&self) -> std::slice::Iter<'_, Coordinate> {
        self.coordinates.iter()
    }

    /// Whether the path passes through `coordinate`.
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.coordinates.contains(&coordinate)
    }

    /// Whether every consecutive pair is an 8-connected step.
    pub fn is_contiguous(&self) -> bool {
        self.coordinates
            .windows(2)
            .all(|pair| step_cost(pair[0], pair[1]).is_some())
    }

    /// Sum of step costs along the path.
    ///
    /// Orthogonal steps cost 1.0 and diagonal steps 1.414. Pairs that are not
    /// adjacent contribute nothing, so check [`Path::is_contiguous`] first
    /// when the path did not come from the planner.
    pub fn cost(&self) -> f64 {
        self.coordinates
            .windows(2)
            .filter_map(|pair| step_cost(pair[0], pair[1]))
            .sum()
    }

    /// Consumes the path, returning its coordinates.
    pub fn into_vec(self) -> Vec<Coordinate> {
        self.coordinates
    }
}

impl From<Vec<Coordinate>> for Path {
    fn from(coordinates: Vec<Coordinate>) -> Self {
        Self::new(coordinates)
    }
}

impl IntoIterator for Path {
    type Item = Coordinate;
    type IntoIter = std::vec::IntoIter<Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.coordinates.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.coordinates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(points: &[(i32, i32)]) -> Path {
        points.iter().map(|&p| Coordinate::from(p)).collect::<Vec<_>>().into()
    }

    #[test]
    fn test_empty_path() {
        let path = Path::default();
        assert!(path.is_empty());
        assert_eq!(path.start(), None);
        assert_eq!(path.goal(), None);
        assert_eq!(path.cost(), 0.0);
        assert!(path.is_contiguous());
    }

    #[test]
    fn test_path_cost() {
        let path = coords(&[(0, 0), (1, 1), (2, 1), (2, 2)]);
        assert!((path.cost() - 3.414).abs() < 1e-9);
        assert!(path.is_contiguous());
        assert_eq!(path.start(), Some(Coordinate::new(0, 0)));
        assert_eq!(path.goal(), Some(Coordinate::new(2, 2)));
    }

    #[test]
    fn test_gap_breaks_contiguity() {
        let path = coords(&[(0, 0), (2, 0)]);
        assert!(!path.is_contiguous());
    }
}
