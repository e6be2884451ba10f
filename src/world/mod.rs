//! # World Module
//!
//! Coordinates, colours and the bitmap world the navigation code reads.
//!
//! This module contains the fundamental building blocks every search uses:
//! - Integer pixel coordinates and continuous agent positions
//! - World bounds and the colour palette that gives pixels their meaning
//! - The `ColorSource` capability and an in-memory bitmap implementing it
//! - The clearance oracle built on top of a colour source

pub mod clearance;
pub mod map;

pub use clearance::*;
pub use map::*;

use serde::{Deserialize, Serialize};

/// An integer pixel coordinate in the world.
///
/// # Examples
///
/// ```
/// use pixelnav::Coordinate;
///
/// let coord = Coordinate::truncate(10.9, -0.5);
/// assert_eq!(coord, Coordinate::new(10, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    /// Creates a new coordinate.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Truncates a continuous position toward zero.
    ///
    /// Values beyond the `i32` range saturate and NaN maps to zero, so the
    /// result is always a real coordinate that bounds checks can reject.
    pub fn truncate(x: f64, y: f64) -> Self {
        Self::new(x as i32, y as i32)
    }

    /// Returns the coordinate shifted by the given offset.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Calculates the Euclidean distance to a continuous position.
    pub fn distance_to(self, point: Point) -> f64 {
        crate::utils::euclidean_distance(self.x as f64, self.y as f64, point.x, point.y)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A continuous agent position, as supplied by the surrounding simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the exact midpoint between two points.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Returns the point a fraction `t` of the way toward `other`.
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + t * (other.x - self.x),
            self.y + t * (other.y - self.y),
        )
    }

    /// Truncates this point to the pixel containing it.
    pub fn to_coordinate(self) -> Coordinate {
        Coordinate::truncate(self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x as f64, y as f64)
    }
}

impl From<Coordinate> for Point {
    fn from(coordinate: Coordinate) -> Self {
        Self::new(coordinate.x as f64, coordinate.y as f64)
    }
}

/// The valid coordinate range `[0, width) x [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: u32,
    pub height: u32,
}

impl WorldBounds {
    /// Creates new bounds.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Checks whether a coordinate lies inside the world.
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.x >= 0
            && coordinate.y >= 0
            && (coordinate.x as i64) < self.width as i64
            && (coordinate.y as i64) < self.height as i64
    }

    /// Number of pixels in the world.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether the world has no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Moves a coordinate to the nearest in-bounds pixel.
    ///
    /// An empty world has no such pixel; the origin is returned.
    pub fn clamp(&self, coordinate: Coordinate) -> Coordinate {
        let max_x = (self.width.saturating_sub(1)).min(i32::MAX as u32) as i32;
        let max_y = (self.height.saturating_sub(1)).min(i32::MAX as u32) as i32;
        Coordinate::new(coordinate.x.clamp(0, max_x), coordinate.y.clamp(0, max_y))
    }

    /// Builds the out-of-bounds error for a coordinate.
    pub fn out_of_bounds(&self, coordinate: Coordinate) -> crate::NavError {
        crate::NavError::OutOfBounds {
            x: coordinate.x,
            y: coordinate.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// A 24-bit pixel colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Open ground in the default palette.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    /// Impassable terrain in the default palette.
    pub const WALL_BROWN: Rgb = Rgb::new(181, 101, 29);
    /// Neither clear nor obstacle; used for scenery.
    pub const GRASS_GREEN: Rgb = Rgb::new(34, 139, 34);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Creates a new colour.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// The two colours the navigation code gives meaning to.
///
/// Every other colour is neither clear nor an obstacle: an agent may not stand
/// on it, but it does not push the buffer zone outward either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Fully open ground
    pub clear: Rgb,
    /// Impassable terrain
    pub obstacle: Rgb,
}

impl Palette {
    /// Creates a palette from explicit colours.
    pub fn new(clear: Rgb, obstacle: Rgb) -> Self {
        Self { clear, obstacle }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(Rgb::WHITE, Rgb::WALL_BROWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_truncation() {
        assert_eq!(Coordinate::truncate(3.99, 7.01), Coordinate::new(3, 7));
        assert_eq!(Coordinate::truncate(-0.9, -1.5), Coordinate::new(0, -1));
        assert_eq!(Coordinate::truncate(f64::NAN, 1e12), Coordinate::new(0, i32::MAX));
    }

    #[test]
    fn test_point_midpoint_and_lerp() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(21.0, 4.0);
        assert_eq!(a.midpoint(b), Point::new(10.5, 2.0));
        assert_eq!(a.midpoint(b).to_coordinate(), Coordinate::new(10, 2));
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = WorldBounds::new(10, 5);
        assert!(bounds.contains(Coordinate::new(0, 0)));
        assert!(bounds.contains(Coordinate::new(9, 4)));
        assert!(!bounds.contains(Coordinate::new(10, 4)));
        assert!(!bounds.contains(Coordinate::new(9, 5)));
        assert!(!bounds.contains(Coordinate::new(-1, 0)));
        assert_eq!(bounds.area(), 50);
    }

    #[test]
    fn test_bounds_clamp() {
        let bounds = WorldBounds::new(10, 5);
        assert_eq!(bounds.clamp(Coordinate::new(-4, 2)), Coordinate::new(0, 2));
        assert_eq!(bounds.clamp(Coordinate::new(40, 40)), Coordinate::new(9, 4));
        assert_eq!(bounds.clamp(Coordinate::new(3, 3)), Coordinate::new(3, 3));
    }

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.clear, Rgb::new(255, 255, 255));
        assert_eq!(palette.obstacle, Rgb::new(181, 101, 29));
    }
}
