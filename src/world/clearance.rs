//! # Clearance Oracle
//!
//! Decides whether a pixel is safe to occupy. Both the planner and the
//! rendezvous solver call into this many thousands of times per search, so
//! the checks bail out at the first failing pixel.

use crate::world::{ColorSource, Coordinate, Palette, Rgb, WorldBounds};
use crate::NavResult;

/// Read-only view of a colour source that answers clearance queries.
///
/// # Examples
///
/// ```
/// use pixelnav::{ColorMap, Coordinate, ObstacleMap, Palette, Rgb};
///
/// let mut world = ColorMap::filled(20, 20, Rgb::WHITE).unwrap();
/// world.set(Coordinate::new(10, 10), Rgb::WALL_BROWN).unwrap();
///
/// let map = ObstacleMap::new(&world, Palette::default());
/// assert!(map.is_clear(Coordinate::new(13, 10), 2));
/// assert!(!map.is_clear(Coordinate::new(12, 10), 2));
/// ```
pub struct ObstacleMap<'a, S: ?Sized> {
    source: &'a S,
    palette: Palette,
    bounds: WorldBounds,
}

impl<'a, S: ColorSource + ?Sized> ObstacleMap<'a, S> {
    /// Wraps a colour source, giving its pixels meaning through a palette.
    pub fn new(source: &'a S, palette: Palette) -> Self {
        Self {
            source,
            palette,
            bounds: source.bounds(),
        }
    }

    /// The extent of the underlying world.
    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    /// The palette used to classify pixels.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Checks whether a coordinate lies inside the world.
    pub fn in_bounds(&self, coordinate: Coordinate) -> bool {
        self.bounds.contains(coordinate)
    }

    /// Looks up a pixel, rejecting out-of-bounds coordinates before the
    /// colour source sees them.
    pub fn color_at(&self, coordinate: Coordinate) -> NavResult<Rgb> {
        if !self.in_bounds(coordinate) {
            return Err(self.bounds.out_of_bounds(coordinate));
        }
        self.source.color_at(coordinate)
    }

    /// Whether the pixel itself is exactly the clear colour, ignoring its
    /// surroundings. Failed lookups count as not clear.
    pub fn is_exactly_clear(&self, coordinate: Coordinate) -> bool {
        matches!(self.color_at(coordinate), Ok(color) if color == self.palette.clear)
    }

    /// Whether an in-bounds pixel is the obstacle colour.
    ///
    /// Out-of-bounds and unreadable pixels are not obstacles.
    fn is_obstacle(&self, coordinate: Coordinate) -> bool {
        matches!(self.color_at(coordinate), Ok(color) if color == self.palette.obstacle)
    }

    /// Whether a pixel is clear and every in-bounds pixel in the square of
    /// side `2 * buffer_radius + 1` around it is free of obstacles.
    ///
    /// Parts of the square that hang off the edge of the world are ignored.
    pub fn is_clear(&self, coordinate: Coordinate, buffer_radius: u32) -> bool {
        if !self.is_exactly_clear(coordinate) {
            return false;
        }

        let radius = buffer_radius as i64;
        let (cx, cy) = (coordinate.x as i64, coordinate.y as i64);

        // Only walk the part of the square that overlaps the world.
        let min_x = (cx - radius).max(0);
        let max_x = (cx + radius).min(self.bounds.width as i64 - 1);
        let min_y = (cy - radius).max(0);
        let max_y = (cy + radius).min(self.bounds.height as i64 - 1);

        for x in min_x..=max_x {
            for y in min_y..=max_y {
                if self.is_obstacle(Coordinate::new(x as i32, y as i32)) {
                    return false;
                }
            }
        }

        true
    }
}
