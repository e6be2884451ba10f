//! # Colour Sources
//!
//! The capability the navigation code needs from a world, and an in-memory
//! bitmap that provides it.

use crate::world::{Coordinate, Palette, Rgb, WorldBounds};
use crate::{NavError, NavResult};
use serde::{Deserialize, Serialize};

/// Read-only access to a colour-indexed world surface.
///
/// Implementations report out-of-range lookups as [`NavError::OutOfBounds`]
/// instead of panicking. Any other failure for an in-bounds pixel should be a
/// [`NavError::MalformedMap`].
pub trait ColorSource {
    /// The extent of the surface.
    fn bounds(&self) -> WorldBounds;

    /// Looks up the colour of a single pixel.
    fn color_at(&self, coordinate: Coordinate) -> NavResult<Rgb>;
}

impl<T: ColorSource + ?Sized> ColorSource for &T {
    fn bounds(&self) -> WorldBounds {
        (**self).bounds()
    }

    fn color_at(&self, coordinate: Coordinate) -> NavResult<Rgb> {
        (**self).color_at(coordinate)
    }
}

impl<T: ColorSource + ?Sized> ColorSource for Box<T> {
    fn bounds(&self) -> WorldBounds {
        (**self).bounds()
    }

    fn color_at(&self, coordinate: Coordinate) -> NavResult<Rgb> {
        (**self).color_at(coordinate)
    }
}

/// A row-major in-memory bitmap.
///
/// # Examples
///
/// ```
/// use pixelnav::{ColorMap, ColorSource, Coordinate, Rgb};
///
/// let mut map = ColorMap::filled(4, 3, Rgb::WHITE).unwrap();
/// map.set(Coordinate::new(1, 2), Rgb::WALL_BROWN).unwrap();
/// assert_eq!(map.color_at(Coordinate::new(1, 2)).unwrap(), Rgb::WALL_BROWN);
/// assert!(map.color_at(Coordinate::new(4, 0)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorMap {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl ColorMap {
    /// Creates a map with every pixel set to one colour.
    pub fn filled(width: u32, height: u32, color: Rgb) -> NavResult<Self> {
        Self::check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        })
    }

    /// Wraps an existing row-major pixel buffer.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb>) -> NavResult<Self> {
        Self::check_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(NavError::MalformedMap(format!(
                "expected {} pixels for a {}x{} map, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds a map from a text sketch, one line per row.
    ///
    /// `.` is the palette's clear colour, `#` its obstacle colour, and any
    /// other non-whitespace character is scenery ([`Rgb::GRASS_GREEN`]).
    /// Leading and trailing blank lines and indentation are ignored.
    pub fn from_ascii(sketch: &str, palette: &Palette) -> NavResult<Self> {
        let rows: Vec<&str> = sketch
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.chars().count()) as u32;
        Self::check_dimensions(width, height)?;

        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as u32 != width {
                return Err(NavError::MalformedMap(format!(
                    "row {} has {} pixels, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            pixels.extend(row.chars().map(|c| match c {
                '.' => palette.clear,
                '#' => palette.obstacle,
                _ => Rgb::GRASS_GREEN,
            }));
        }

        Self::from_pixels(width, height, pixels)
    }

    fn check_dimensions(width: u32, height: u32) -> NavResult<()> {
        if width == 0 || height == 0 {
            return Err(NavError::InvalidInput(format!(
                "map dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(NavError::InvalidInput(format!(
                "map dimensions {}x{} exceed the coordinate range",
                width, height
            )));
        }
        Ok(())
    }

    /// Map width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Map height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, coordinate: Coordinate) -> Option<usize> {
        if !self.bounds().contains(coordinate) {
            return None;
        }
        Some(coordinate.y as usize * self.width as usize + coordinate.x as usize)
    }

    /// Sets a single pixel.
    pub fn set(&mut self, coordinate: Coordinate, color: Rgb) -> NavResult<()> {
        let index = self
            .index(coordinate)
            .ok_or_else(|| self.bounds().out_of_bounds(coordinate))?;
        self.pixels[index] = color;
        Ok(())
    }

    /// Paints a filled rectangle, clipped to the map.
    pub fn fill_rect(&mut self, top_left: Coordinate, width: u32, height: u32, color: Rgb) {
        for dy in 0..height.min(i32::MAX as u32) as i32 {
            for dx in 0..width.min(i32::MAX as u32) as i32 {
                if let Some(index) = self.index(top_left.offset(dx, dy)) {
                    self.pixels[index] = color;
                }
            }
        }
    }

    /// Paints the one-pixel outline of a rectangle, clipped to the map.
    pub fn draw_rect_outline(&mut self, top_left: Coordinate, width: u32, height: u32, color: Rgb) {
        if width == 0 || height == 0 {
            return;
        }
        let right = width.min(i32::MAX as u32) as i32 - 1;
        let bottom = height.min(i32::MAX as u32) as i32 - 1;
        self.fill_rect(top_left, width, 1, color);
        self.fill_rect(top_left.offset(0, bottom), width, 1, color);
        self.fill_rect(top_left, 1, height, color);
        self.fill_rect(top_left.offset(right, 0), 1, height, color);
    }

    /// Counts the pixels of a given colour.
    pub fn count(&self, color: Rgb) -> usize {
        self.pixels.iter().filter(|&&pixel| pixel == color).count()
    }
}

impl ColorSource for ColorMap {
    fn bounds(&self) -> WorldBounds {
        WorldBounds::new(self.width, self.height)
    }

    fn color_at(&self, coordinate: Coordinate) -> NavResult<Rgb> {
        let index = self
            .index(coordinate)
            .ok_or_else(|| self.bounds().out_of_bounds(coordinate))?;
        // A deserialized map can carry a short pixel buffer.
        self.pixels.get(index).copied().ok_or_else(|| {
            NavError::MalformedMap(format!("no pixel stored for {}", coordinate))
        })
    }
}
