//! Geometric primitives: points, sizes, and rectangles.
//!
//! The compositor mixes two coordinate spaces. Logical coordinates are what
//! clients and the output layout speak; physical coordinates are device
//! pixels. The conversion between them is a multiplication by the output's
//! scale factor, see [`Point::to_physical`] and [`Size::to_physical`].

use num_traits::{Num, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

// --- Generic Point<T> ---

/// A 2D point with generic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize + Num + Copy",
    deserialize = "T: Deserialize<'de> + Num + Copy"
))]
pub struct Point<T: Num + Copy> {
    /// The x-coordinate of the point.
    pub x: T,
    /// The y-coordinate of the point.
    pub y: T,
}

impl<T: Num + Copy + Eq> Eq for Point<T> {}
impl<T: Num + Copy + std::hash::Hash> std::hash::Hash for Point<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.x.hash(state);
        self.y.hash(state);
    }
}

impl<T: Num + Copy> Point<T> {
    /// Creates a new point with the given coordinates.
    pub const fn new(x: T, y: T) -> Self {
        Point { x, y }
    }

    /// Converts both coordinates to `f64`.
    ///
    /// Values that cannot be represented fall back to `0.0`.
    pub fn to_f64(self) -> Point<f64>
    where
        T: ToPrimitive,
    {
        Point::new(self.x.to_f64().unwrap_or(0.0), self.y.to_f64().unwrap_or(0.0))
    }
}

impl Point<f64> {
    /// Multiplies both coordinates by `scale` and truncates toward zero.
    ///
    /// Truncation (not rounding) keeps placement identical to the integer
    /// conversion used by the renderer when building draw boxes.
    pub fn to_physical(self, scale: f64) -> Point<i32> {
        Point::new((self.x * scale) as i32, (self.y * scale) as i32)
    }
}

impl<T: Num + Copy + Add<Output = T>> Add for Point<T> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Point {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl<T: Num + Copy + Sub<Output = T>> Sub for Point<T> {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Point {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl<T: Num + Copy> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Point::new(x, y)
    }
}

// --- Generic Size<T> ---

/// A 2D size (width and height) with generic dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize + Num + Copy",
    deserialize = "T: Deserialize<'de> + Num + Copy"
))]
pub struct Size<T: Num + Copy> {
    /// The width component of the size.
    pub width: T,
    /// The height component of the size.
    pub height: T,
}

impl<T: Num + Copy + Eq> Eq for Size<T> {}
impl<T: Num + Copy + std::hash::Hash> std::hash::Hash for Size<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.width.hash(state);
        self.height.hash(state);
    }
}

impl<T: Num + Copy> Size<T> {
    /// Creates a new size with the given width and height.
    pub const fn new(width: T, height: T) -> Self {
        Size { width, height }
    }

    /// Checks if the area is zero (width or height is zero).
    pub fn is_empty(&self) -> bool
    where
        T: Zero + PartialEq,
    {
        self.width.is_zero() || self.height.is_zero()
    }

    /// Returns the size with width and height exchanged.
    ///
    /// Used when a quarter-turn transform is applied to a buffer.
    pub fn swapped(self) -> Self {
        Size::new(self.height, self.width)
    }
}

impl Size<i32> {
    /// Multiplies both dimensions by `scale` and truncates toward zero.
    pub fn to_physical(self, scale: f64) -> Size<i32> {
        Size::new(
            (f64::from(self.width) * scale) as i32,
            (f64::from(self.height) * scale) as i32,
        )
    }
}

impl<T: Num + Copy> From<(T, T)> for Size<T> {
    fn from((width, height): (T, T)) -> Self {
        Size::new(width, height)
    }
}

// --- Generic Rect<T> ---

/// A 2D rectangle defined by an origin point and a size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize + Num + Copy",
    deserialize = "T: Deserialize<'de> + Num + Copy"
))]
pub struct Rect<T: Num + Copy> {
    /// The origin point (top-left corner) of the rectangle.
    pub origin: Point<T>,
    /// The size (width and height) of the rectangle.
    pub size: Size<T>,
}

impl<T: Num + Copy + Eq> Eq for Rect<T> {}

impl<T: Num + Copy> Rect<T> {
    /// Creates a new rectangle from an origin point and a size.
    pub const fn new(origin: Point<T>, size: Size<T>) -> Self {
        Rect { origin, size }
    }

    /// Creates a new rectangle from individual coordinate and dimension values.
    pub const fn from_coords(x: T, y: T, width: T, height: T) -> Self {
        Rect {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> T {
        self.origin.x
    }

    pub fn y(&self) -> T {
        self.origin.y
    }

    pub fn width(&self) -> T {
        self.size.width
    }

    pub fn height(&self) -> T {
        self.size.height
    }

    /// The x-coordinate of the right edge (`origin.x + size.width`).
    pub fn right(&self) -> T {
        self.origin.x + self.size.width
    }

    /// The y-coordinate of the bottom edge (`origin.y + size.height`).
    pub fn bottom(&self) -> T {
        self.origin.y + self.size.height
    }

    /// Checks if a point lies inside the rectangle. The right and bottom
    /// edges are exclusive.
    pub fn contains_point(&self, point: &Point<T>) -> bool
    where
        T: PartialOrd,
    {
        point.x >= self.x() && point.x < self.right() && point.y >= self.y() && point.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(3, 4);
        let b = Point::new(1, -2);
        assert_eq!(a + b, Point::new(4, 2));
        assert_eq!(a - b, Point::new(2, 6));
    }

    #[test]
    fn test_to_physical_truncates_toward_zero() {
        assert_eq!(Point::new(10.4, -3.7).to_physical(1.0), Point::new(10, -3));
        assert_eq!(Point::new(10.0, 20.0).to_physical(1.5), Point::new(15, 30));
        assert_eq!(Size::new(101, 33).to_physical(1.5), Size::new(151, 49));
    }

    #[test]
    fn test_size_swapped_and_empty() {
        assert_eq!(Size::new(1920, 1080).swapped(), Size::new(1080, 1920));
        assert!(Size::new(0, 10).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }

    #[test]
    fn test_rect_edges_and_containment() {
        let rect = Rect::from_coords(10, 20, 100, 50);
        assert_eq!(rect.right(), 110);
        assert_eq!(rect.bottom(), 70);
        assert!(rect.contains_point(&Point::new(10, 20)));
        assert!(!rect.contains_point(&Point::new(110, 20)));
    }
}
