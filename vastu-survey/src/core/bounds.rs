//! Axis-aligned bounding box tracking the map extent.
//!
//! An empty map has no extent. [`Bounds::empty`] starts inverted (min > max)
//! so the first [`Bounds::expand_to_include`] snaps it onto that point.

use super::point::Point;

/// Axis-aligned bounding box (cm).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds {
    #[inline]
    pub const fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Create an empty (inverted) bounding box.
    #[inline]
    pub fn empty() -> Self {
        Self::new(
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::INFINITY,
            f32::NEG_INFINITY,
        )
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Grow to include a point.
    #[inline]
    pub fn expand_to_include(&mut self, point: Point) {
        self.min_x = self.min_x.min(point.x);
        self.max_x = self.max_x.max(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_y = self.max_y.max(point.y);
    }

    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.max_x - self.min_x
        }
    }

    #[inline]
    pub fn height(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.max_y - self.min_y
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bounds() {
        let b = Bounds::empty();
        assert!(b.is_empty());
        assert!(!b.contains(Point::new(0.0, 0.0)));
        assert_eq!(b.width(), 0.0);
    }

    #[test]
    fn test_expand() {
        let mut b = Bounds::empty();
        b.expand_to_include(Point::new(1.0, 1.0));
        assert!(!b.is_empty());
        assert_eq!(b, Bounds::new(1.0, 1.0, 1.0, 1.0));

        b.expand_to_include(Point::new(-2.0, 3.0));
        assert_eq!(b, Bounds::new(-2.0, 1.0, 1.0, 3.0));
        assert_eq!(b.width(), 3.0);
        assert_eq!(b.height(), 2.0);
        assert!(b.contains(Point::new(0.0, 2.0)));
    }
}
