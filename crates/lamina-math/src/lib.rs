#![warn(missing_docs)]

//! Math types for the lamina slicing pipeline.
//!
//! Thin wrappers around nalgebra providing the 2D types layer
//! processing works with: points, vectors, and tolerance constants
//! for contour comparisons.

use nalgebra::Vector2;

/// A point in the 2D layer plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in the 2D layer plane.
pub type Vec2 = Vector2<f64>;

/// The right-hand perpendicular of `v`.
///
/// For a counter-clockwise contour traversed in order, the right-hand
/// perpendicular of an edge direction points out of the enclosed area.
pub fn right_normal(v: &Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in mm.
    pub linear: f64,
    /// Area tolerance in mm².
    pub area: f64,
}

impl Tolerance {
    /// Default slicing tolerances (1e-6 mm linear, 1e-12 mm² area).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        area: 1e-12,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point2, b: &Point2) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if a signed area is effectively zero.
    pub fn area_is_zero(&self, a: f64) -> bool {
        a.abs() < self.area
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
