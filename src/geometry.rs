//! Plain 2-d helpers shared by the reduction algorithm and the figures.

use nalgebra::Vector2;

/// A point in canvas coordinates.
///
/// Componentwise addition and subtraction come with the nalgebra type.
pub type Point = Vector2<f64>;

/// Linear interpolation between two points: `a * (1 - s) + b * s`.
///
/// `s` is deliberately not clamped; values outside `[0, 1]` extrapolate
/// along the same line.
pub fn lerp(a: Point, b: Point, s: f64) -> Point {
    a * (1.0 - s) + b * s
}

/// Convert polar coordinates into a cartesian point.
pub fn to_cartesian(r: f64, theta: f64) -> Point {
    Point::new(r * theta.cos(), r * theta.sin())
}
