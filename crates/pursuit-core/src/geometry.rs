//! Planar geometry: [`Vec2`] positions/directions and the [`Bounds`] rectangle.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use crate::error::BoundsError;

/// A 2D vector used for positions, directions, and velocities.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// Unit vector pointing up (+y).
    pub const UP: Self = Self::new(0.0, 1.0);
    /// Unit vector pointing right (+x).
    pub const RIGHT: Self = Self::new(1.0, 0.0);

    /// Create a vector from its components.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Dot product.
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Unit vector in the same direction, or `None` for a zero or
    /// non-finite vector.
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            Some(Self::new(self.x / len, self.y / len))
        } else {
            None
        }
    }

    /// Rotate counter-clockwise by `radians`.
    ///
    /// `x' = x·cos θ − y·sin θ`, `y' = x·sin θ + y·cos θ`.
    pub fn rotated(self, radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        self.rotated_by(sin, cos)
    }

    /// Rotate using a precomputed `(sin θ, cos θ)` pair.
    pub fn rotated_by(self, sin: f32, cos: f32) -> Self {
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// True if both components are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Axis-aligned rectangle bounding the spawn region of the arena.
///
/// Constructed through [`Bounds::new`], which enforces
/// `bottom_left < top_right` on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    bottom_left: Vec2,
    top_right: Vec2,
}

impl Default for Bounds {
    /// A 20×20 arena centred on the origin.
    fn default() -> Self {
        Self {
            bottom_left: Vec2::new(-10.0, -10.0),
            top_right: Vec2::new(10.0, 10.0),
        }
    }
}

impl Bounds {
    /// Create bounds from two corners.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError::NonFinite`] if any component is NaN or
    /// infinite, [`BoundsError::Inverted`] unless
    /// `bottom_left.x < top_right.x` and `bottom_left.y < top_right.y`, and
    /// [`BoundsError::Unbounded`] if the width or height overflows.
    pub fn new(bottom_left: Vec2, top_right: Vec2) -> Result<Self, BoundsError> {
        if !bottom_left.is_finite() || !top_right.is_finite() {
            return Err(BoundsError::NonFinite);
        }
        if bottom_left.x >= top_right.x || bottom_left.y >= top_right.y {
            return Err(BoundsError::Inverted {
                bottom_left,
                top_right,
            });
        }
        let extent = top_right - bottom_left;
        if !extent.is_finite() {
            return Err(BoundsError::Unbounded);
        }
        Ok(Self {
            bottom_left,
            top_right,
        })
    }

    /// Lower-left corner.
    pub fn bottom_left(&self) -> Vec2 {
        self.bottom_left
    }

    /// Upper-right corner.
    pub fn top_right(&self) -> Vec2 {
        self.top_right
    }

    /// Horizontal extent.
    pub fn width(&self) -> f32 {
        self.top_right.x - self.bottom_left.x
    }

    /// Vertical extent.
    pub fn height(&self) -> f32 {
        self.top_right.y - self.bottom_left.y
    }

    /// Length of the diagonal.
    pub fn diagonal(&self) -> f32 {
        self.width().hypot(self.height())
    }

    /// Centre point.
    pub fn center(&self) -> Vec2 {
        (self.bottom_left + self.top_right) * 0.5
    }

    /// True if `p` lies inside or on the edge of the rectangle.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.bottom_left.x
            && p.x <= self.top_right.x
            && p.y >= self.bottom_left.y
            && p.y <= self.top_right.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rotate_quarter_turn() {
        let v = Vec2::UP.rotated(std::f32::consts::FRAC_PI_2);
        assert!((v.x + 1.0).abs() < 1e-6, "x = {}", v.x);
        assert!(v.y.abs() < 1e-6, "y = {}", v.y);
    }

    #[test]
    fn normalized_rejects_zero() {
        assert_eq!(Vec2::ZERO.normalized(), None);
        let n = Vec2::new(3.0, 4.0).normalized().unwrap();
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(Vec2::new(0.0, 0.0).distance(Vec2::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn bounds_rejects_inverted_corners() {
        let err = Bounds::new(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)).unwrap_err();
        assert!(matches!(err, BoundsError::Inverted { .. }));
        let err = Bounds::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)).unwrap_err();
        assert!(matches!(err, BoundsError::Inverted { .. }));
    }

    #[test]
    fn bounds_rejects_nan() {
        let err = Bounds::new(Vec2::new(f32::NAN, 0.0), Vec2::new(1.0, 1.0)).unwrap_err();
        assert_eq!(err, BoundsError::NonFinite);
    }

    #[test]
    fn bounds_rejects_overflowing_extent() {
        let err = Bounds::new(Vec2::new(-f32::MAX, 0.0), Vec2::new(f32::MAX, 1.0)).unwrap_err();
        assert_eq!(err, BoundsError::Unbounded);
        let err = Bounds::new(Vec2::new(0.0, -f32::MAX), Vec2::new(1.0, f32::MAX)).unwrap_err();
        assert_eq!(err, BoundsError::Unbounded);
        assert!(Bounds::new(Vec2::new(0.0, 0.0), Vec2::new(f32::MAX, 1.0)).is_ok());
    }

    #[test]
    fn bounds_extents() {
        let b = Bounds::new(Vec2::new(-2.0, -1.0), Vec2::new(4.0, 7.0)).unwrap();
        assert_eq!(b.width(), 6.0);
        assert_eq!(b.height(), 8.0);
        assert_eq!(b.diagonal(), 10.0);
        assert_eq!(b.center(), Vec2::new(1.0, 3.0));
        assert!(b.contains(Vec2::new(4.0, 7.0)));
        assert!(!b.contains(Vec2::new(4.1, 7.0)));
    }

    proptest! {
        #[test]
        fn rotate_then_unrotate_is_identity(
            angle in -10.0f32..10.0,
            theta in -std::f32::consts::TAU..std::f32::consts::TAU,
        ) {
            let v = Vec2::new(angle.cos(), angle.sin());
            let back = v.rotated(theta).rotated(-theta);
            prop_assert!((back.x - v.x).abs() < 1e-5);
            prop_assert!((back.y - v.y).abs() < 1e-5);
        }

        #[test]
        fn rotation_preserves_length(
            x in -100.0f32..100.0,
            y in -100.0f32..100.0,
            theta in -std::f32::consts::TAU..std::f32::consts::TAU,
        ) {
            let v = Vec2::new(x, y);
            let r = v.rotated(theta);
            prop_assert!((r.length() - v.length()).abs() <= 1e-3 * v.length().max(1.0));
        }
    }
}
