//! Small vector and bounding-box types used by the simulation.
//!
//! Positions are continuous pixel coordinates (`Vec2`); tiles and pixel
//! snapping use integer vectors (`IVec2`). The y axis points up: tile row 0
//! is the bottom of the level.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Integer 2D vector, used for tile coordinates and pixel positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IVec2 {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
}

/// A tile coordinate on the level grid.
pub type TileCoord = IVec2;

impl IVec2 {
    /// Zero vector.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new integer vector.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Vector with both components set to `v`.
    #[must_use]
    pub const fn splat(v: i32) -> Self {
        Self { x: v, y: v }
    }

    /// Component-wise multiplication.
    #[must_use]
    pub const fn mul_elem(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    /// Component-wise clamp.
    #[must_use]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self::new(self.x.clamp(min.x, max.x), self.y.clamp(min.y, max.y))
    }

    /// Manhattan distance to another vector.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Chebyshev (ring) distance to another vector.
    #[must_use]
    pub fn chebyshev(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Convert to a float vector.
    #[must_use]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

impl Add for IVec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for IVec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for IVec2 {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Float 2D vector for continuous positions and velocities.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Vec2 {
    /// Zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle` radians.
    #[must_use]
    pub fn from_angle(angle: f32) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Normalized copy, or zero for a zero-length vector.
    #[must_use]
    pub fn normalize_or_zero(self) -> Self {
        let len = self.length();
        if len <= f32::EPSILON {
            Self::ZERO
        } else {
            self * (1.0 / len)
        }
    }

    /// Truncating conversion to integer pixels.
    #[must_use]
    pub fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.x as i32, self.y as i32)
    }

    /// Rounding conversion to integer pixels.
    #[must_use]
    pub fn round(self) -> IVec2 {
        IVec2::new(self.x.round() as i32, self.y.round() as i32)
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

/// Integer axis-aligned bounding box with inclusive `min`/`max` corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Aabb {
    /// Lower-left corner.
    pub min: IVec2,
    /// Upper-right corner.
    pub max: IVec2,
}

impl Aabb {
    /// Create a box from its corners.
    #[must_use]
    pub const fn new(min: IVec2, max: IVec2) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` extending `half` in each direction.
    #[must_use]
    pub fn from_center_half(center: IVec2, half: IVec2) -> Self {
        Self::new(center - half, center + half)
    }

    /// Translate the box by `offset`.
    #[must_use]
    pub fn translate(self, offset: IVec2) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }

    /// Box center (integer division).
    #[must_use]
    pub fn center(self) -> IVec2 {
        let d = self.max - self.min;
        IVec2::new(d.x / 2, d.y / 2) + self.min
    }

    /// Half extents (integer division).
    #[must_use]
    pub fn half(self) -> IVec2 {
        let d = self.max - self.min;
        IVec2::new(d.x / 2, d.y / 2)
    }

    /// Scale the box around its center by `factor` per axis.
    #[must_use]
    pub fn scale_center(self, factor: IVec2) -> Self {
        let center = self.center();
        let extent = self.half().mul_elem(factor);
        Self::new(center - extent, center + extent)
    }

    /// True if `p` lies inside the box (inclusive).
    #[must_use]
    pub fn contains(self, p: IVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// True if the boxes overlap. Touching edges do not count.
    #[must_use]
    pub fn collides(self, other: Self) -> bool {
        !(self.min.x >= other.max.x
            || self.max.x <= other.min.x
            || self.min.y >= other.max.y
            || self.max.y <= other.min.y)
    }
}

/// Cardinal facing used by movers and sprites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// +y.
    North,
    /// -y.
    #[default]
    South,
    /// +x.
    East,
    /// -x.
    West,
}

impl Direction {
    /// All four cardinal directions in search order.
    pub const CARDINALS: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Unit tile offset for this direction.
    #[must_use]
    pub const fn offset(self) -> IVec2 {
        match self {
            Self::North => IVec2::new(0, 1),
            Self::South => IVec2::new(0, -1),
            Self::East => IVec2::new(1, 0),
            Self::West => IVec2::new(-1, 0),
        }
    }

    /// Dominant-axis direction of `v`, or `if_zero` for a zero vector.
    #[must_use]
    pub fn from_vec2(v: Vec2, if_zero: Self) -> Self {
        if v.length() < 1e-8 {
            return if_zero;
        }

        if v.x.abs() > v.y.abs() {
            if v.x > 0.0 {
                Self::East
            } else {
                Self::West
            }
        } else if v.y > 0.0 {
            Self::North
        } else {
            Self::South
        }
    }
}

/// Wrap an angle into `[0, TAU)`.
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_collides_excludes_touching() {
        let a = Aabb::new(IVec2::new(0, 0), IVec2::new(4, 4));
        let b = Aabb::new(IVec2::new(4, 0), IVec2::new(8, 4));
        let c = Aabb::new(IVec2::new(3, 3), IVec2::new(8, 8));

        assert!(!a.collides(b));
        assert!(a.collides(c));
        assert!(c.collides(a));
    }

    #[test]
    fn test_aabb_scale_center() {
        let a = Aabb::new(IVec2::new(0, 2), IVec2::new(6, 4));
        let scaled = a.scale_center(IVec2::splat(5));

        assert_eq!(scaled.center(), a.center());
        assert_eq!(scaled.min, IVec2::new(-12, -2));
        assert_eq!(scaled.max, IVec2::new(18, 8));
    }

    #[test]
    fn test_direction_from_vec2() {
        assert_eq!(Direction::from_vec2(Vec2::new(2.0, 1.0), Direction::South), Direction::East);
        assert_eq!(Direction::from_vec2(Vec2::new(-2.0, 1.0), Direction::South), Direction::West);
        assert_eq!(Direction::from_vec2(Vec2::new(0.0, 1.0), Direction::South), Direction::North);
        assert_eq!(Direction::from_vec2(Vec2::ZERO, Direction::East), Direction::East);
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);
        let n = Vec2::new(3.0, 4.0).normalize_or_zero();
        assert!((n.length() - 1.0).abs() < 1e-6);
    }
}
