use std::fmt;

use serde::{Deserialize, Serialize};

/// A 3D point or vector in scene coordinates (millimetres, y up).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn add(&self, other: &Vec3) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(&self, other: &Vec3) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    pub fn translate(&self, dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Rotate about the vertical axis through the origin.
    pub fn rotate_y(&self, rotation: Rotation) -> Self {
        let (sin_r, cos_r) = rotation.sin_cos();
        Self::new(
            self.x * cos_r + self.z * sin_r,
            self.y,
            -self.x * sin_r + self.z * cos_r,
        )
    }

    pub fn distance_to(&self, other: &Vec3) -> f64 {
        let d = self.sub(other);
        (d.x * d.x + d.y * d.y + d.z * d.z).sqrt()
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.scale(0.5);
        Self {
            min: center.sub(&half),
            max: center.add(&half),
        }
    }

    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = points.first()?;
        let mut bb = Self::new(*first, *first);
        for p in &points[1..] {
            bb.min = Vec3::new(bb.min.x.min(p.x), bb.min.y.min(p.y), bb.min.z.min(p.z));
            bb.max = Vec3::new(bb.max.x.max(p.x), bb.max.y.max(p.y), bb.max.z.max(p.z));
        }
        Some(bb)
    }

    pub fn size(&self) -> Vec3 {
        self.max.sub(&self.min)
    }

    pub fn center(&self) -> Vec3 {
        self.min.add(&self.max).scale(0.5)
    }

    /// Grow the box by `margin` on every side.
    pub fn padded(&self, margin: f64) -> Self {
        Self {
            min: self.min.translate(-margin, -margin, -margin),
            max: self.max.translate(margin, margin, margin),
        }
    }

    pub fn contains_point(&self, p: &Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min: Vec3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Vec3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }
}

/// Which wall a module faces. Serialized as its angle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    #[default]
    Front,
    Right,
    Back,
    Left,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::Front, Rotation::Right, Rotation::Back, Rotation::Left];

    pub fn degrees(&self) -> i32 {
        match self {
            Rotation::Front => 0,
            Rotation::Right => 90,
            Rotation::Back => 180,
            Rotation::Left => -90,
        }
    }

    pub fn radians(&self) -> f64 {
        f64::from(self.degrees()).to_radians()
    }

    /// Exact `(sin, cos)` of the angle; avoids the drift of `f64::sin_cos` at quarter turns.
    pub fn sin_cos(&self) -> (f64, f64) {
        match self {
            Rotation::Front => (0.0, 1.0),
            Rotation::Right => (1.0, 0.0),
            Rotation::Back => (0.0, -1.0),
            Rotation::Left => (-1.0, 0.0),
        }
    }

    /// True when the module's width runs along the global z axis.
    pub fn is_sideways(&self) -> bool {
        matches!(self, Rotation::Left | Rotation::Right)
    }

    pub fn turned_clockwise(&self) -> Self {
        match self {
            Rotation::Front => Rotation::Right,
            Rotation::Right => Rotation::Back,
            Rotation::Back => Rotation::Left,
            Rotation::Left => Rotation::Front,
        }
    }

    pub fn turned_counter_clockwise(&self) -> Self {
        match self {
            Rotation::Front => Rotation::Left,
            Rotation::Left => Rotation::Back,
            Rotation::Back => Rotation::Right,
            Rotation::Right => Rotation::Front,
        }
    }

    /// Compose two rotations (applying `other` after `self`).
    pub fn then(&self, other: Rotation) -> Self {
        let turns = (self.quarter_turns() + other.quarter_turns()) % 4;
        Self::from_quarter_turns(turns)
    }

    /// Quarter turns from `Front`, in `0..4`.
    pub fn quarter_turns(&self) -> u8 {
        match self {
            Rotation::Front => 0,
            Rotation::Right => 1,
            Rotation::Back => 2,
            Rotation::Left => 3,
        }
    }

    fn from_quarter_turns(turns: u8) -> Self {
        Self::ALL[usize::from(turns % 4)]
    }
}

impl TryFrom<i32> for Rotation {
    type Error = InvalidRotation;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Front),
            90 => Ok(Rotation::Right),
            180 => Ok(Rotation::Back),
            -90 => Ok(Rotation::Left),
            other => Err(InvalidRotation(other)),
        }
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// A rotation angle outside the four wall orientations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRotation(pub i32);

impl fmt::Display for InvalidRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rotation must be one of 0, 90, 180 or -90 degrees, got {}", self.0)
    }
}

impl std::error::Error for InvalidRotation {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_right_swaps_axes() {
        let p = Vec3::new(600.0, 10.0, 670.0).rotate_y(Rotation::Right);
        assert!((p.x - 670.0).abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);
        assert!((p.z + 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_matches_trig() {
        let p = Vec3::new(3.0, 0.0, 4.0);
        for rotation in Rotation::ALL {
            let rad = rotation.radians();
            let exact = p.rotate_y(rotation);
            assert!((exact.x - (p.x * rad.cos() + p.z * rad.sin())).abs() < 1e-9);
            assert!((exact.z - (-p.x * rad.sin() + p.z * rad.cos())).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rotation_degrees_roundtrip_serde() {
        let json = serde_json::to_string(&Rotation::Left).unwrap();
        assert_eq!(json, "-90");
        let back: Rotation = serde_json::from_str("90").unwrap();
        assert_eq!(back, Rotation::Right);
        assert!(serde_json::from_str::<Rotation>("45").is_err());
    }

    #[test]
    fn test_clockwise_cycle() {
        let mut r = Rotation::Front;
        for _ in 0..4 {
            r = r.turned_clockwise();
        }
        assert_eq!(r, Rotation::Front);
        assert_eq!(Rotation::Back.turned_counter_clockwise(), Rotation::Right);
        assert_eq!(Rotation::Right.then(Rotation::Left), Rotation::Front);
    }

    #[test]
    fn test_aabb_union_and_contains() {
        let a = Aabb::from_center_size(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 2.0, 2.0));
        let b = Aabb::new(Vec3::new(5.0, 5.0, 5.0), Vec3::new(6.0, 6.0, 6.0));
        let u = a.union(&b);
        assert!(u.contains_point(&Vec3::new(3.0, 3.0, 3.0)));
        assert!(!a.intersects(&b));
        assert!(u.intersects(&b));
        assert!((u.size().x - 7.0).abs() < 1e-9);
    }
}
