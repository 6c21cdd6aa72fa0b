//! Basic 2D value types.

use serde::{Deserialize, Serialize};

/// A point (or vector) on the drawing plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub const ZERO: Coord = Coord { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Coord) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle of the vector from `self` to `other`, in radians.
    pub fn angle_to(&self, other: &Coord) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    pub fn midpoint(&self, other: &Coord) -> Coord {
        Coord::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Polar offset from this point.
    pub fn push(&self, theta: f64, distance: f64) -> Coord {
        Coord::new(
            self.x + theta.cos() * distance,
            self.y + theta.sin() * distance,
        )
    }
}

impl std::ops::Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Neg for Coord {
    type Output = Coord;

    fn neg(self) -> Coord {
        Coord::new(-self.x, -self.y)
    }
}
