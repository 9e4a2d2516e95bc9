use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Component-wise comparison within `epsilon`.
    pub fn approx_eq(&self, other: &Vec3, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.z - other.z).abs() <= epsilon
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A position in a named world plus a look direction in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub world: String,
    pub position: Vec3,
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub pitch: f32,
}

impl Pose {
    pub fn new(world: impl Into<String>, position: Vec3) -> Self {
        Self {
            world: world.into(),
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn with_offset(&self, offset: Vec3) -> Pose {
        Pose {
            position: self.position + offset,
            ..self.clone()
        }
    }

    pub fn with_rotation(mut self, yaw: f32, pitch: f32) -> Pose {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{} yaw={} pitch={}",
            self.world, self.position, self.yaw, self.pitch
        )
    }
}
