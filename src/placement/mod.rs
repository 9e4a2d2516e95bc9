//! Block-face placement.
//!
//! A block-mounted terminal sits a hair off one vertical face of its anchor
//! block, centered along that face, and is rotated so its front points away
//! from the block. Each supported facing maps to a fixed offset and yaw.

pub mod geometry;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TerminalError};

pub use geometry::{Pose, Vec3};

/// Something a terminal can be mounted on.
pub trait Anchor {
    fn is_solid(&self) -> bool;
    fn pose(&self) -> Pose;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    North,
    East,
    South,
    West,
    Up,
    Down,
}

impl Facing {
    pub const CARDINAL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    pub fn name(self) -> &'static str {
        match self {
            Facing::North => "north",
            Facing::East => "east",
            Facing::South => "south",
            Facing::West => "west",
            Facing::Up => "up",
            Facing::Down => "down",
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Facing {
    type Err = TerminalError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" => Ok(Facing::North),
            "east" => Ok(Facing::East),
            "south" => Ok(Facing::South),
            "west" => Ok(Facing::West),
            "up" => Ok(Facing::Up),
            "down" => Ok(Facing::Down),
            other => Err(TerminalError::InvalidConfiguration(format!(
                "unknown facing: {other:?}"
            ))),
        }
    }
}

/// Where a surface goes relative to its anchor block, and which way it faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub offset: Vec3,
    pub yaw: f32,
}

impl Placement {
    const fn new(x: f64, y: f64, z: f64, yaw: f32) -> Self {
        Self {
            offset: Vec3::new(x, y, z),
            yaw,
        }
    }

    pub fn spawn_pose(&self, anchor_pose: &Pose) -> Pose {
        anchor_pose
            .with_offset(self.offset)
            .with_rotation(self.yaw, 0.0)
    }
}

// 0.005 off the face keeps the text from z-fighting with the block.
const PLACEMENTS: [(Facing, Placement); 4] = [
    (Facing::North, Placement::new(0.5, 0.0, 1.005, 0.0)),
    (Facing::East, Placement::new(-0.005, 0.0, 0.5, 90.0)),
    (Facing::South, Placement::new(0.5, 0.0, -0.005, 180.0)),
    (Facing::West, Placement::new(1.005, 0.0, 0.5, -90.0)),
];

/// Table lookup without the anchor check.
pub fn placement_for(facing: Facing) -> Result<Placement> {
    PLACEMENTS
        .iter()
        .find(|(f, _)| *f == facing)
        .map(|(_, placement)| *placement)
        .ok_or(TerminalError::UnsupportedFacing(facing))
}

/// Compute the placement of a surface on `anchor`'s `facing` face.
pub fn place(anchor: &impl Anchor, facing: Facing) -> Result<Placement> {
    let placement = placement_for(facing)?;

    if !anchor.is_solid() {
        return Err(TerminalError::NonSolidAnchor {
            position: anchor.pose().position,
        });
    }

    debug!(
        "Placed on {} face: offset {}, yaw {}",
        facing, placement.offset, placement.yaw
    );
    Ok(placement)
}
