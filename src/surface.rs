// Host-side surface boundary.
// The host owns the renderable primitive; terminals only drive it through
// these traits.

use thiserror::Error;

use crate::placement::{Pose, Vec3};
use crate::renderer::{Frame, Rgb};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("Surface spawn failed at {pose}: {reason}")]
    Spawn { pose: String, reason: String },

    #[error("Surface is no longer valid")]
    Invalid,

    #[error("Surface operation failed: {0}")]
    Operation(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    #[default]
    Center,
    Left,
    Right,
}

/// Rotation in degrees applied on top of the surface's spawn rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub scale: Vec3,
    pub rotation: Rotation,
}

impl Transform {
    pub fn uniform(translation: Vec3, scale: f64) -> Self {
        Self {
            translation,
            scale: Vec3::new(scale, scale, scale),
            rotation: Rotation::default(),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::uniform(Vec3::ZERO, 1.0)
    }
}

/// A host-provided text surface.
pub trait Surface {
    fn set_displayed_text(&mut self, frame: &Frame) -> Result<(), SurfaceError>;
    fn set_background_color(&mut self, color: Rgb) -> Result<(), SurfaceError>;
    fn set_transform(&mut self, transform: Transform) -> Result<(), SurfaceError>;
    fn set_alignment(&mut self, alignment: TextAlignment) -> Result<(), SurfaceError>;
    fn set_persistent(&mut self, persistent: bool) -> Result<(), SurfaceError>;
    fn destroy(&mut self) -> Result<(), SurfaceError>;
}

/// Creates surfaces in the host world.
pub trait SurfaceSpawner {
    type Surface: Surface;

    fn spawn_surface(&mut self, pose: &Pose) -> Result<Self::Surface, SurfaceError>;
}
