// Terminal construction in two steps: a side-effect-free plan that validates
// everything it can, then `materialize` which talks to the host.

use tracing::{debug, info, warn};

use crate::error::{Result, TerminalError};
use crate::placement::{self, Anchor, Facing, Pose, Vec3};
use crate::renderer::TerminalBuffer;
use crate::surface::{Surface, SurfaceError, SurfaceSpawner, TextAlignment, Transform};
use crate::terminal::config::TerminalConfig;
use crate::terminal::{push_frame, Terminal, TerminalId};

#[derive(Debug, Clone, PartialEq)]
pub enum TerminalKind {
    /// Mounted on a block face.
    Block { anchor: Pose, facing: Facing },
    /// Free-floating at a location.
    Floating,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TerminalPlan {
    kind: TerminalKind,
    spawn_pose: Pose,
    config: TerminalConfig,
}

impl TerminalPlan {
    pub fn block(anchor: &impl Anchor, facing: Facing, config: TerminalConfig) -> Result<Self> {
        config.validate()?;
        let placement = placement::place(anchor, facing)?;
        let anchor_pose = anchor.pose();
        let spawn_pose = placement.spawn_pose(&anchor_pose);

        debug!("Planned block terminal on {} face at {}", facing, spawn_pose);
        Ok(Self {
            kind: TerminalKind::Block {
                anchor: anchor_pose,
                facing,
            },
            spawn_pose,
            config,
        })
    }

    pub fn floating(location: Pose, config: TerminalConfig) -> Result<Self> {
        config.validate()?;
        if !location.position.is_finite() {
            return Err(TerminalError::InvalidConfiguration(format!(
                "location {} is not finite",
                location.position
            )));
        }

        debug!("Planned floating terminal at {}", location);
        Ok(Self {
            kind: TerminalKind::Floating,
            spawn_pose: location,
            config,
        })
    }

    pub fn kind(&self) -> &TerminalKind {
        &self.kind
    }

    pub fn spawn_pose(&self) -> &Pose {
        &self.spawn_pose
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// Cosmetic transform applied to the surface after spawning.
    pub fn transform(&self) -> Transform {
        Transform::uniform(
            Vec3::new(
                f64::from(self.config.translation_x),
                f64::from(self.config.translation_y),
                0.0,
            ),
            f64::from(self.config.scale),
        )
    }

    /// Spawn and configure the surface. On any failure after the spawn the
    /// surface is destroyed again before the error is returned.
    pub fn materialize<W: SurfaceSpawner>(self, spawner: &mut W) -> Result<Terminal<W::Surface>> {
        let buffer = TerminalBuffer::new(
            self.config.line_limit,
            self.config.max_lines,
            self.config.background_color,
            self.config.default_text_color,
        )?;
        let id = TerminalId::new();

        let mut surface = spawner.spawn_surface(&self.spawn_pose)?;
        info!("Spawned surface for terminal {} at {}", id, self.spawn_pose);

        if let Err(e) = self.configure(&mut surface, &buffer) {
            warn!("Surface setup for terminal {} failed, removing it: {}", id, e);
            if let Err(cleanup) = surface.destroy() {
                warn!("Failed to remove surface for terminal {}: {}", id, cleanup);
            }
            return Err(e.into());
        }

        Ok(Terminal::new(id, self.kind, self.config, buffer, surface))
    }

    fn configure<S: Surface>(
        &self,
        surface: &mut S,
        buffer: &TerminalBuffer,
    ) -> std::result::Result<(), SurfaceError> {
        surface.set_alignment(TextAlignment::Left)?;
        surface.set_transform(self.transform())?;
        surface.set_persistent(false)?;
        push_frame(surface, buffer)
    }
}
