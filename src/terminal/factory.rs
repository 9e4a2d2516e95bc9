//! Convenience constructors.
//!
//! Each function is `plan` + `materialize`. Nothing here holds state.

use crate::error::Result;
use crate::placement::{Anchor, Facing, Pose};
use crate::surface::SurfaceSpawner;
use crate::terminal::{Terminal, TerminalConfig, TerminalPlan};

/// Terminal on `anchor`'s `facing` face with default settings.
///
/// `anchor` must be solid and `facing` one of north, east, south or west.
pub fn create_block_terminal<W: SurfaceSpawner>(
    spawner: &mut W,
    anchor: &impl Anchor,
    facing: Facing,
) -> Result<Terminal<W::Surface>> {
    create_block_terminal_with(spawner, anchor, facing, TerminalConfig::default())
}

pub fn create_block_terminal_with<W: SurfaceSpawner>(
    spawner: &mut W,
    anchor: &impl Anchor,
    facing: Facing,
    config: TerminalConfig,
) -> Result<Terminal<W::Surface>> {
    TerminalPlan::block(anchor, facing, config)?.materialize(spawner)
}

/// Free-floating terminal at `location` with default settings.
pub fn create_display_terminal<W: SurfaceSpawner>(
    spawner: &mut W,
    location: Pose,
) -> Result<Terminal<W::Surface>> {
    create_display_terminal_with(spawner, location, TerminalConfig::default())
}

pub fn create_display_terminal_with<W: SurfaceSpawner>(
    spawner: &mut W,
    location: Pose,
    config: TerminalConfig,
) -> Result<Terminal<W::Surface>> {
    TerminalPlan::floating(location, config)?.materialize(spawner)
}
