use thiserror::Error;

use crate::placement::{Facing, Vec3};
use crate::surface::SurfaceError;
use crate::terminal::TerminalId;

#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Unsupported facing: {0} (must be north, east, south or west)")]
    UnsupportedFacing(Facing),

    #[error("Anchor at {position} is not solid")]
    NonSolidAnchor { position: Vec3 },

    #[error("Terminal {0} has been destroyed")]
    OperationOnDestroyedTerminal(TerminalId),

    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TerminalError>;
