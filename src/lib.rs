//! Visual Terminal - scrolling, colorized text logs on in-world surfaces
//!
//! A terminal is a bounded line buffer bound to a host-provided text
//! surface. Surfaces are either mounted flush on one face of a solid block
//! or float freely at a location.
//!
//! ## Components
//!
//! - **Terminal Buffer**: wrapped, colored lines with oldest-first eviction
//! - **Placement**: block-face offset and yaw lookup for the four cardinal facings
//! - **Surface**: traits the host implements to spawn and drive text surfaces
//! - **Terminal**: plan/materialize construction and the write/clear/destroy API
//! - **Memory host**: an in-memory surface world for tests and demos

pub mod error;
pub mod host;
pub mod placement;
pub mod renderer;
pub mod surface;
pub mod terminal;

// Re-export commonly used types
pub use error::{Result, TerminalError};
pub use placement::{place, Anchor, Facing, Placement, Pose, Vec3};
pub use renderer::{colors, Frame, Line, LineFormat, NamedColor, Rgb, TerminalBuffer, TerminalColor};
pub use surface::{Surface, SurfaceError, SurfaceSpawner, TextAlignment, Transform};
pub use terminal::{
    create_block_terminal, create_block_terminal_with, create_display_terminal,
    create_display_terminal_with, Terminal, TerminalConfig, TerminalId, TerminalKind, TerminalPlan,
};
