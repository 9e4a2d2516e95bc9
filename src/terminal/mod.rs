pub mod config;
pub mod factory;
pub mod plan;

use std::fmt;

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, TerminalError};
use crate::renderer::{LineFormat, TerminalBuffer, TerminalColor};
use crate::surface::{Surface, SurfaceError};

pub use config::TerminalConfig;
pub use factory::{
    create_block_terminal, create_block_terminal_with, create_display_terminal,
    create_display_terminal_with,
};
pub use plan::{TerminalKind, TerminalPlan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerminalId(Uuid);

impl TerminalId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TerminalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

enum State<S> {
    Active(S),
    Destroyed,
}

/// A scrolling text log bound to a host surface.
///
/// Every mutation of the buffer is pushed to the surface before the call
/// returns. After `destroy` all mutating calls fail with
/// [`TerminalError::OperationOnDestroyedTerminal`].
pub struct Terminal<S: Surface> {
    id: TerminalId,
    kind: TerminalKind,
    config: TerminalConfig,
    buffer: TerminalBuffer,
    state: State<S>,
}

impl<S: Surface> Terminal<S> {
    pub(crate) fn new(
        id: TerminalId,
        kind: TerminalKind,
        config: TerminalConfig,
        buffer: TerminalBuffer,
        surface: S,
    ) -> Self {
        Self {
            id,
            kind,
            config,
            buffer,
            state: State::Active(surface),
        }
    }

    /// Write `text` in the default color. Returns the number of lines produced.
    pub fn write_line(&mut self, text: &str) -> Result<usize> {
        self.update(false, |buffer| buffer.append(text))
    }

    pub fn write_colored(&mut self, text: &str, color: TerminalColor) -> Result<usize> {
        self.update(false, |buffer| buffer.append_colored(text, color))
    }

    pub fn write_styled(
        &mut self,
        text: &str,
        color: Option<TerminalColor>,
        format: LineFormat,
    ) -> Result<usize> {
        self.update(false, |buffer| buffer.append_styled(text, color, format))
    }

    pub fn write_blank(&mut self) -> Result<usize> {
        self.update(false, |buffer| {
            buffer.append_blank();
            1
        })
    }

    /// Replace the newest line, e.g. for progress output.
    pub fn overwrite_last(&mut self, text: &str, color: Option<TerminalColor>) -> Result<usize> {
        self.update(false, |buffer| buffer.overwrite_last(text, color))
    }

    pub fn clear(&mut self) -> Result<()> {
        self.update(true, |buffer| {
            buffer.clear();
            0
        })?;
        Ok(())
    }

    /// Remove the surface. Irreversible; the terminal counts as destroyed
    /// even if the host reports an error while removing it.
    pub fn destroy(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, State::Destroyed) {
            State::Active(mut surface) => {
                info!("Destroying terminal {}", self.id);
                surface.destroy()?;
                Ok(())
            }
            State::Destroyed => Err(TerminalError::OperationOnDestroyedTerminal(self.id)),
        }
    }

    fn update(&mut self, force: bool, apply: impl FnOnce(&mut TerminalBuffer) -> usize) -> Result<usize> {
        let surface = match &mut self.state {
            State::Active(surface) => surface,
            State::Destroyed => return Err(TerminalError::OperationOnDestroyedTerminal(self.id)),
        };

        let produced = apply(&mut self.buffer);
        // Stays dirty until a push lands, so a failed push is retried.
        if self.buffer.is_dirty() || force {
            push_frame(surface, &self.buffer)?;
            self.buffer.take_dirty();
            debug!(
                "Terminal {}: {} line(s) written, {}/{} visible",
                self.id,
                produced,
                self.buffer.len(),
                self.buffer.max_lines()
            );
        }
        Ok(produced)
    }

    pub fn id(&self) -> TerminalId {
        self.id
    }

    pub fn kind(&self) -> &TerminalKind {
        &self.kind
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    pub fn buffer(&self) -> &TerminalBuffer {
        &self.buffer
    }

    pub fn rendered_text(&self) -> String {
        self.buffer.render()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active(_))
    }

    pub fn surface(&self) -> Option<&S> {
        match &self.state {
            State::Active(surface) => Some(surface),
            State::Destroyed => None,
        }
    }
}

impl<S: Surface> fmt::Debug for Terminal<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Terminal")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("lines", &self.buffer.len())
            .field("active", &self.is_active())
            .finish()
    }
}

pub(crate) fn push_frame<S: Surface + ?Sized>(
    surface: &mut S,
    buffer: &TerminalBuffer,
) -> std::result::Result<(), SurfaceError> {
    let frame = buffer.frame();
    surface.set_displayed_text(&frame)?;
    surface.set_background_color(frame.background)
}
