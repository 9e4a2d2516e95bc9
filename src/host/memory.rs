// In-memory host: a world that hands out recording surfaces, and blocks to
// anchor terminals on. Used by the tests and the demo.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::placement::{Anchor, Pose};
use crate::renderer::{Frame, Rgb};
use crate::surface::{Surface, SurfaceError, SurfaceSpawner, TextAlignment, Transform};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceCall {
    SetDisplayedText,
    SetBackgroundColor,
    SetTransform,
    SetAlignment,
    SetPersistent,
    Destroy,
}

#[derive(Debug, Clone)]
struct SurfaceState {
    pose: Pose,
    frame: Option<Frame>,
    frames_pushed: usize,
    background: Option<Rgb>,
    transform: Option<Transform>,
    alignment: TextAlignment,
    persistent: Option<bool>,
    destroyed: bool,
    calls: Vec<SurfaceCall>,
}

#[derive(Debug, Default)]
struct WorldState {
    surfaces: Vec<Rc<RefCell<SurfaceState>>>,
    fail_next: Option<SurfaceCall>,
    fail_spawns: bool,
}

/// Spawner whose surfaces live in memory. Clones share the same world.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorld {
    state: Rc<RefCell<WorldState>>,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next matching surface call (on any surface) fail.
    pub fn fail_next_surface_call(&mut self, call: SurfaceCall) {
        self.state.borrow_mut().fail_next = Some(call);
    }

    pub fn fail_spawns(&mut self, fail: bool) {
        self.state.borrow_mut().fail_spawns = fail;
    }

    /// Total surfaces ever spawned.
    pub fn spawned(&self) -> usize {
        self.state.borrow().surfaces.len()
    }

    pub fn live_surfaces(&self) -> usize {
        self.state
            .borrow()
            .surfaces
            .iter()
            .filter(|s| !s.borrow().destroyed)
            .count()
    }

    /// Inspection handle for the `index`th spawned surface.
    pub fn surface(&self, index: usize) -> Option<MemorySurface> {
        let state = self.state.borrow().surfaces.get(index).cloned()?;
        Some(MemorySurface {
            state,
            world: Rc::clone(&self.state),
        })
    }
}

impl SurfaceSpawner for MemoryWorld {
    type Surface = MemorySurface;

    fn spawn_surface(&mut self, pose: &Pose) -> Result<MemorySurface, SurfaceError> {
        let mut world = self.state.borrow_mut();
        if world.fail_spawns {
            return Err(SurfaceError::Spawn {
                pose: pose.to_string(),
                reason: "spawning disabled".to_string(),
            });
        }

        let state = Rc::new(RefCell::new(SurfaceState {
            pose: pose.clone(),
            frame: None,
            frames_pushed: 0,
            background: None,
            transform: None,
            alignment: TextAlignment::default(),
            persistent: None,
            destroyed: false,
            calls: Vec::new(),
        }));
        world.surfaces.push(Rc::clone(&state));
        debug!("Memory world spawned surface #{} at {}", world.surfaces.len(), pose);

        Ok(MemorySurface {
            state,
            world: Rc::clone(&self.state),
        })
    }
}

/// Surface that records what it was told to display.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    state: Rc<RefCell<SurfaceState>>,
    world: Rc<RefCell<WorldState>>,
}

impl MemorySurface {
    fn record(
        &mut self,
        call: SurfaceCall,
        apply: impl FnOnce(&mut SurfaceState),
    ) -> Result<(), SurfaceError> {
        {
            let mut world = self.world.borrow_mut();
            if world.fail_next == Some(call) {
                world.fail_next = None;
                return Err(SurfaceError::Operation(format!("{call:?} rejected by host")));
            }
        }

        let mut state = self.state.borrow_mut();
        if state.destroyed {
            return Err(SurfaceError::Invalid);
        }
        state.calls.push(call);
        apply(&mut *state);
        Ok(())
    }

    pub fn pose(&self) -> Pose {
        self.state.borrow().pose.clone()
    }

    pub fn frame(&self) -> Option<Frame> {
        self.state.borrow().frame.clone()
    }

    pub fn text(&self) -> Option<String> {
        self.state.borrow().frame.as_ref().map(|f| f.text.clone())
    }

    pub fn frames_pushed(&self) -> usize {
        self.state.borrow().frames_pushed
    }

    pub fn background(&self) -> Option<Rgb> {
        self.state.borrow().background
    }

    pub fn transform(&self) -> Option<Transform> {
        self.state.borrow().transform
    }

    pub fn alignment(&self) -> TextAlignment {
        self.state.borrow().alignment
    }

    pub fn persistent(&self) -> Option<bool> {
        self.state.borrow().persistent
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.borrow().destroyed
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.state.borrow().calls.clone()
    }
}

impl Surface for MemorySurface {
    fn set_displayed_text(&mut self, frame: &Frame) -> Result<(), SurfaceError> {
        self.record(SurfaceCall::SetDisplayedText, |s| {
            s.frame = Some(frame.clone());
            s.frames_pushed += 1;
        })
    }

    fn set_background_color(&mut self, color: Rgb) -> Result<(), SurfaceError> {
        self.record(SurfaceCall::SetBackgroundColor, |s| s.background = Some(color))
    }

    fn set_transform(&mut self, transform: Transform) -> Result<(), SurfaceError> {
        self.record(SurfaceCall::SetTransform, |s| s.transform = Some(transform))
    }

    fn set_alignment(&mut self, alignment: TextAlignment) -> Result<(), SurfaceError> {
        self.record(SurfaceCall::SetAlignment, |s| s.alignment = alignment)
    }

    fn set_persistent(&mut self, persistent: bool) -> Result<(), SurfaceError> {
        self.record(SurfaceCall::SetPersistent, |s| s.persistent = Some(persistent))
    }

    fn destroy(&mut self) -> Result<(), SurfaceError> {
        self.record(SurfaceCall::Destroy, |s| s.destroyed = true)
    }
}

/// A block at a fixed pose.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryBlock {
    pose: Pose,
    solid: bool,
}

impl MemoryBlock {
    pub fn solid(pose: Pose) -> Self {
        Self { pose, solid: true }
    }

    pub fn air(pose: Pose) -> Self {
        Self { pose, solid: false }
    }
}

impl Anchor for MemoryBlock {
    fn is_solid(&self) -> bool {
        self.solid
    }

    fn pose(&self) -> Pose {
        self.pose.clone()
    }
}
