//! Per-frame task driving the viewer, cancellable from event handlers

use std::cell::Cell;
use std::rc::Rc;

use super::controller::ViewerController;
use crate::render::SceneRenderer;

/// Shared cancellation flag for a [`FrameLoop`]
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Invoked once per display refresh; each tick runs one viewer frame.
#[derive(Debug, Default)]
pub struct FrameLoop {
    token: CancellationToken,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that stops this loop when cancelled
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Runs one frame unless cancelled.
    ///
    /// Returns `true` if the caller should schedule another tick.
    pub fn tick<R: SceneRenderer>(&mut self, viewer: &mut ViewerController<R>) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        viewer.frame();
        self.frames += 1;
        true
    }

    /// Number of frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
