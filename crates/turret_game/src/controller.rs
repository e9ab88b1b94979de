//! Pointer-driven aim dragging.
//!
//! Pressing on the slider handle's ring starts a drag; while dragging, every
//! pointer move re-aims from the slider pivot. Releasing or leaving the
//! window ends the drag.

use glam::Vec2;

use crate::scene::SceneState;

/// Cursor shape the window should show for the current pointer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorFeedback {
    Default,
    Grab,
    Grabbing,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AimDrag {
    dragging: bool,
    hovering: bool,
}

impl AimDrag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a drag if `pointer` is on the handle. Returns whether it did.
    pub fn pointer_down(&mut self, scene: &SceneState, pointer: Vec2) -> bool {
        if scene.slider_hit(pointer) {
            self.dragging = true;
            log::debug!("Aim drag started at ({:.1}, {:.1})", pointer.x, pointer.y);
        }
        self.dragging
    }

    pub fn pointer_move(&mut self, scene: &mut SceneState, pointer: Vec2) {
        if self.dragging {
            scene.set_aim_from_pointer(pointer);
        }
        self.hovering = scene.slider_hit(pointer);
    }

    pub fn pointer_up(&mut self) {
        if self.dragging {
            log::debug!("Aim drag ended");
        }
        self.dragging = false;
    }

    pub fn pointer_leave(&mut self) {
        self.dragging = false;
        self.hovering = false;
    }

    pub fn cursor(&self) -> CursorFeedback {
        if self.dragging {
            CursorFeedback::Grabbing
        } else if self.hovering {
            CursorFeedback::Grab
        } else {
            CursorFeedback::Default
        }
    }
}
