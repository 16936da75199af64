//! Platform abstraction layer
//!
//! Pointer events arrive whenever the browser fires them; the game reads
//! them once per frame. Last write wins, nothing is queued.

use glam::Vec2;

/// Kind of device behind a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

impl PointerKind {
    /// Parse a DOM `pointerType` string
    pub fn from_dom(s: &str) -> Option<Self> {
        match s {
            "mouse" => Some(PointerKind::Mouse),
            "touch" => Some(PointerKind::Touch),
            "pen" => Some(PointerKind::Pen),
            _ => None,
        }
    }
}

/// Latest pointer position, written by events and taken by the frame loop
#[derive(Debug, Clone, Default)]
pub struct PointerLatch {
    latest: Option<Vec2>,
    mouse_only: bool,
}

impl PointerLatch {
    pub fn new(mouse_only: bool) -> Self {
        Self {
            latest: None,
            mouse_only,
        }
    }

    /// Record a pointer move in field coordinates
    pub fn write(&mut self, pos: Vec2, kind: Option<PointerKind>) {
        if self.mouse_only && kind != Some(PointerKind::Mouse) {
            return;
        }
        self.latest = Some(pos);
    }

    /// Take the latest position since the last frame
    pub fn take(&mut self) -> Option<Vec2> {
        self.latest.take()
    }
}
