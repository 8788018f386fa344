// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/session.rs
//
// Drag session state shared by the range and crop engines.

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};
use super::geometry::Point;

/// Which knob of a range track is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Knob {
    #[default]
    Primary,
    /// Only present in range mode.
    Secondary,
}

/// What a drag session manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// A range knob follows the pointer along the track.
    Knob(Knob),
    /// The crop region is translated.
    Move,
    /// The square handle on the crop region changes its size.
    ResizeRegion,
    /// The container holding image and region is resized.
    ResizeContainer,
}

/// An open drag: where the pointer went down and where the dragged subject
/// was at that moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub origin: Point,
    /// Position (move) or size (resize) of the subject at drag start.
    pub subject_origin: Point,
    pub mode: DragMode,
}

impl DragSession {
    pub fn new(mode: DragMode, origin: Point, subject_origin: Point) -> Self {
        Self {
            origin,
            subject_origin,
            mode,
        }
    }

    /// Pointer travel since the drag started.
    pub fn delta(&self, pointer: Point) -> Point {
        pointer - self.origin
    }
}

/// Holds at most one [`DragSession`].
#[derive(Debug, Clone, Default)]
pub struct SessionSlot {
    active: Option<DragSession>,
}

impl SessionSlot {
    /// Open `session`, refusing if one is already open.
    pub fn open(&mut self, session: DragSession) -> Result<()> {
        if self.active.is_some() {
            return Err(EngineError::SessionAlreadyActive);
        }
        self.active = Some(session);
        Ok(())
    }

    /// Close the open session, if any, and hand it back.
    pub fn close(&mut self) -> Option<DragSession> {
        self.active.take()
    }

    pub fn current(&self) -> Option<&DragSession> {
        self.active.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knob_session() -> DragSession {
        DragSession::new(DragMode::Knob(Knob::Primary), Point::ORIGIN, Point::ORIGIN)
    }

    #[test]
    fn second_open_is_rejected() {
        let mut slot = SessionSlot::default();
        slot.open(knob_session()).unwrap();

        let err = slot.open(knob_session()).unwrap_err();
        assert_eq!(err, EngineError::SessionAlreadyActive);
    }

    #[test]
    fn close_is_idempotent() {
        let mut slot = SessionSlot::default();
        slot.open(knob_session()).unwrap();

        assert!(slot.close().is_some());
        assert!(slot.close().is_none());
        assert!(!slot.is_open());
    }

    #[test]
    fn delta_is_measured_from_origin() {
        let session = DragSession::new(DragMode::Move, Point::new(10.0, 20.0), Point::ORIGIN);
        assert_eq!(session.delta(Point::new(15.0, 5.0)), Point::new(5.0, -15.0));
    }
}
