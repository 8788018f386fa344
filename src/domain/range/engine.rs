// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/range/engine.rs
//
// Range swiper interaction: pointer position along a track -> knob values.

use log::{debug, trace};

use super::state::{KnobOrdering, Progress, RangeConfig, RangeState, TrackGeometry, ValueChanged};
use crate::constant::PERCENT;
use crate::domain::error::{EngineError, Result};
use crate::domain::geometry::Point;
use crate::domain::notify::{ListenerId, Listeners};
use crate::domain::session::{DragMode, DragSession, Knob, SessionSlot};

/// Converts pointer motion along a linear track into one or two clamped
/// values.
///
/// Drive it with [`begin_drag`](Self::begin_drag), a stream of
/// [`on_pointer_move`](Self::on_pointer_move) calls and a final
/// [`end_drag`](Self::end_drag), or use [`drag`](Self::drag) to get a guard
/// that closes the session on drop.
#[derive(Debug)]
pub struct RangeInteractionEngine {
    config: RangeConfig,
    geometry: TrackGeometry,
    state: RangeState,
    session: SessionSlot,
    listeners: Listeners<ValueChanged>,
}

impl RangeInteractionEngine {
    /// Create an engine with `value = min` and `value2 = max`.
    pub fn new(config: RangeConfig) -> Result<Self> {
        config.validate()?;
        let state = RangeState {
            value: config.min,
            value2: config.max,
            range_mode: config.range_mode,
        };
        Ok(Self {
            config,
            geometry: TrackGeometry::default(),
            state,
            session: SessionSlot::default(),
            listeners: Listeners::default(),
        })
    }

    pub fn config(&self) -> &RangeConfig {
        &self.config
    }

    pub fn state(&self) -> RangeState {
        self.state
    }

    pub fn geometry(&self) -> TrackGeometry {
        self.geometry
    }

    /// Update where the track is laid out. Takes effect on the next move.
    pub fn set_geometry(&mut self, geometry: TrackGeometry) {
        self.geometry = geometry;
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_open()
    }

    /// Knob held by the open session, if any.
    pub fn active_knob(&self) -> Option<Knob> {
        match self.session.current()?.mode {
            DragMode::Knob(knob) => Some(knob),
            _ => None,
        }
    }

    pub fn begin_drag(&mut self, knob: Knob, pointer: Point) -> Result<()> {
        if knob == Knob::Secondary && !self.config.range_mode {
            return Err(EngineError::InvalidKnob);
        }
        let subject = Point::new(self.state.get(knob) as f32, 0.0);
        self.session
            .open(DragSession::new(DragMode::Knob(knob), pointer, subject))?;
        debug!("range drag started: {knob:?} at x={}", pointer.x);
        Ok(())
    }

    /// Scoped drag: the session ends when the returned guard is dropped.
    pub fn drag(&mut self, knob: Knob, pointer: Point) -> Result<RangeDrag<'_>> {
        self.begin_drag(knob, pointer)?;
        Ok(RangeDrag { engine: self })
    }

    /// Move the active knob to follow `pointer`.
    ///
    /// Returns `None` (and changes nothing) when no drag is open.
    pub fn on_pointer_move(&mut self, pointer: Point) -> Option<ValueChanged> {
        let knob = self.active_knob()?;
        let mut value = self.value_at(pointer.x);

        if self.config.range_mode && self.config.ordering == KnobOrdering::Clamped {
            value = match knob {
                Knob::Primary => value.min(self.state.value2),
                Knob::Secondary => value.max(self.state.value),
            };
        }

        match knob {
            Knob::Primary => self.state.value = value,
            Knob::Secondary => self.state.value2 = value,
        }
        trace!("range {knob:?} -> {value}");

        let event = ValueChanged {
            knob,
            state: self.state,
        };
        self.listeners.emit(&event);
        Some(event)
    }

    /// Close the open drag session. Safe to call when none is open.
    pub fn end_drag(&mut self) {
        if let Some(session) = self.session.close() {
            debug!("range drag ended: {:?}", session.mode);
        }
    }

    /// Value the track maps pointer coordinate `x` to, after rounding and
    /// clamping.
    pub fn value_at(&self, x: f32) -> f64 {
        let raw = self.geometry.fraction_at(x) * self.config.extent() + self.config.min;
        // Rounding can step past a fractional bound.
        self.config
            .rounding
            .apply(raw)
            .min(self.config.max)
            .max(self.config.min)
    }

    /// Position of `value` along the track, in percent.
    pub fn percentage_for(&self, value: f64) -> Result<f64> {
        let extent = self.config.extent();
        if extent == 0.0 {
            return Err(EngineError::DivideByZero);
        }
        Ok((value - self.config.min) / extent * PERCENT)
    }

    /// Where the filled part of the track starts and how wide it is.
    pub fn progress(&self) -> Result<Progress> {
        if self.config.range_mode {
            let left = self.percentage_for(self.state.value)?;
            let right = self.percentage_for(self.state.value2)?;
            Ok(Progress {
                left,
                width: right - left,
            })
        } else {
            Ok(Progress {
                left: 0.0,
                width: self.percentage_for(self.state.value)?,
            })
        }
    }

    /// Human readable value, e.g. `"20 - 80 km"`.
    pub fn label(&self) -> String {
        let text = if self.config.range_mode {
            format!(
                "{} - {} {}",
                self.state.value, self.state.value2, self.config.unit
            )
        } else {
            format!("{} {}", self.state.value, self.config.unit)
        };
        text.trim_end().to_string()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ValueChanged) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

/// Open range drag. Ends the session when dropped.
#[derive(Debug)]
pub struct RangeDrag<'a> {
    engine: &'a mut RangeInteractionEngine,
}

impl RangeDrag<'_> {
    pub fn move_to(&mut self, pointer: Point) -> Option<ValueChanged> {
        self.engine.on_pointer_move(pointer)
    }

    pub fn state(&self) -> RangeState {
        self.engine.state()
    }

    /// End the drag explicitly.
    pub fn finish(self) {}
}

impl Drop for RangeDrag<'_> {
    fn drop(&mut self) {
        self.engine.end_drag();
    }
}
