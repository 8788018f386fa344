// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/range/state.rs
//
// Range track configuration, geometry and value state.

use serde::{Deserialize, Serialize};

use crate::constant::{DEFAULT_RANGE_MAX, DEFAULT_RANGE_MIN};
use crate::domain::error::{EngineError, Result};
use crate::domain::session::Knob;

/// How a raw track value is snapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Nearest integer, ties away from zero (`2.5 -> 3`, `-2.5 -> -3`).
    #[default]
    HalfAwayFromZero,
    /// Nearest integer, ties to the even neighbour (`2.5 -> 2`).
    HalfEven,
    /// Keep the continuous value.
    None,
}

impl RoundingMode {
    pub fn apply(self, raw: f64) -> f64 {
        match self {
            Self::HalfAwayFromZero => raw.round(),
            Self::HalfEven => raw.round_ties_even(),
            Self::None => raw,
        }
    }
}

/// Whether the two knobs of range mode may cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnobOrdering {
    /// Knobs move independently; `value` may exceed `value2` and the span
    /// turns negative.
    #[default]
    Free,
    /// The primary knob stops at `value2` and the secondary at `value`.
    Clamped,
}

/// Static configuration of a range track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    pub min: f64,
    pub max: f64,
    /// Two knobs (from/to) instead of one.
    pub range_mode: bool,
    pub rounding: RoundingMode,
    pub ordering: KnobOrdering,
    /// Suffix shown after values in labels (e.g. `"km"`).
    pub unit: String,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_RANGE_MIN,
            max: DEFAULT_RANGE_MAX,
            range_mode: false,
            rounding: RoundingMode::default(),
            ordering: KnobOrdering::default(),
            unit: String::new(),
        }
    }
}

impl RangeConfig {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            ..Self::default()
        }
    }

    pub fn with_range_mode(mut self, enabled: bool) -> Self {
        self.range_mode = enabled;
        self
    }

    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_ordering(mut self, ordering: KnobOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Reject inverted or non-finite bounds. `min == max` is allowed; it only
    /// makes percentages undefined.
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(EngineError::InvalidBounds {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Distance between the bounds.
    pub fn extent(&self) -> f64 {
        self.max - self.min
    }
}

/// Where the track sits on screen, re-read on every pointer move.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackGeometry {
    /// Pointer coordinate of the track's start.
    pub origin: f32,
    /// Span of the track in pointer units.
    pub length: f32,
}

impl TrackGeometry {
    pub fn new(origin: f32, length: f32) -> Self {
        Self { origin, length }
    }

    /// Fraction of the track covered at pointer coordinate `x`, in `[0, 1]`.
    pub fn fraction_at(&self, x: f32) -> f64 {
        if !(self.length > 0.0) {
            return 0.0;
        }
        let travelled = (x - self.origin).min(self.length).max(0.0);
        f64::from(travelled) / f64::from(self.length)
    }
}

/// Current knob values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeState {
    pub value: f64,
    /// Second knob; only meaningful when `range_mode` is set.
    pub value2: f64,
    pub range_mode: bool,
}

impl RangeState {
    pub fn get(&self, knob: Knob) -> f64 {
        match knob {
            Knob::Primary => self.value,
            Knob::Secondary => self.value2,
        }
    }

    /// Width of the selected range. Negative when the knobs have crossed.
    pub fn span(&self) -> f64 {
        self.value2 - self.value
    }
}

/// Placement of the progress bar, in percent of the track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub left: f64,
    pub width: f64,
}

/// Emitted after every pointer move that updated a knob.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueChanged {
    pub knob: Knob,
    pub state: RangeState,
}
