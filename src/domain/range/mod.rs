// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/range/mod.rs
//
// Range swiper engine: configuration, state and drag handling.

mod engine;
mod state;

pub use engine::{RangeDrag, RangeInteractionEngine};
pub use state::{
    KnobOrdering, Progress, RangeConfig, RangeState, RoundingMode, TrackGeometry, ValueChanged,
};
