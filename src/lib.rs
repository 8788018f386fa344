// SPDX-License-Identifier: GPL-3.0-or-later
// src/lib.rs
//
// Interaction engines for custom form widgets.

//! Pointer-driven interaction engines for custom form widgets.
//!
//! - [`RangeInteractionEngine`] turns a drag along a track into one or two
//!   clamped, rounded values.
//! - [`CropInteractionEngine`] keeps a movable, resizable crop region inside
//!   its container and turns it into a source-pixel [`CropDescriptor`].
//! - [`FileCollector`] holds the files a picker has accepted.
//!
//! The engines know nothing about rendering. A surface feeds them pointer
//! positions in container-local coordinates and redraws from the
//! notifications they emit.

pub mod app;
pub mod config;
pub mod constant;
pub mod domain;

pub use domain::crop::{
    CropConfig, CropDescriptor, CropInteractionEngine, CropRegion, CropState, ImageDescriptor,
    ImageMetrics, Shape,
};
pub use domain::error::{EngineError, Result};
pub use domain::files::{AcceptFilter, FileCollector, FileEntry};
pub use domain::geometry::{Point, Rect, Size};
pub use domain::range::{RangeConfig, RangeInteractionEngine, RangeState, TrackGeometry};
pub use domain::session::Knob;
