// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/mod.rs
//
// Application layer: messages, widget model, script replay and raster output.

pub mod message;
pub mod model;
#[cfg(feature = "image")]
pub mod raster;
pub mod script;

pub use message::{InteractionMessage, Notification};
pub use model::WidgetModel;
pub use script::{Script, StepOutcome};
