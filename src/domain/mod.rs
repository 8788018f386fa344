// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/mod.rs
//
// Rendering-agnostic interaction engines and their building blocks.

pub mod crop;
pub mod error;
pub mod files;
pub mod geometry;
pub mod notify;
pub mod range;
pub mod session;

pub use error::{EngineError, Result};
