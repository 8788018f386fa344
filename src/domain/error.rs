// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/error.rs
//
// Error taxonomy of the interaction engines.

use thiserror::Error;

/// Errors raised by the engines.
///
/// Geometry never fails: out-of-range pointers saturate. Only state-machine
/// violations and degenerate configuration surface here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The secondary knob was used while range mode is off.
    #[error("secondary knob is only available in range mode")]
    InvalidKnob,

    /// A region operation was attempted before an image was loaded
    /// (or after the crop was committed).
    #[error("no active crop region")]
    NoActiveRegion,

    /// A drag was started while another one is still open.
    #[error("a drag session is already active")]
    SessionAlreadyActive,

    /// The computation would divide by a zero-length span.
    #[error("division by zero: degenerate span")]
    DivideByZero,

    /// Configured bounds are inverted or not finite.
    #[error("invalid bounds: min {min} is not below or equal to max {max}")]
    InvalidBounds { min: f64, max: f64 },
}

pub type Result<T> = std::result::Result<T, EngineError>;
