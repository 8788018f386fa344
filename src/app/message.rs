// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/message.rs
//
// Widget messages: pointer events and user actions, plus the notifications
// the model answers with.

use serde::{Deserialize, Serialize};

use crate::domain::crop::{CropDescriptor, ImageMetrics, RegionChanged};
use crate::domain::files::FileEntry;
use crate::domain::range::ValueChanged;
use crate::domain::session::Knob;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum InteractionMessage {
    // Range swiper.
    RangeGeometry {
        origin: f32,
        length: f32,
    },
    RangeDragStart {
        #[serde(default)]
        knob: Knob,
        x: f32,
    },
    RangeDragMove {
        x: f32,
    },
    RangeDragEnd,

    // Crop operations.
    CropLoadImage {
        name: String,
        width: f32,
        height: f32,
    },
    /// Pointer pressed somewhere over the cropper; the region decides
    /// whether this moves or resizes it.
    CropPointerDown {
        x: f32,
        y: f32,
    },
    CropMoveStart {
        x: f32,
        y: f32,
    },
    CropResizeStart {
        x: f32,
        y: f32,
    },
    CropContainerResizeStart {
        x: f32,
        y: f32,
    },
    CropDragMove {
        x: f32,
        y: f32,
    },
    CropDragEnd,
    CropContainer {
        width: f32,
        height: f32,
    },
    CropCommit(ImageMetrics),
    CropReset,

    // File picker.
    FilesAdd {
        files: Vec<FileEntry>,
    },
    FileRemove {
        index: usize,
    },
    FilesClear,
}

/// What changed as the result of a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    ValueChanged(ValueChanged),
    RegionChanged(RegionChanged),
    CropCommitted(CropDescriptor),
    CropReset,
    FilesChanged { files: Vec<FileEntry> },
}
