// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/mod.rs
//
// Crop engine: region model, drag handling and the pixel-space commit.

mod commit;
mod engine;
mod region;

pub use commit::{CropDescriptor, CropRect, ImageMetrics, ImageScale};
pub use engine::{CropDrag, CropInteractionEngine, CropState, RegionChanged};
pub use region::{CropConfig, CropRegion, ImageDescriptor, Shape};
