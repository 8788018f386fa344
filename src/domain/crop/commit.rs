// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/commit.rs
//
// Crop commit: screen-space region -> source-pixel crop command.

use serde::{Deserialize, Serialize};

use super::region::{CropRegion, Shape};
use crate::domain::error::{EngineError, Result};
use crate::domain::geometry::{Point, Rect, Size};

/// Layout of the displayed image at commit time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageMetrics {
    /// Screen position of the container's top-left corner; region
    /// coordinates are relative to it.
    #[serde(default)]
    pub container_origin: Point,
    /// On-screen rectangle of the displayed image.
    pub displayed: Rect,
    /// Source pixel dimensions of the image.
    pub natural: Size,
}

impl ImageMetrics {
    /// Image displayed at its natural size in the container's top-left corner.
    pub fn unscaled(natural: Size) -> Self {
        Self {
            container_origin: Point::ORIGIN,
            displayed: Rect::from_parts(Point::ORIGIN, natural),
            natural,
        }
    }
}

/// Natural-over-displayed ratio per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageScale {
    pub scale_x: f32,
    pub scale_y: f32,
}

impl ImageScale {
    pub fn from_metrics(metrics: &ImageMetrics) -> Result<Self> {
        let displayed = metrics.displayed.size();
        if displayed.width == 0.0 || displayed.height == 0.0 {
            return Err(EngineError::DivideByZero);
        }
        Ok(Self {
            scale_x: metrics.natural.width / displayed.width,
            scale_y: metrics.natural.height / displayed.height,
        })
    }
}

/// Crop command in source-pixel space, plus the size to render it at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropDescriptor {
    pub source_x: f32,
    pub source_y: f32,
    pub source_width: f32,
    pub source_height: f32,
    /// Always the region size: the source area is scaled into it.
    pub output_width: f32,
    pub output_height: f32,
    pub shape: Shape,
}

impl CropDescriptor {
    /// Map `region` through `metrics` into source pixels.
    pub fn compute(region: &CropRegion, metrics: &ImageMetrics) -> Result<Self> {
        let scale = ImageScale::from_metrics(metrics)?;
        let screen = region.position + metrics.container_origin;

        Ok(Self {
            source_x: (screen.x - metrics.displayed.x) * scale.scale_x,
            source_y: (screen.y - metrics.displayed.y) * scale.scale_y,
            source_width: region.size.width * scale.scale_x,
            source_height: region.size.height * scale.scale_y,
            output_width: region.size.width,
            output_height: region.size.height,
            shape: region.shape,
        })
    }

    /// Whole-pixel source rectangle clipped to an image of `natural` size.
    ///
    /// Returns `None` when nothing of the image is covered.
    pub fn pixel_rect(&self, natural: Size) -> Option<CropRect> {
        // Snap edges, not extents, so `x + width` never passes the image.
        let left = self.source_x.max(0.0).round();
        let top = self.source_y.max(0.0).round();
        let right = (self.source_x + self.source_width)
            .min(natural.width)
            .round()
            .min(natural.width.floor());
        let bottom = (self.source_y + self.source_height)
            .min(natural.height)
            .round()
            .min(natural.height.floor());
        if right - left < 1.0 || bottom - top < 1.0 {
            return None;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rect = CropRect::new(
            left as u32,
            top as u32,
            (right - left) as u32,
            (bottom - top) as u32,
        );
        rect.is_valid().then_some(rect)
    }

    /// Output size in whole pixels, at least 1x1.
    pub fn output_pixels(&self) -> (u32, u32) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        (
            self.output_width.round().max(1.0) as u32,
            self.output_height.round().max(1.0) as u32,
        )
    }
}

/// Crop region in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn as_tuple(&self) -> (u32, u32, u32, u32) {
        (self.x, self.y, self.width, self.height)
    }

    /// Check if region has valid dimensions.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}
