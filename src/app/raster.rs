// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/raster.rs
//
// Applies committed crops to raster images (PNG, JPEG, WebP, ...).

use std::path::Path;

use anyhow::{Context, anyhow};
use image::{DynamicImage, GenericImageView, ImageReader, RgbaImage, imageops::FilterType};

use crate::domain::crop::{CropDescriptor, ImageDescriptor, Shape};
use crate::domain::geometry::Size;

/// A decoded raster image a crop is cut from.
pub struct RasterImage {
    pixels: DynamicImage,
}

impl RasterImage {
    /// Load a raster image from disk.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let pixels = ImageReader::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?
            .with_guessed_format()
            .with_context(|| format!("failed to detect format of {}", path.display()))?
            .decode()
            .with_context(|| format!("failed to decode {}", path.display()))?;
        Ok(Self { pixels })
    }

    pub fn from_image(pixels: DynamicImage) -> Self {
        Self { pixels }
    }

    /// Returns the native pixel dimensions (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn natural_size(&self) -> Size {
        let (width, height) = self.dimensions();
        Size::new(width as f32, height as f32)
    }

    /// Descriptor the crop engine is loaded with.
    pub fn descriptor(&self, name: impl Into<String>) -> ImageDescriptor {
        ImageDescriptor::new(name, self.natural_size())
    }

    /// Cut `crop` out of the image and scale it to the output size.
    ///
    /// Circles keep their pixels inside the inscribed circle; everything
    /// outside becomes transparent.
    pub fn apply(&self, crop: &CropDescriptor) -> anyhow::Result<DynamicImage> {
        let rect = crop
            .pixel_rect(self.natural_size())
            .ok_or_else(|| anyhow!("crop area lies outside the image"))?;
        let (x, y, width, height) = rect.as_tuple();
        let (out_width, out_height) = crop.output_pixels();

        let mut output = self
            .pixels
            .crop_imm(x, y, width, height)
            .resize_exact(out_width, out_height, FilterType::Triangle)
            .to_rgba8();

        if crop.shape == Shape::Circle {
            mask_circle(&mut output);
        }
        Ok(DynamicImage::ImageRgba8(output))
    }
}

/// Clear alpha outside the circle inscribed in `image`.
fn mask_circle(image: &mut RgbaImage) {
    let (width, height) = image.dimensions();
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let radius = width.min(height) as f32 / 2.0;

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - cx;
        let dy = y as f32 + 0.5 - cy;
        if dx * dx + dy * dy > radius * radius {
            pixel[3] = 0;
        }
    }
}

/// Save an image to disk; the format follows the extension.
pub fn save(image: &DynamicImage, path: &Path) -> anyhow::Result<()> {
    image
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}
