// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/region.rs
//
// Crop selection region, its configuration and hit testing.

use serde::{Deserialize, Serialize};

use crate::constant::{
    DEFAULT_CONTAINER_HEIGHT, DEFAULT_CONTAINER_WIDTH, DEFAULT_CROP_SIZE, MAX_CONTAINER_EDGE,
    MAX_CROP_SIZE, MIN_CONTAINER_HEIGHT, MIN_CONTAINER_WIDTH, MIN_CROP_SIZE, RESIZE_HANDLE_HIT_SIZE,
};
use crate::domain::error::{EngineError, Result};
use crate::domain::geometry::{Point, Rect, Size, center_axis, clamp_axis};
use crate::domain::session::DragMode;

/// Outline of the crop selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    #[default]
    Rectangle,
    /// Inscribed in the square region; the consumer masks the output.
    Circle,
}

/// Policy values of the cropper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Edge length of a freshly placed region.
    pub region_size: f32,
    /// Resize floor.
    pub min_size: f32,
    /// Resize ceiling.
    pub max_size: f32,
    pub shape: Shape,
    /// Floor for the container height while it is dragged.
    pub min_container_height: f32,
    /// Initial container the image is displayed in.
    pub container: Size,
    /// The container never grows beyond this.
    pub max_container: Size,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            region_size: DEFAULT_CROP_SIZE,
            min_size: MIN_CROP_SIZE,
            max_size: MAX_CROP_SIZE,
            shape: Shape::default(),
            min_container_height: MIN_CONTAINER_HEIGHT,
            container: Size::new(DEFAULT_CONTAINER_WIDTH, DEFAULT_CONTAINER_HEIGHT),
            max_container: Size::square(MAX_CONTAINER_EDGE),
        }
    }
}

impl CropConfig {
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_region_size(mut self, size: f32) -> Self {
        self.region_size = size;
        self
    }

    pub fn with_resize_limits(mut self, min_size: f32, max_size: f32) -> Self {
        self.min_size = min_size;
        self.max_size = max_size;
        self
    }

    pub fn with_container(mut self, container: Size) -> Self {
        self.container = container;
        self
    }

    pub fn with_max_container(mut self, max_container: Size) -> Self {
        self.max_container = max_container;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.min_size > 0.0) || !(self.max_size >= self.min_size) {
            return Err(EngineError::InvalidBounds {
                min: f64::from(self.min_size),
                max: f64::from(self.max_size),
            });
        }
        if !(self.region_size > 0.0) || self.container.is_empty() || self.max_container.is_empty() {
            return Err(EngineError::InvalidBounds {
                min: 0.0,
                max: f64::from(self.region_size),
            });
        }
        if !(self.max_container.height >= self.min_container_height) {
            return Err(EngineError::InvalidBounds {
                min: f64::from(self.min_container_height),
                max: f64::from(self.max_container.height),
            });
        }
        Ok(())
    }

    /// Cap `size` at [`max_container`](Self::max_container). The height
    /// never drops below `min_height`.
    pub fn fit_container(&self, size: Size, min_height: f32) -> Size {
        Size::new(
            clamp_axis(size.width, MIN_CONTAINER_WIDTH, self.max_container.width),
            clamp_axis(
                size.height,
                min_height.max(MIN_CONTAINER_WIDTH),
                self.max_container.height,
            ),
        )
    }
}

/// The selection rectangle, in container-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    pub position: Point,
    pub size: Size,
    pub shape: Shape,
    /// Container the region must stay inside.
    pub bounds: Size,
}

impl CropRegion {
    /// A square region of edge `edge` centered in `bounds`.
    pub fn centered(edge: f32, shape: Shape, bounds: Size) -> Self {
        Self {
            position: Point::new(
                center_axis(bounds.width, edge),
                center_axis(bounds.height, edge),
            ),
            size: Size::square(edge),
            shape,
            bounds,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }

    /// Largest top-left position that keeps the region inside its bounds.
    pub fn max_position(&self) -> Point {
        Point::new(
            self.bounds.width - self.size.width,
            self.bounds.height - self.size.height,
        )
    }

    /// Place the top-left corner at `target`, saturating at the bounds.
    pub fn move_to(&mut self, target: Point) {
        let max = self.max_position();
        self.position = Point::new(
            clamp_axis(target.x, 0.0, max.x),
            clamp_axis(target.y, 0.0, max.y),
        );
    }

    /// Set a square edge and pull the region back inside its bounds.
    pub fn resize(&mut self, edge: f32) {
        self.size = Size::square(edge);
        self.move_to(self.position);
    }

    /// Change the container and re-clamp.
    pub fn set_bounds(&mut self, bounds: Size) {
        self.bounds = bounds;
        self.move_to(self.position);
    }

    /// Which drag a pointer-down at `point` should start, if any.
    ///
    /// The bottom-right corner carries the resize handle; anywhere else
    /// inside the region moves it. For circles the move area is the
    /// inscribed circle.
    pub fn hit_test(&self, point: Point) -> Option<DragMode> {
        let rect = self.rect();
        let half = RESIZE_HANDLE_HIT_SIZE / 2.0;
        let corner = Point::new(rect.right(), rect.bottom());
        if (point.x - corner.x).abs() <= half && (point.y - corner.y).abs() <= half {
            return Some(DragMode::ResizeRegion);
        }

        let inside = match self.shape {
            Shape::Rectangle => rect.contains(point),
            Shape::Circle => {
                let radius = self.size.width.min(self.size.height) / 2.0;
                let dx = point.x - (rect.x + self.size.width / 2.0);
                let dy = point.y - (rect.y + self.size.height / 2.0);
                dx * dx + dy * dy <= radius * radius
            }
        };
        inside.then_some(DragMode::Move)
    }
}

/// Decoded image the region is placed over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub name: String,
    /// Source pixel dimensions.
    pub natural: Size,
}

impl ImageDescriptor {
    pub fn new(name: impl Into<String>, natural: Size) -> Self {
        Self {
            name: name.into(),
            natural,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region_in(bounds: Size) -> CropRegion {
        CropRegion::centered(100.0, Shape::Rectangle, bounds)
    }

    #[test]
    fn centered_in_larger_container() {
        let region = region_in(Size::new(300.0, 300.0));
        assert_eq!(region.position, Point::new(100.0, 100.0));
        assert_eq!(region.size, Size::square(100.0));
    }

    #[test]
    fn centered_in_smaller_container_sticks_to_origin() {
        let region = region_in(Size::new(80.0, 240.0));
        assert_eq!(region.position, Point::new(0.0, 70.0));
    }

    #[test]
    fn move_saturates_each_axis_independently() {
        let mut region = region_in(Size::new(150.0, 150.0));
        region.move_to(Point::new(-20.0, 500.0));
        assert_eq!(region.position, Point::new(0.0, 50.0));
    }

    #[test]
    fn resize_pulls_region_back_inside() {
        let mut region = region_in(Size::new(150.0, 150.0));
        region.move_to(Point::new(50.0, 50.0));
        region.resize(120.0);
        assert_eq!(region.position, Point::new(30.0, 30.0));
        assert!(region.rect().right() <= 150.0);
    }

    #[test]
    fn shrinking_bounds_reclamps() {
        let mut region = region_in(Size::new(300.0, 300.0));
        region.set_bounds(Size::new(150.0, 120.0));
        assert_eq!(region.position, Point::new(50.0, 20.0));
    }

    #[test]
    fn hit_test_finds_handle_then_body() {
        let region = region_in(Size::new(300.0, 300.0));
        assert_eq!(region.hit_test(Point::new(198.0, 203.0)), Some(DragMode::ResizeRegion));
        assert_eq!(region.hit_test(Point::new(150.0, 150.0)), Some(DragMode::Move));
        assert_eq!(region.hit_test(Point::new(20.0, 20.0)), None);
    }

    #[test]
    fn circle_corners_are_outside() {
        let region = CropRegion::centered(100.0, Shape::Circle, Size::new(300.0, 300.0));
        assert_eq!(region.hit_test(Point::new(105.0, 105.0)), None);
        assert_eq!(region.hit_test(Point::new(150.0, 105.0)), Some(DragMode::Move));
    }

    #[test]
    fn config_validation() {
        assert!(CropConfig::default().validate().is_ok());
        assert!(CropConfig::default().with_resize_limits(120.0, 90.0).validate().is_err());
        assert!(CropConfig::default().with_region_size(0.0).validate().is_err());
    }

    #[test]
    fn container_cap_below_minimum_height_is_rejected() {
        let config = CropConfig::default().with_max_container(Size::new(200.0, 120.0));
        assert_eq!(
            config.validate(),
            Err(EngineError::InvalidBounds {
                min: 150.0,
                max: 120.0
            })
        );
        assert!(
            CropConfig::default()
                .with_max_container(Size::new(200.0, 150.0))
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn fit_container_caps_and_floors() {
        let config = CropConfig::default();
        let fitted = config.fit_container(Size::new(500.0, 20.0), 150.0);
        assert_eq!(fitted, Size::new(200.0, 150.0));
    }
}
