// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/geometry.rs
//
// Plain geometry primitives and saturating clamps used by both engines.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A position in container-local (or screen) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn square(edge: f32) -> Self {
        Self {
            width: edge,
            height: edge,
        }
    }

    /// True when either edge is zero, negative or NaN.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Axis-aligned rectangle: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Where an image of `natural` size is displayed inside `container` when
    /// scaled uniformly to fit and centered (letterboxed on one axis).
    pub fn contain(natural: Size, container: Size) -> Self {
        if natural.is_empty() || container.is_empty() {
            return Self::default();
        }
        let scale = (container.width / natural.width).min(container.height / natural.height);
        let width = natural.width * scale;
        let height = natural.height * scale;
        Self::new(
            (container.width - width) / 2.0,
            (container.height - height) / 2.0,
            width,
            height,
        )
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// Clamp `value` into `[lo, hi]`, saturating at `lo` when the interval is
/// empty (`hi < lo`).
///
/// Unlike [`f32::clamp`] this never panics, which matters when a region is
/// larger than the container it is being kept inside.
pub fn clamp_axis(value: f32, lo: f32, hi: f32) -> f32 {
    value.min(hi).max(lo)
}

/// Place an extent of `inner` centered inside `outer`, never before 0.
pub fn center_axis(outer: f32, inner: f32) -> f32 {
    ((outer - inner) / 2.0).max(0.0)
}
