// SPDX-License-Identifier: GPL-3.0-or-later
// src/constant.rs
//
// Policy constants shared by the engines and the configuration defaults.

/// Default lower bound of a range track.
pub const DEFAULT_RANGE_MIN: f64 = 0.0;

/// Default upper bound of a range track.
pub const DEFAULT_RANGE_MAX: f64 = 100.0;

/// Scale factor from a track fraction to a percentage.
pub const PERCENT: f64 = 100.0;

/// Default edge length of the crop region, in container units.
pub const DEFAULT_CROP_SIZE: f32 = 100.0;

/// Smallest edge length a crop region can be resized to.
pub const MIN_CROP_SIZE: f32 = 90.0;

/// Largest edge length a crop region can be resized to.
pub const MAX_CROP_SIZE: f32 = 120.0;

/// Hit area around the crop region's resize handle.
pub const RESIZE_HANDLE_HIT_SIZE: f32 = 24.0;

/// Default container width the cropper lays the image out in.
pub const DEFAULT_CONTAINER_WIDTH: f32 = 150.0;

/// Default container height the cropper lays the image out in.
pub const DEFAULT_CONTAINER_HEIGHT: f32 = 150.0;

/// Hard cap on either container edge (the widget never grows beyond this).
pub const MAX_CONTAINER_EDGE: f32 = 200.0;

/// Smallest height the container can be dragged down to.
pub const MIN_CONTAINER_HEIGHT: f32 = 150.0;

/// Smallest container width accepted while resizing.
pub const MIN_CONTAINER_WIDTH: f32 = 1.0;

/// Default number of files the multi-file picker holds.
pub const DEFAULT_MAX_FILES: usize = 100;

/// Default accept filter of the file pickers.
pub const DEFAULT_ACCEPT: &str = "image/*";

/// File names longer than this are shortened for display.
pub const SHORT_NAME_LIMIT: usize = 10;

/// Number of characters kept when a file name is shortened.
pub const SHORT_NAME_KEEP: usize = 7;

/// Configuration directory name.
pub const CONFIG_DIR: &str = "alaanu";

/// Configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Extension used for cropped output.
pub const OUTPUT_EXT: &str = "png";
