// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/model.rs
//
// Widget state: one engine per widget, and the message router.

use log::warn;

use super::message::{InteractionMessage, Notification};
use crate::config::AppConfig;
use crate::domain::crop::{CropInteractionEngine, ImageDescriptor, RegionChanged};
use crate::domain::error::Result;
use crate::domain::files::FileCollector;
use crate::domain::geometry::{Point, Size};
use crate::domain::range::{RangeInteractionEngine, TrackGeometry};

/// The widgets of one form: a swiper, a profile cropper and a file picker.
///
/// Each widget owns its engine exclusively; the model only routes messages.
#[derive(Debug)]
pub struct WidgetModel {
    pub range: RangeInteractionEngine,
    pub crop: CropInteractionEngine,
    pub files: FileCollector,

    // UI state.
    pub error: Option<String>,
}

impl WidgetModel {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            range: RangeInteractionEngine::new(config.range.clone())?,
            crop: CropInteractionEngine::new(config.crop.clone())?,
            files: FileCollector::new(config.max_files, config.accept_filter()),
            error: None,
        })
    }

    pub fn set_error<S: Into<String>>(&mut self, msg: S) {
        self.error = Some(msg.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Handle `message`, recording a failure in [`error`](Self::error)
    /// instead of returning it.
    pub fn dispatch(&mut self, message: InteractionMessage) -> Vec<Notification> {
        match self.update(message.clone()) {
            Ok(notifications) => {
                self.clear_error();
                notifications
            }
            Err(e) => {
                warn!("{message:?} rejected: {e}");
                self.set_error(e.to_string());
                Vec::new()
            }
        }
    }

    /// Route `message` to the engine it belongs to.
    pub fn update(&mut self, message: InteractionMessage) -> Result<Vec<Notification>> {
        let mut out = Vec::new();

        match message {
            InteractionMessage::RangeGeometry { origin, length } => {
                self.range.set_geometry(TrackGeometry::new(origin, length));
            }
            InteractionMessage::RangeDragStart { knob, x } => {
                self.range.begin_drag(knob, Point::new(x, 0.0))?;
            }
            InteractionMessage::RangeDragMove { x } => {
                out.extend(
                    self.range
                        .on_pointer_move(Point::new(x, 0.0))
                        .map(Notification::ValueChanged),
                );
            }
            InteractionMessage::RangeDragEnd => self.range.end_drag(),

            InteractionMessage::CropLoadImage {
                name,
                width,
                height,
            } => {
                let image = ImageDescriptor::new(name, Size::new(width, height));
                let region = self.crop.load_image(image)?;
                out.push(Notification::RegionChanged(RegionChanged { region }));
            }
            InteractionMessage::CropPointerDown { x, y } => {
                self.crop.begin_at(Point::new(x, y))?;
            }
            InteractionMessage::CropMoveStart { x, y } => {
                self.crop.begin_move(Point::new(x, y))?;
            }
            InteractionMessage::CropResizeStart { x, y } => {
                self.crop.begin_resize(Point::new(x, y))?;
            }
            InteractionMessage::CropContainerResizeStart { x, y } => {
                self.crop.begin_container_resize(Point::new(x, y))?;
            }
            InteractionMessage::CropDragMove { x, y } => {
                out.extend(
                    self.crop
                        .on_pointer_move(Point::new(x, y))
                        .map(Notification::RegionChanged),
                );
            }
            InteractionMessage::CropDragEnd => self.crop.end_drag(),
            InteractionMessage::CropContainer { width, height } => {
                out.extend(
                    self.crop
                        .set_container(Size::new(width, height))
                        .map(Notification::RegionChanged),
                );
            }
            InteractionMessage::CropCommit(metrics) => {
                let descriptor = self.crop.commit_crop(&metrics)?;
                out.push(Notification::CropCommitted(descriptor));
            }
            InteractionMessage::CropReset => {
                self.crop.reset();
                out.push(Notification::CropReset);
            }

            InteractionMessage::FilesAdd { files } => {
                if self.files.add(files) > 0 {
                    out.push(self.files_changed());
                }
            }
            InteractionMessage::FileRemove { index } => {
                if self.files.remove(index).is_some() {
                    out.push(self.files_changed());
                }
            }
            InteractionMessage::FilesClear => {
                self.files.clear();
                out.push(self.files_changed());
            }
        }

        Ok(out)
    }

    fn files_changed(&self) -> Notification {
        Notification::FilesChanged {
            files: self.files.files().to_vec(),
        }
    }
}
