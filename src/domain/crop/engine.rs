// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/engine.rs
//
// Crop selection state machine: load, move, resize, commit.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use super::commit::{CropDescriptor, ImageMetrics};
use super::region::{CropConfig, CropRegion, ImageDescriptor};
use crate::domain::error::{EngineError, Result};
use crate::domain::geometry::{Point, Size, clamp_axis};
use crate::domain::notify::{ListenerId, Listeners};
use crate::domain::session::{DragMode, DragSession, SessionSlot};

/// Lifecycle of the cropper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropState {
    /// No image.
    Idle,
    /// Region placed, waiting for input.
    ImageLoaded,
    /// A move or resize is in progress.
    Dragging,
    /// The crop was computed; `reset` or a new image starts over.
    Committed,
}

/// Emitted whenever the region or its container changed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionChanged {
    pub region: CropRegion,
}

/// Manages one crop region over one displayed image.
#[derive(Debug)]
pub struct CropInteractionEngine {
    config: CropConfig,
    container: Size,
    image: Option<ImageDescriptor>,
    region: Option<CropRegion>,
    last_commit: Option<CropDescriptor>,
    session: SessionSlot,
    listeners: Listeners<RegionChanged>,
}

impl CropInteractionEngine {
    pub fn new(config: CropConfig) -> Result<Self> {
        config.validate()?;
        let container = config.fit_container(config.container, 0.0);
        Ok(Self {
            config,
            container,
            image: None,
            region: None,
            last_commit: None,
            session: SessionSlot::default(),
            listeners: Listeners::default(),
        })
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    pub fn state(&self) -> CropState {
        if self.region.is_none() {
            CropState::Idle
        } else if self.session.is_open() {
            CropState::Dragging
        } else if self.last_commit.is_some() {
            CropState::Committed
        } else {
            CropState::ImageLoaded
        }
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn image(&self) -> Option<&ImageDescriptor> {
        self.image.as_ref()
    }

    pub fn region(&self) -> Option<CropRegion> {
        self.region
    }

    pub fn last_commit(&self) -> Option<CropDescriptor> {
        self.last_commit
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_open()
    }

    /// Show `image` and place a fresh region centered in the container.
    ///
    /// Replaces any image already loaded or committed.
    pub fn load_image(&mut self, image: ImageDescriptor) -> Result<CropRegion> {
        if self.session.is_open() {
            return Err(EngineError::SessionAlreadyActive);
        }
        let region = CropRegion::centered(self.config.region_size, self.config.shape, self.container);
        debug!(
            "image '{}' ({}x{}) loaded, region at ({}, {})",
            image.name, image.natural.width, image.natural.height, region.position.x, region.position.y
        );
        self.image = Some(image);
        self.region = Some(region);
        self.last_commit = None;
        self.notify();
        Ok(region)
    }

    /// Apply a new container layout and keep the region inside it.
    ///
    /// A committed region is frozen: only the container changes, and the
    /// next `load_image` centers a fresh region in it.
    pub fn set_container(&mut self, size: Size) -> Option<RegionChanged> {
        let fitted = self.config.fit_container(size, 0.0);
        if fitted != size {
            warn!(
                "container {}x{} capped to {}x{}",
                size.width, size.height, fitted.width, fitted.height
            );
        }
        if self.last_commit.is_some() {
            debug!("container resized after commit, region left in place");
            self.container = fitted;
            return None;
        }
        self.apply_container(fitted)
    }

    pub fn begin_move(&mut self, pointer: Point) -> Result<()> {
        let region = self.active_region()?;
        self.open(DragMode::Move, pointer, region.position)
    }

    pub fn begin_resize(&mut self, pointer: Point) -> Result<()> {
        let region = self.active_region()?;
        let subject = Point::new(region.size.width, region.size.height);
        self.open(DragMode::ResizeRegion, pointer, subject)
    }

    pub fn begin_container_resize(&mut self, pointer: Point) -> Result<()> {
        self.active_region()?;
        let subject = Point::new(self.container.width, self.container.height);
        self.open(DragMode::ResizeContainer, pointer, subject)
    }

    /// Start whatever drag the region offers under `pointer`.
    ///
    /// Returns the chosen mode, or `None` when the pointer missed the region.
    pub fn begin_at(&mut self, pointer: Point) -> Result<Option<DragMode>> {
        let region = self.active_region()?;
        match region.hit_test(pointer) {
            Some(DragMode::ResizeRegion) => self.begin_resize(pointer)?,
            Some(DragMode::Move) => self.begin_move(pointer)?,
            _ => return Ok(None),
        }
        Ok(self.session.current().map(|session| session.mode))
    }

    /// Scoped move: the session ends when the guard is dropped.
    pub fn drag_move(&mut self, pointer: Point) -> Result<CropDrag<'_>> {
        self.begin_move(pointer)?;
        Ok(CropDrag { engine: self })
    }

    /// Scoped resize: the session ends when the guard is dropped.
    pub fn drag_resize(&mut self, pointer: Point) -> Result<CropDrag<'_>> {
        self.begin_resize(pointer)?;
        Ok(CropDrag { engine: self })
    }

    /// Scoped container resize: the session ends when the guard is dropped.
    pub fn drag_container(&mut self, pointer: Point) -> Result<CropDrag<'_>> {
        self.begin_container_resize(pointer)?;
        Ok(CropDrag { engine: self })
    }

    /// Feed a pointer position to the open session.
    ///
    /// Returns `None` when no crop drag is open.
    pub fn on_pointer_move(&mut self, pointer: Point) -> Option<RegionChanged> {
        let session = *self.session.current()?;
        let mut region = self.region?;

        match session.mode {
            DragMode::Move => {
                region.move_to(session.subject_origin + session.delta(pointer));
            }
            DragMode::ResizeRegion => {
                let edge = clamp_axis(
                    pointer.x - region.position.x,
                    self.config.min_size,
                    self.config.max_size,
                );
                region.resize(edge);
            }
            DragMode::ResizeContainer => {
                let size = self.config.fit_container(
                    Size::new(pointer.x, pointer.y),
                    self.config.min_container_height,
                );
                return self.apply_container(size);
            }
            DragMode::Knob(_) => return None,
        }

        trace!(
            "region {:?} -> ({}, {}) {}x{}",
            session.mode, region.position.x, region.position.y, region.size.width, region.size.height
        );
        self.region = Some(region);
        Some(self.notify_with(region))
    }

    /// Close the open drag session. Safe to call when none is open.
    pub fn end_drag(&mut self) {
        if let Some(session) = self.session.close() {
            debug!("crop drag ended: {:?}", session.mode);
        }
    }

    /// Compute the source-pixel crop for the current region.
    ///
    /// Only the commit result is recorded; the region stays where it is.
    pub fn commit_crop(&mut self, metrics: &ImageMetrics) -> Result<CropDescriptor> {
        let region = self.active_region()?;
        if self.session.is_open() {
            return Err(EngineError::SessionAlreadyActive);
        }
        let descriptor = CropDescriptor::compute(&region, metrics)?;
        debug!(
            "crop committed: source ({}, {}) {}x{} -> {}x{} {:?}",
            descriptor.source_x,
            descriptor.source_y,
            descriptor.source_width,
            descriptor.source_height,
            descriptor.output_width,
            descriptor.output_height,
            descriptor.shape
        );
        self.last_commit = Some(descriptor);
        Ok(descriptor)
    }

    /// Drop image, region, commit and any open session.
    pub fn reset(&mut self) {
        self.session.close();
        self.image = None;
        self.region = None;
        self.last_commit = None;
        debug!("cropper reset");
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&RegionChanged) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn active_region(&self) -> Result<CropRegion> {
        match self.region {
            Some(region) if self.last_commit.is_none() => Ok(region),
            _ => Err(EngineError::NoActiveRegion),
        }
    }

    fn open(&mut self, mode: DragMode, pointer: Point, subject: Point) -> Result<()> {
        self.session.open(DragSession::new(mode, pointer, subject))?;
        debug!("crop drag started: {mode:?} at ({}, {})", pointer.x, pointer.y);
        Ok(())
    }

    fn apply_container(&mut self, size: Size) -> Option<RegionChanged> {
        self.container = size;
        let mut region = self.region?;
        region.set_bounds(size);
        self.region = Some(region);
        Some(self.notify_with(region))
    }

    fn notify(&mut self) {
        if let Some(region) = self.region {
            self.notify_with(region);
        }
    }

    fn notify_with(&mut self, region: CropRegion) -> RegionChanged {
        let event = RegionChanged { region };
        self.listeners.emit(&event);
        event
    }
}

/// Open crop drag. Ends the session when dropped.
#[derive(Debug)]
pub struct CropDrag<'a> {
    engine: &'a mut CropInteractionEngine,
}

impl CropDrag<'_> {
    pub fn move_to(&mut self, pointer: Point) -> Option<RegionChanged> {
        self.engine.on_pointer_move(pointer)
    }

    pub fn region(&self) -> Option<CropRegion> {
        self.engine.region()
    }

    /// End the drag explicitly.
    pub fn finish(self) {}
}

impl Drop for CropDrag<'_> {
    fn drop(&mut self) {
        self.engine.end_drag();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::domain::crop::region::Shape;
    use crate::domain::geometry::Rect;

    fn photo() -> ImageDescriptor {
        ImageDescriptor::new("photo.png", Size::new(300.0, 300.0))
    }

    fn loaded(config: CropConfig) -> CropInteractionEngine {
        let mut engine = CropInteractionEngine::new(config).unwrap();
        engine.load_image(photo()).unwrap();
        engine
    }

    fn position(engine: &CropInteractionEngine) -> Point {
        engine.region().unwrap().position
    }

    #[test]
    fn walks_through_lifecycle() {
        let mut engine = CropInteractionEngine::new(CropConfig::default()).unwrap();
        assert_eq!(engine.state(), CropState::Idle);

        engine.load_image(photo()).unwrap();
        assert_eq!(engine.state(), CropState::ImageLoaded);

        engine.begin_move(Point::new(60.0, 60.0)).unwrap();
        assert_eq!(engine.state(), CropState::Dragging);
        engine.end_drag();
        assert_eq!(engine.state(), CropState::ImageLoaded);

        engine
            .commit_crop(&ImageMetrics::unscaled(Size::new(150.0, 150.0)))
            .unwrap();
        assert_eq!(engine.state(), CropState::Committed);

        engine.reset();
        assert_eq!(engine.state(), CropState::Idle);
        assert!(engine.image().is_none());
        assert!(engine.last_commit().is_none());
    }

    #[test]
    fn load_centers_region_in_container() {
        let config = CropConfig::default()
            .with_container(Size::new(300.0, 300.0))
            .with_max_container(Size::square(400.0));
        let engine = loaded(config);
        assert_eq!(position(&engine), Point::new(100.0, 100.0));
    }

    #[test]
    fn idle_engine_has_no_region_to_drag() {
        let mut engine = CropInteractionEngine::new(CropConfig::default()).unwrap();
        assert_eq!(engine.begin_move(Point::ORIGIN), Err(EngineError::NoActiveRegion));
        assert_eq!(engine.begin_resize(Point::ORIGIN), Err(EngineError::NoActiveRegion));
        assert_eq!(
            engine.commit_crop(&ImageMetrics::unscaled(Size::square(10.0))),
            Err(EngineError::NoActiveRegion)
        );
        assert!(engine.on_pointer_move(Point::new(5.0, 5.0)).is_none());
    }

    #[test]
    fn move_follows_pointer_delta() {
        let mut engine = loaded(CropConfig::default());
        assert_eq!(position(&engine), Point::new(25.0, 25.0));

        engine.begin_move(Point::new(60.0, 60.0)).unwrap();
        let event = engine.on_pointer_move(Point::new(70.0, 50.0)).unwrap();
        assert_eq!(event.region.position, Point::new(35.0, 15.0));
    }

    #[test]
    fn move_saturates_at_container_edges() {
        let mut engine = loaded(CropConfig::default());
        engine.begin_move(Point::new(60.0, 60.0)).unwrap();

        engine.on_pointer_move(Point::new(500.0, -500.0));
        assert_eq!(position(&engine), Point::new(50.0, 0.0));
    }

    #[test]
    fn resize_is_square_and_clamped() {
        let mut engine = loaded(CropConfig::default());
        engine.begin_resize(Point::new(125.0, 125.0)).unwrap();

        engine.on_pointer_move(Point::new(75.0, 200.0));
        assert_eq!(engine.region().unwrap().size, Size::square(90.0));

        engine.on_pointer_move(Point::new(135.0, 0.0));
        assert_eq!(engine.region().unwrap().size, Size::square(110.0));

        engine.on_pointer_move(Point::new(400.0, 0.0));
        let region = engine.region().unwrap();
        assert_eq!(region.size, Size::square(120.0));
        assert_eq!(region.position, Point::new(25.0, 25.0));
    }

    #[test]
    fn growing_near_the_edge_shifts_region_inward() {
        let mut engine = loaded(CropConfig::default());
        {
            let mut drag = engine.drag_move(Point::ORIGIN).unwrap();
            drag.move_to(Point::new(25.0, 25.0));
        }
        assert_eq!(position(&engine), Point::new(50.0, 50.0));

        {
            let mut drag = engine.drag_resize(Point::new(150.0, 150.0)).unwrap();
            drag.move_to(Point::new(200.0, 150.0));
        }
        let region = engine.region().unwrap();
        assert_eq!(region.size, Size::square(120.0));
        assert_eq!(region.position, Point::new(30.0, 30.0));
    }

    #[test]
    fn container_resize_respects_caps() {
        let mut engine = loaded(CropConfig::default());
        engine.begin_container_resize(Point::new(150.0, 150.0)).unwrap();

        engine.on_pointer_move(Point::new(400.0, 20.0));
        assert_eq!(engine.container(), Size::new(200.0, 150.0));

        engine.on_pointer_move(Point::new(110.0, 180.0));
        assert_eq!(engine.container(), Size::new(110.0, 180.0));
        let region = engine.region().unwrap();
        assert_eq!(region.bounds, Size::new(110.0, 180.0));
        assert_eq!(region.position, Point::new(10.0, 25.0));
    }

    #[test]
    fn layout_change_reclamps_region() {
        let mut engine = loaded(CropConfig::default());
        let event = engine.set_container(Size::new(100.0, 120.0)).unwrap();
        assert_eq!(event.region.position, Point::new(0.0, 20.0));
        assert_eq!(engine.container(), Size::new(100.0, 120.0));
    }

    #[test]
    fn layout_change_after_commit_keeps_region_and_commit_in_step() {
        let mut engine = loaded(CropConfig::default());
        let crop = engine
            .commit_crop(&ImageMetrics::unscaled(Size::square(150.0)))
            .unwrap();
        let region = engine.region();

        assert!(engine.set_container(Size::new(100.0, 120.0)).is_none());
        assert_eq!(engine.container(), Size::new(100.0, 120.0));
        assert_eq!(engine.region(), region);
        assert_eq!(engine.last_commit(), Some(crop));
        assert_eq!(engine.state(), CropState::Committed);

        let fresh = engine.load_image(photo()).unwrap();
        assert_eq!(fresh.bounds, Size::new(100.0, 120.0));
        assert_eq!(fresh.position, Point::new(0.0, 10.0));
    }

    #[test]
    fn reentrant_drag_is_rejected() {
        let mut engine = loaded(CropConfig::default());
        engine.begin_move(Point::ORIGIN).unwrap();

        assert_eq!(engine.begin_resize(Point::ORIGIN), Err(EngineError::SessionAlreadyActive));
        assert_eq!(engine.load_image(photo()), Err(EngineError::SessionAlreadyActive));
        assert_eq!(
            engine.commit_crop(&ImageMetrics::unscaled(Size::square(150.0))),
            Err(EngineError::SessionAlreadyActive)
        );
    }

    #[test]
    fn end_drag_is_idempotent() {
        let mut engine = loaded(CropConfig::default());
        engine.begin_move(Point::ORIGIN).unwrap();
        engine.on_pointer_move(Point::new(5.0, 5.0));

        engine.end_drag();
        let region = engine.region();
        engine.end_drag();

        assert_eq!(engine.region(), region);
        assert!(engine.on_pointer_move(Point::new(50.0, 50.0)).is_none());
    }

    #[test]
    fn committed_region_is_frozen_until_new_image() {
        let mut engine = loaded(CropConfig::default());
        engine
            .commit_crop(&ImageMetrics::unscaled(Size::square(150.0)))
            .unwrap();

        assert_eq!(engine.begin_move(Point::ORIGIN), Err(EngineError::NoActiveRegion));

        engine.load_image(photo()).unwrap();
        assert_eq!(engine.state(), CropState::ImageLoaded);
        assert!(engine.begin_move(Point::ORIGIN).is_ok());
    }

    #[test]
    fn unscaled_commit_matches_region() {
        let mut engine = loaded(CropConfig::default().with_shape(Shape::Circle));
        let crop = engine
            .commit_crop(&ImageMetrics::unscaled(Size::square(150.0)))
            .unwrap();

        assert_eq!(crop.source_x, 25.0);
        assert_eq!(crop.source_width, 100.0);
        assert_eq!(crop.source_height, 100.0);
        assert_eq!(crop.shape, Shape::Circle);
        assert_eq!(engine.last_commit(), Some(crop));
    }

    #[test]
    fn degenerate_display_fails_commit_without_committing() {
        let mut engine = loaded(CropConfig::default());
        let metrics = ImageMetrics {
            container_origin: Point::ORIGIN,
            displayed: Rect::new(0.0, 0.0, 0.0, 0.0),
            natural: Size::square(300.0),
        };
        assert_eq!(engine.commit_crop(&metrics), Err(EngineError::DivideByZero));
        assert_eq!(engine.state(), CropState::ImageLoaded);
    }

    #[test]
    fn begin_at_dispatches_on_hit_test() {
        let mut engine = loaded(CropConfig::default());
        assert_eq!(engine.begin_at(Point::new(2.0, 2.0)), Ok(None));
        assert_eq!(engine.begin_at(Point::new(124.0, 126.0)), Ok(Some(DragMode::ResizeRegion)));
        engine.end_drag();
        assert_eq!(engine.begin_at(Point::new(60.0, 60.0)), Ok(Some(DragMode::Move)));
    }

    #[test]
    fn guard_releases_session_on_error_path() {
        fn bail(engine: &mut CropInteractionEngine) -> Result<()> {
            let mut drag = engine.drag_move(Point::ORIGIN)?;
            drag.move_to(Point::new(10.0, 0.0));
            Err(EngineError::NoActiveRegion)
        }

        let mut engine = loaded(CropConfig::default());
        assert!(bail(&mut engine).is_err());
        assert!(!engine.is_dragging());
        assert_eq!(position(&engine), Point::new(35.0, 25.0));
    }

    #[test]
    fn listeners_receive_region_updates() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut engine = CropInteractionEngine::new(CropConfig::default()).unwrap();
        let sink = Rc::clone(&seen);
        engine.subscribe(move |event| sink.borrow_mut().push(event.region.position));

        engine.load_image(photo()).unwrap();
        engine.begin_move(Point::ORIGIN).unwrap();
        engine.on_pointer_move(Point::new(5.0, 0.0));

        assert_eq!(*seen.borrow(), vec![Point::new(25.0, 25.0), Point::new(30.0, 25.0)]);
    }
}
