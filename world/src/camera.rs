//! Camera that trails the spaceship and never leaves the world rectangle.

use starminer_core::{math::lerp, WorldBounds, WorldPoint};

/// Fraction of the remaining distance the camera covers every tick.
const CAMERA_SMOOTHING: f32 = 0.05;

pub(crate) const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
pub(crate) const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Camera {
    origin: WorldPoint,
    width: f32,
    height: f32,
}

impl Camera {
    pub(crate) fn new(width: f32, height: f32) -> Self {
        Self {
            origin: WorldPoint::new(0.0, 0.0),
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub(crate) fn origin(&self) -> WorldPoint {
        self.origin
    }

    pub(crate) fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub(crate) fn resize(&mut self, width: f32, height: f32, bounds: &WorldBounds) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.origin = self.clamped(self.origin, bounds);
    }

    /// Jumps straight to the view centred on `focus`.
    pub(crate) fn center_on(&mut self, focus: WorldPoint, bounds: &WorldBounds) {
        let desired = self.desired_origin(focus);
        self.origin = self.clamped(desired, bounds);
    }

    /// Eases toward the view centred on `focus`, then clamps to the world.
    pub(crate) fn follow(&mut self, focus: WorldPoint, bounds: &WorldBounds) {
        let desired = self.desired_origin(focus);
        let eased = self.origin.lerp(desired, CAMERA_SMOOTHING);
        self.origin = self.clamped(eased, bounds);
    }

    fn desired_origin(&self, focus: WorldPoint) -> WorldPoint {
        WorldPoint::new(focus.x() - self.width / 2.0, focus.y() - self.height / 2.0)
    }

    fn clamped(&self, origin: WorldPoint, bounds: &WorldBounds) -> WorldPoint {
        // A viewport wider than the world collapses the range to zero.
        let max_x = (bounds.width() - self.width).max(0.0);
        let max_y = (bounds.height() - self.height).max(0.0);
        WorldPoint::new(origin.x().clamp(0.0, max_x), origin.y().clamp(0.0, max_y))
    }
}
