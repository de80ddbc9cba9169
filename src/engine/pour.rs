//! Pour stream endpoint tracking
//!
//! The stream is a single vertical stroke down the control's center
//! line. During the fill its head races down into the vessel; during the
//! bounce its source sweeps down after it until nothing is left.

use super::TOUCH_BASE;
use super::geometry::Geometry;

/// Stream endpoints on the control's vertical center line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PourStream {
    /// Y of the stream source. Stays at the control's top edge for the
    /// whole fill; only the drain moves it.
    pub top_y: f32,
    /// Y of the stream head.
    pub bottom_y: f32,
}

impl PourStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous run's endpoints.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fill-phase motion: the head falls from the frame top to the
    /// vessel bottom within the first [`TOUCH_BASE`] of progress and
    /// stays pinned there after.
    pub fn fall(&mut self, geo: &Geometry, progress: f32) {
        let t = progress.clamp(0.0, 1.0);
        self.bottom_y = if t < TOUCH_BASE {
            t / TOUCH_BASE * geo.pour_height + geo.frame_top
        } else {
            geo.bottom
        };
    }

    /// Bounce-phase motion: the source sweeps from the frame top down to
    /// the vessel's top rim, eating the stream. Overshoot progress past
    /// 1.0 pushes it slightly below the rim, as the bounce curve does.
    pub fn drain(&mut self, geo: &Geometry, progress: f32) {
        self.top_y = geo.frame_top + geo.diameter() * progress.max(0.0);
    }
}
