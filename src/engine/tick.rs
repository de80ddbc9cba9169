//! Checkmark reveal
//!
//! The checkmark is two strokes: `p1` to `p2`, then `p2` to `p3`. Each
//! tick extends whichever stroke the halfway threshold selects, and
//! control points persist once placed; only a fresh pour clears them.

use super::geometry::{Point, TickAnchors};

/// Progress threshold separating the two strokes.
const SPLIT: f32 = 0.5;

/// Incrementally revealed checkmark control points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickMark {
    /// Moving end of the first stroke; lands on `p2` at the threshold.
    pub control2: Option<Point>,
    /// Moving end of the second stroke; lands on `p3` at full progress.
    pub control3: Option<Point>,
}

impl TickMark {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear both strokes for a fresh run.
    pub fn reset(&mut self) {
        self.control2 = None;
        self.control3 = None;
    }

    /// Extend the reveal to `progress`.
    ///
    /// Past the threshold the first stroke is pinned complete at `p2`,
    /// so sparse ticking can never leave the corner hanging short.
    pub fn trace(&mut self, anchors: &TickAnchors, progress: f32) {
        let t = progress.clamp(0.0, 1.0);
        if t <= 0.0 {
            return;
        }
        if t <= SPLIT {
            self.control2 = Some(anchors.p1.lerp(anchors.p2, t / SPLIT));
        } else {
            self.control2 = Some(anchors.p2);
            self.control3 = Some(anchors.p2.lerp(anchors.p3, (t - SPLIT) / SPLIT));
        }
    }
}
