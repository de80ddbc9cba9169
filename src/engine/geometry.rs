//! Vessel geometry derived from the control size
//!
//! Everything the animation needs to know about where it lives: the
//! vessel circle, the frame the pour falls through, and the checkmark's
//! three anchor points. All of it derives from width and height alone
//! and is rebuilt whenever the control is resized.

use serde::Serialize;

/// A 2D point in control pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Interpolate toward `other` by `t`.
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }
}

/// Per-size constants of the control.
///
/// The vessel is a circle of `radius = width / 8` centered in the
/// control. The pour frame reaches three radii above the center, giving
/// the stream a four-radius drop down to the vessel bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Vessel center.
    pub center: Point,
    /// Vessel radius.
    pub radius: f32,
    /// Top of the pour frame, where the stream head rests before falling.
    pub frame_top: f32,
    /// Left edge of the vessel's bounding square.
    pub left: f32,
    /// Top edge of the vessel's bounding square.
    pub top: f32,
    /// Bottom edge of the vessel's bounding square.
    pub bottom: f32,
    /// Total drop height of the pour stream.
    pub pour_height: f32,
}

impl Geometry {
    /// Derive the geometry for a control of `width` x `height` pixels.
    pub fn new(width: f32, height: f32) -> Self {
        let center = Point::new(width / 2.0, height / 2.0);
        let radius = width / 8.0;
        Self {
            center,
            radius,
            frame_top: center.y - 3.0 * radius,
            left: center.x - radius,
            top: center.y - radius,
            bottom: center.y + radius,
            pour_height: 4.0 * radius,
        }
    }

    /// Right edge of the vessel's bounding square.
    pub fn right(&self) -> f32 {
        self.center.x + self.radius
    }

    /// Vessel diameter.
    pub fn diameter(&self) -> f32 {
        2.0 * self.radius
    }
}

/// The checkmark's three fixed anchors, placed at fractional offsets of
/// the vessel's bounding square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickAnchors {
    /// Left end of the first stroke.
    pub p1: Point,
    /// The corner where the two strokes meet.
    pub p2: Point,
    /// Right end of the second stroke.
    pub p3: Point,
}

impl TickAnchors {
    /// Anchor points for `geo`'s vessel.
    pub fn of(geo: &Geometry) -> Self {
        let d = geo.diameter();
        Self {
            p1: Point::new(geo.left + 0.29 * d, geo.top + 0.525 * d),
            p2: Point::new(geo.left + 0.445 * d, geo.top + 0.675 * d),
            p3: Point::new(geo.left + 0.74 * d, geo.top + 0.45 * d),
        }
    }
}
