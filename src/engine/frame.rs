//! Per-tick drawable output
//!
//! The engine's outward face: everything a renderer needs to paint one
//! tick, with no drawing-surface types involved. Stroke widths and the
//! checkmark color are fixed properties of the design, exported as
//! constants rather than carried per frame.

use serde::Serialize;

use super::color::Rgb;
use super::geometry::Point;

/// Pour stream stroke width, in pixels of the reference control.
pub const POUR_STROKE_WIDTH: f32 = 30.0;
/// Checkmark stroke width, in pixels of the reference control.
pub const TICK_STROKE_WIDTH: f32 = 15.0;
/// The checkmark is always white, independent of the fill color.
pub const TICK_COLOR: Rgb = Rgb { r: 255, g: 255, b: 255 };

/// A straight stroke between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// Center-plus-radius circle; doubles as the vessel clip mask and the
/// settled ball.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f32,
}

/// Checkmark polyline: the fixed anchor plus whatever control points the
/// reveal has produced so far. `end` never appears without `mid`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickPath {
    pub start: Point,
    pub mid: Option<Point>,
    pub end: Option<Point>,
}

/// Which primitives are live this tick, derived from phase completion:
/// the wave shows while filling, the ball from the moment the fill is
/// done, the pour line until the bounce settles, the tick from then on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrawFlags {
    pub pour: bool,
    pub wave: bool,
    pub ball: bool,
    pub tick: bool,
}

/// One tick's drawable output.
#[derive(Debug, Clone, Serialize)]
pub struct Frame<'a> {
    /// Fill color shared by the pour stream, the liquid and the ball.
    pub color: Rgb,
    /// Vertical pour stream, stroked at [`POUR_STROKE_WIDTH`].
    pub pour: Segment,
    /// Closed wave polygon, borrowed from the wave state; the final two
    /// points close the surface down along the vessel bottom. Clip
    /// against `clip` before filling.
    pub wave: &'a [Point],
    /// The vessel circle.
    pub clip: Circle,
    /// The settled liquid mass.
    pub ball: Circle,
    /// Checkmark reveal, stroked [`TICK_COLOR`] at [`TICK_STROKE_WIDTH`].
    pub tick: TickPath,
    pub draw: DrawFlags,
}
