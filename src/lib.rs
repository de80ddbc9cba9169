//! Liquid fill button animation engine
//!
//! A pour stream fills a circular vessel under a wavering sine surface,
//! the liquid settles with a bounce, and a checkmark is revealed in two
//! strokes. This crate is the time-driven geometry behind that affordance:
//! an external clock driver reports per-phase progress, the engine turns
//! it into coordinates and colors, and any renderer can paint the
//! resulting [`Frame`].
//!
//! The bundled `liquidfill` binary is one such driver/renderer pair: it
//! runs the sequence on wall-clock time and rasterizes frames as
//! true-color braille in the terminal (see `--help`).

pub mod engine;

pub use engine::{
    Circle, DrawFlags, Easing, FINISH_POUR, Frame, Geometry, LiquidEngine, POUR_STROKE_WIDTH,
    Phase, PhaseSpec, Point, PourStream, Rgb, Segment, TICK_COLOR, TICK_STROKE_WIDTH, TOUCH_BASE,
    TickAnchors, TickMark, TickPath, Timeline, WaveSurface, ball_center_y, fill_color,
};
