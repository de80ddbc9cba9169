//! Liquid fill animation engine
//!
//! Turns the three-phase pour timeline into drawable geometry, one tick
//! at a time. Five seconds of pouring under a scrolling wave, half a
//! second of bounce as the liquid settles into a ball, then a two-stroke
//! checkmark reveal. The engine never touches a drawing surface: a clock
//! driver feeds normalized progress through [`LiquidEngine::on_tick`]
//! and a renderer consumes [`LiquidEngine::frame`].
//!
//! ## Key Components
//!
//! - `LiquidEngine`: facade owning every per-run state struct
//! - `Geometry` / `TickAnchors`: constants derived from the control size
//! - `PourStream`: falling and draining stream endpoints
//! - `WaveSurface`: scrolling sine surface of the filling liquid
//! - `ball_center_y`: bounce displacement of the settled liquid
//! - `TickMark`: incremental checkmark reveal
//! - `Timeline`: phase sequencing and completion flags
//! - `Frame`: per-tick drawable output record

pub mod bounce;
pub mod color;
pub mod easing;
pub mod frame;
pub mod geometry;
pub mod pour;
pub mod tick;
pub mod timeline;
pub mod wave;

pub use bounce::ball_center_y;
pub use color::{Rgb, fill_color};
pub use easing::Easing;
pub use frame::{
    Circle, DrawFlags, Frame, POUR_STROKE_WIDTH, Segment, TICK_COLOR, TICK_STROKE_WIDTH, TickPath,
};
pub use geometry::{Geometry, Point, TickAnchors};
pub use pour::PourStream;
pub use tick::TickMark;
pub use timeline::{Phase, PhaseSpec, Timeline};
pub use wave::WaveSurface;

/// Fraction of the fill spent with the stream falling before it touches
/// the vessel bottom; also the width of the final red fade-out.
pub const TOUCH_BASE: f32 = 0.1;

/// Fill progress at which pouring is done: the green ramp saturates, red
/// starts to fade and the wave begins to die down.
pub const FINISH_POUR: f32 = 0.9;

/// The engine facade: one struct owning every per-run state.
///
/// Call [`set_size`](Self::set_size) once per size change, then
/// [`start_pour`](Self::start_pour), then [`on_tick`](Self::on_tick) per
/// driver tick, reading [`frame`](Self::frame) after each. Ticks arriving
/// before the size is known or before a pour has started are declined.
#[derive(Debug, Clone)]
pub struct LiquidEngine {
    geometry: Option<Geometry>,
    anchors: Option<TickAnchors>,
    timeline: Timeline,
    color: Rgb,
    pour: PourStream,
    wave: WaveSurface,
    ball_y: f32,
    tick: TickMark,
}

impl LiquidEngine {
    pub fn new() -> Self {
        Self {
            geometry: None,
            anchors: None,
            timeline: Timeline::new(),
            color: fill_color(0.0),
            pour: PourStream::new(),
            wave: WaveSurface::new(),
            ball_y: 0.0,
            tick: TickMark::new(),
        }
    }

    /// Establish or refresh the control's pixel dimensions.
    ///
    /// Must run before the first tick; the vessel geometry and checkmark
    /// anchors all derive from it.
    pub fn set_size(&mut self, width: f32, height: f32) {
        let geo = Geometry::new(width, height);
        self.anchors = Some(TickAnchors::of(&geo));
        self.ball_y = geo.center.y;
        self.geometry = Some(geo);
        tracing::debug!(width, height, "geometry rebuilt");
    }

    /// Reset all per-run state and (re)enter the filling phase.
    ///
    /// Safe to call mid-run: the previous run's scroll angle, checkmark
    /// strokes and stream endpoints are cleared before the next tick can
    /// observe them.
    pub fn start_pour(&mut self) {
        self.wave.reset();
        self.tick.reset();
        self.pour.reset();
        self.color = fill_color(0.0);
        self.ball_y = self.geometry.as_ref().map_or(0.0, |g| g.center.y);
        self.timeline.start();
        tracing::debug!("pour sequence started");
    }

    /// Advance one driver tick.
    ///
    /// `progress` is the raw elapsed fraction of `phase` in `[0, 1]`;
    /// the phase's easing curve is applied in here, and the bounce
    /// overshoot is the one eased value allowed past 1.0.
    pub fn on_tick(&mut self, phase: Phase, progress: f32) {
        let (Some(geo), Some(anchors)) = (self.geometry, self.anchors) else {
            tracing::warn!(?phase, progress, "tick before size is known, declined");
            return;
        };
        if self.timeline.is_idle() {
            tracing::warn!(?phase, progress, "tick while idle, call start_pour first");
            return;
        }
        let raw = progress.clamp(0.0, 1.0);
        if !self.timeline.observe(phase, raw) {
            tracing::debug!(?phase, raw, "tick for a passed phase, ignored");
            return;
        }
        let eased = phase.spec().easing.apply(raw);
        match phase {
            Phase::Filling => {
                let eased = eased.clamp(0.0, 1.0);
                self.color = fill_color(eased);
                self.pour.fall(&geo, eased);
                self.wave.advance(&geo, eased);
            }
            Phase::Bouncing => {
                self.pour.drain(&geo, eased);
                self.ball_y = ball_center_y(&geo, eased);
            }
            Phase::Ticking => {
                self.tick.trace(&anchors, eased.clamp(0.0, 1.0));
            }
        }
    }

    /// Drawable output for the current state, `None` before the size is
    /// known.
    pub fn frame(&self) -> Option<Frame<'_>> {
        let geo = self.geometry?;
        let anchors = self.anchors?;
        let started = !self.timeline.is_idle();
        let filled = self.timeline.is_finished(Phase::Filling);
        let settled = self.timeline.is_finished(Phase::Bouncing);
        Some(Frame {
            color: self.color,
            pour: Segment {
                from: Point::new(geo.center.x, self.pour.top_y),
                to: Point::new(geo.center.x, self.pour.bottom_y),
            },
            wave: self.wave.surface(),
            clip: Circle {
                center: geo.center,
                radius: geo.radius,
            },
            ball: Circle {
                center: Point::new(geo.center.x, self.ball_y),
                radius: geo.radius,
            },
            tick: TickPath {
                start: anchors.p1,
                mid: self.tick.control2,
                end: self.tick.control3,
            },
            draw: DrawFlags {
                pour: started && !settled,
                wave: started && !filled,
                ball: started && filled,
                tick: started && settled,
            },
        })
    }

    /// Currently running phase, `None` while idle.
    pub fn phase(&self) -> Option<Phase> {
        self.timeline.phase()
    }

    /// Whether `phase` has received its final tick.
    pub fn is_finished(&self, phase: Phase) -> bool {
        self.timeline.is_finished(phase)
    }

    /// Geometry of the last established size.
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    /// Checkmark anchors of the last established size.
    pub fn anchors(&self) -> Option<&TickAnchors> {
        self.anchors.as_ref()
    }

    /// This tick's fill color.
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Wave state: scroll angle, baseline and surface polygon.
    pub fn wave(&self) -> &WaveSurface {
        &self.wave
    }

    /// Checkmark reveal state.
    pub fn tick_mark(&self) -> &TickMark {
        &self.tick
    }

    /// Pour stream endpoints.
    pub fn pour(&self) -> &PourStream {
        &self.pour
    }

    /// Vertical center of the settled liquid ball.
    pub fn ball_y(&self) -> f32 {
        self.ball_y
    }
}

impl Default for LiquidEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn ready_engine() -> LiquidEngine {
        let mut e = LiquidEngine::new();
        e.set_size(800.0, 800.0);
        e.start_pour();
        e
    }

    #[test]
    fn declines_ticks_without_geometry() {
        let mut e = LiquidEngine::new();
        e.start_pour();
        e.on_tick(Phase::Filling, 0.5);
        assert!(e.frame().is_none(), "no frame before the size is known");
        assert!(e.wave().surface().is_empty(), "tick should not have run");
    }

    #[test]
    fn declines_ticks_while_idle() {
        let mut e = LiquidEngine::new();
        e.set_size(800.0, 800.0);
        e.on_tick(Phase::Filling, 0.5);
        assert!(e.phase().is_none(), "a tick alone must not start a run");
        assert!(e.wave().surface().is_empty());
    }

    #[test]
    fn start_pour_is_idempotent() {
        let mut once = ready_engine();
        let mut twice = ready_engine();
        twice.start_pour();
        twice.start_pour();
        assert_eq!(once.phase(), twice.phase());
        assert_eq!(once.wave().fai(), twice.wave().fai());
        assert_eq!(once.tick_mark(), twice.tick_mark());
        assert_eq!(once.pour(), twice.pour());
        assert_eq!(once.color(), twice.color());
        assert_eq!(once.ball_y(), twice.ball_y());
        once.on_tick(Phase::Filling, 0.1);
        twice.on_tick(Phase::Filling, 0.1);
        assert_eq!(once.color(), twice.color());
    }

    #[test]
    fn restart_clears_previous_run() {
        let mut e = ready_engine();
        for i in 0..=20 {
            e.on_tick(Phase::Filling, i as f32 / 20.0);
        }
        e.on_tick(Phase::Bouncing, 1.0);
        e.on_tick(Phase::Ticking, 1.0);
        assert!(e.is_finished(Phase::Ticking));

        e.start_pour();
        assert_eq!(e.phase(), Some(Phase::Filling));
        assert_eq!(e.wave().fai(), 0.0, "scroll angle restarts at zero");
        assert!(e.tick_mark().control2.is_none());
        assert!(e.tick_mark().control3.is_none());
        assert_eq!(e.pour().top_y, 0.0, "stream source back at the top edge");
        assert!(!e.is_finished(Phase::Filling));
        let f = e.frame().unwrap();
        assert!(f.draw.pour && f.draw.wave && !f.draw.ball && !f.draw.tick);
    }

    #[test]
    fn full_sequence_reaches_final_state() {
        let mut e = ready_engine();
        for i in 0..=50 {
            e.on_tick(Phase::Filling, i as f32 / 50.0);
        }
        for i in 0..=10 {
            e.on_tick(Phase::Bouncing, i as f32 / 10.0);
        }
        for i in 0..=20 {
            e.on_tick(Phase::Ticking, i as f32 / 20.0);
        }
        let geo = *e.geometry().unwrap();
        let anchors = *e.anchors().unwrap();

        assert_eq!(e.color(), Rgb::new(0, 255, 24), "fully green at the end");
        assert!((e.ball_y() - geo.center.y).abs() < EPS, "ball back at rest");
        let c2 = e.tick_mark().control2.expect("first stroke complete");
        let c3 = e.tick_mark().control3.expect("second stroke complete");
        assert!((c2.x - anchors.p2.x).abs() < EPS && (c2.y - anchors.p2.y).abs() < EPS);
        assert!((c3.x - anchors.p3.x).abs() < EPS && (c3.y - anchors.p3.y).abs() < EPS);
        assert!(e.is_finished(Phase::Ticking));

        let f = e.frame().unwrap();
        assert!(f.draw.ball && f.draw.tick);
        assert!(!f.draw.pour && !f.draw.wave);
    }

    #[test]
    fn render_policy_follows_completion() {
        let mut e = ready_engine();
        e.on_tick(Phase::Filling, 0.5);
        let f = e.frame().unwrap();
        assert!(f.draw.pour && f.draw.wave && !f.draw.ball && !f.draw.tick);

        e.on_tick(Phase::Filling, 1.0);
        e.on_tick(Phase::Bouncing, 0.5);
        let f = e.frame().unwrap();
        assert!(f.draw.pour && !f.draw.wave && f.draw.ball && !f.draw.tick);

        e.on_tick(Phase::Bouncing, 1.0);
        e.on_tick(Phase::Ticking, 0.5);
        let f = e.frame().unwrap();
        assert!(!f.draw.pour && !f.draw.wave && f.draw.ball && f.draw.tick);
    }

    #[test]
    fn bounce_overshoot_drops_the_ball() {
        let mut e = ready_engine();
        e.on_tick(Phase::Filling, 1.0);
        // Raw 0.5 eases well past 1.0 on the bounce curve.
        e.on_tick(Phase::Bouncing, 0.5);
        let geo = *e.geometry().unwrap();
        assert!(e.ball_y() > geo.center.y, "overshoot pushes the ball down");
        assert!(e.pour().top_y > geo.top, "stream source dips past the rim");
        e.on_tick(Phase::Bouncing, 1.0);
        assert!((e.ball_y() - geo.center.y).abs() < EPS, "ball settles back");
    }

    #[test]
    fn out_of_order_ticks_do_not_rewind() {
        let mut e = ready_engine();
        for i in 0..=20 {
            e.on_tick(Phase::Filling, i as f32 / 20.0);
        }
        e.on_tick(Phase::Bouncing, 0.5);
        let color = e.color();
        e.on_tick(Phase::Filling, 0.2);
        assert_eq!(e.color(), color, "a stale filling tick must not apply");
        assert_eq!(e.phase(), Some(Phase::Bouncing));
    }

    #[test]
    fn frame_serializes_for_external_renderers() {
        let mut e = ready_engine();
        e.on_tick(Phase::Filling, 0.3);
        let json = serde_json::to_value(e.frame().unwrap()).unwrap();
        assert!(json.get("color").is_some());
        assert!(json.get("draw").is_some());
        assert!(
            json["wave"].as_array().is_some_and(|a| !a.is_empty()),
            "wave polygon should be present mid-fill"
        );
    }
}
