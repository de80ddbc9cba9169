//! Wave surface of the filling liquid
//!
//! A sine curve scrolls sideways across the vessel while the still-water
//! baseline climbs with fill progress. The scroll angle accumulates
//! across ticks; resetting it every tick would freeze the wave in place.
//! Both the scroll speed and the amplitude taper off at the end of the
//! pour so the surface comes to rest.

use super::geometry::{Geometry, Point};
use super::{FINISH_POUR, TOUCH_BASE};

/// Scroll angle advance per tick, in degrees, before the end-of-pour taper.
const FAI_FACTOR: f32 = 5.0;
/// Wave amplitude while pouring at full strength.
const AMPLITUDE: f32 = 50.0;
/// Angle step per horizontal sample pixel, in degrees.
const ANGLE_VELOCITY: f32 = 0.5;

/// Wave state carried across ticks of the filling phase.
#[derive(Debug, Clone, Default)]
pub struct WaveSurface {
    /// Scroll angle in degrees, kept within `[0, 360)`.
    fai: f32,
    /// Current wave amplitude.
    pub amplitude: f32,
    /// Still-water baseline the sine rides on.
    pub liquid_level: f32,
    /// Closed polygon: one sample per pixel across the vessel, then two
    /// points closing the shape along the vessel bottom.
    points: Vec<Point>,
}

impl WaveSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart the scroll for a fresh run.
    pub fn reset(&mut self) {
        self.fai = 0.0;
        self.amplitude = 0.0;
        self.liquid_level = 0.0;
        self.points.clear();
    }

    /// Current scroll angle in degrees.
    pub fn fai(&self) -> f32 {
        self.fai
    }

    /// The closed surface polygon from the last advance.
    pub fn surface(&self) -> &[Point] {
        &self.points
    }

    /// Recompute the surface for one tick of fill progress.
    pub fn advance(&mut self, geo: &Geometry, progress: f32) {
        let t = progress.clamp(0.0, 1.0);

        self.liquid_level = if t < TOUCH_BASE {
            geo.bottom
        } else {
            geo.bottom - geo.diameter() * (t - TOUCH_BASE) / FINISH_POUR
        };

        // No scroll until the stream touches down; slower as the pour ends.
        if t >= TOUCH_BASE {
            self.fai = (self.fai + FAI_FACTOR * (1.4 - t)).rem_euclid(360.0);
        }

        self.amplitude = if t <= FINISH_POUR {
            AMPLITUDE
        } else {
            AMPLITUDE * (1.4 - t)
        };

        self.points.clear();
        let span = geo.diameter().max(0.0) as usize;
        for i in 0..span {
            let x = geo.left + i as f32;
            let angle = (i as f32 * ANGLE_VELOCITY + self.fai).to_radians();
            self.points.push(Point::new(x, self.amplitude * angle.sin() + self.liquid_level));
        }
        self.points.push(Point::new(geo.right(), geo.bottom));
        self.points.push(Point::new(geo.left, geo.bottom));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn geo() -> Geometry {
        Geometry::new(800.0, 800.0)
    }

    #[test]
    fn baseline_waits_for_touchdown_then_climbs_to_the_top() {
        let geo = geo();
        let mut wave = WaveSurface::new();

        wave.advance(&geo, 0.05);
        assert!((wave.liquid_level - geo.bottom).abs() < EPS, "still at the bottom");
        wave.advance(&geo, TOUCH_BASE);
        assert!((wave.liquid_level - geo.bottom).abs() < EPS);

        let mut last = geo.bottom;
        for i in 0..=50 {
            wave.advance(&geo, i as f32 / 50.0);
            assert!(wave.liquid_level <= last + EPS, "the level never sinks");
            last = wave.liquid_level;
        }

        wave.advance(&geo, 1.0);
        assert!((wave.liquid_level - geo.top).abs() < EPS, "full at the very end");
    }

    #[test]
    fn scroll_angle_accumulates_across_ticks() {
        let geo = geo();
        let mut wave = WaveSurface::new();
        wave.advance(&geo, 0.5);
        let first = wave.fai();
        assert!((first - 4.5).abs() < EPS);
        wave.advance(&geo, 0.5);
        assert!((wave.fai() - 2.0 * first).abs() < EPS, "the scroll keeps moving");
    }

    #[test]
    fn scroll_angle_holds_before_touchdown() {
        let geo = geo();
        let mut wave = WaveSurface::new();
        wave.advance(&geo, 0.05);
        assert_eq!(wave.fai(), 0.0, "no scroll while the stream is falling");
    }

    #[test]
    fn scroll_angle_wraps_into_a_full_turn() {
        let geo = geo();
        let mut wave = WaveSurface::new();
        wave.fai = 359.5;
        wave.advance(&geo, 0.5);
        assert!((wave.fai() - 4.0).abs() < EPS, "wraps past 360 to the remainder");
        for _ in 0..500 {
            wave.advance(&geo, 0.5);
            assert!(wave.fai() >= 0.0 && wave.fai() < 360.0);
        }
    }

    #[test]
    fn amplitude_tapers_after_the_pour_finishes() {
        let geo = geo();
        let mut wave = WaveSurface::new();
        wave.advance(&geo, 0.5);
        assert!((wave.amplitude - AMPLITUDE).abs() < EPS);
        wave.advance(&geo, FINISH_POUR);
        assert!((wave.amplitude - AMPLITUDE).abs() < EPS);
        wave.advance(&geo, 0.95);
        assert!((wave.amplitude - 22.5).abs() < 0.1);
        wave.advance(&geo, 1.0);
        assert!((wave.amplitude - 20.0).abs() < 0.1, "still wavering a little at the end");
    }

    #[test]
    fn polygon_spans_the_vessel_and_closes_along_the_bottom() {
        let geo = geo();
        let mut wave = WaveSurface::new();
        wave.advance(&geo, 0.5);
        let pts = wave.surface();
        assert_eq!(pts.len(), geo.diameter() as usize + 2);
        assert!((pts[0].x - geo.left).abs() < EPS);

        let close_a = pts[pts.len() - 2];
        let close_b = pts[pts.len() - 1];
        assert!((close_a.x - geo.right()).abs() < EPS && (close_a.y - geo.bottom).abs() < EPS);
        assert!((close_b.x - geo.left).abs() < EPS && (close_b.y - geo.bottom).abs() < EPS);

        for p in &pts[..pts.len() - 2] {
            assert!((p.y - wave.liquid_level).abs() <= wave.amplitude + EPS);
        }
    }
}
