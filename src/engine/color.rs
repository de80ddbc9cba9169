//! Fill color interpolation
//!
//! The liquid runs from red through yellow to green over the pour. Green
//! ramps up across the first 90% of the fill, red drops away over the
//! final 10%, and both sit on a constant blue undertone. Full red and
//! full green coincide only at the [`FINISH_POUR`] instant.

use serde::Serialize;

use super::{FINISH_POUR, TOUCH_BASE};

/// Constant blue channel of the liquid.
const LIQUID_BLUE: u8 = 24;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blend toward `other` by `t` in `[0, 1]`.
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        Rgb {
            r: lerp(self.r as f32, other.r as f32, t).round() as u8,
            g: lerp(self.g as f32, other.g as f32, t).round() as u8,
            b: lerp(self.b as f32, other.b as f32, t).round() as u8,
        }
    }
}

/// Liquid color at `progress` through the fill.
pub fn fill_color(progress: f32) -> Rgb {
    let t = progress.clamp(0.0, 1.0);
    let red = if t <= FINISH_POUR {
        255.0
    } else {
        255.0 * (1.0 - (t - FINISH_POUR) / TOUCH_BASE)
    };
    let green = if t >= FINISH_POUR {
        255.0
    } else {
        255.0 * t / FINISH_POUR
    };
    Rgb {
        r: red.round().clamp(0.0, 255.0) as u8,
        g: green.round().clamp(0.0, 255.0) as u8,
        b: LIQUID_BLUE,
    }
}

/// Linear interpolation
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_red_at_start_and_green_at_end() {
        assert_eq!(fill_color(0.0), Rgb::new(255, 0, 24));
        assert_eq!(fill_color(1.0), Rgb::new(0, 255, 24));
    }

    #[test]
    fn channels_meet_only_at_the_pour_finish() {
        assert_eq!(fill_color(FINISH_POUR), Rgb::new(255, 255, 24));
        let before = fill_color(0.89);
        assert_eq!(before.r, 255);
        assert!(before.g < 255, "green still ramping just before the finish");
        let after = fill_color(0.91);
        assert_eq!(after.g, 255);
        assert!(after.r < 255, "red already fading just after the finish");
    }

    #[test]
    fn green_ramps_linearly_during_the_pour() {
        assert_eq!(fill_color(0.45).g, 128);
        assert_eq!(fill_color(0.5).g, 142);
        let mut last = 0;
        for i in 0..=90 {
            let g = fill_color(i as f32 / 100.0).g;
            assert!(g >= last, "green never steps backwards");
            last = g;
        }
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(fill_color(-0.5), fill_color(0.0));
        assert_eq!(fill_color(1.5), fill_color(1.0));
    }

    #[test]
    fn mix_blends_midway() {
        let black = Rgb::new(0, 0, 0);
        let white = Rgb::new(255, 255, 255);
        assert_eq!(black.mix(white, 0.0), black);
        assert_eq!(black.mix(white, 1.0), white);
        assert_eq!(black.mix(white, 0.5), Rgb::new(128, 128, 128));
    }
}
