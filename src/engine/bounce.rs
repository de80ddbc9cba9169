//! Bounce displacement of the settled liquid
//!
//! Once the vessel is full the liquid acts as a single ball. The bounce
//! curve overshoots past 1.0 and only that excess moves anything: below
//! 1.0 the ball stays pinned at rest in the vessel center, and the
//! overshoot drops it proportionally before the curve brings it back.

use super::geometry::Geometry;

/// Vertical center of the liquid ball at `progress` through the bounce.
///
/// `progress` is the bounce phase's eased value and is the one input in
/// the engine expected to exceed 1.0.
pub fn ball_center_y(geo: &Geometry, progress: f32) -> f32 {
    let t = progress.max(0.0);
    if t < 1.0 {
        geo.center.y
    } else {
        geo.center.y + ((t - 1.0) * geo.radius).round()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ball_rests_until_the_overshoot() {
        let geo = Geometry::new(800.0, 800.0);
        for t in [-0.2, 0.0, 0.5, 0.999, 1.0] {
            assert_eq!(ball_center_y(&geo, t), geo.center.y);
        }
    }

    #[test]
    fn overshoot_displaces_by_whole_pixels() {
        let geo = Geometry::new(800.0, 800.0);
        assert_eq!(ball_center_y(&geo, 1.2), geo.center.y + 20.0);
        assert_eq!(ball_center_y(&geo, 1.004), geo.center.y, "sub-half-pixel rounds away");
    }
}
