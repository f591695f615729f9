//! Steering helpers (minimal set)
//!
//! These return velocities; the caller integrates them. Nothing here owns
//! state.

use super::geometry::{normalize_or_zero, Vec2};

/// Seek: move toward a target at the given speed.
pub fn seek(current: Vec2, target: Vec2, speed: f32) -> Vec2 {
    if speed <= 0.0 {
        return Vec2::zeros();
    }
    normalize_or_zero(target - current) * speed
}

/// Seek, but stop dead once within `arrive_radius` of the target.
pub fn seek_until(current: Vec2, target: Vec2, speed: f32, arrive_radius: f32) -> Vec2 {
    if (target - current).norm() <= arrive_radius {
        return Vec2::zeros();
    }
    seek(current, target, speed)
}

/// Advance a position toward `target` by at most `speed * dt`.
/// Returns the new position and whether the target was reached.
pub fn step_toward(current: Vec2, target: Vec2, speed: f32, dt_ms: f32) -> (Vec2, bool) {
    let to_target = target - current;
    let remaining = to_target.norm();
    let step = speed.max(0.0) * dt_ms / 1000.0;
    if remaining <= step {
        (target, true)
    } else {
        (current + to_target / remaining * step, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::geometry::vec2;

    #[test]
    fn test_seek_speed() {
        let v = seek(vec2(0.0, 0.0), vec2(10.0, 0.0), 50.0);
        assert_eq!(v, vec2(50.0, 0.0));
        assert_eq!(seek(vec2(0.0, 0.0), vec2(10.0, 0.0), 0.0), Vec2::zeros());
    }

    #[test]
    fn test_seek_until_stops_within_radius() {
        assert_eq!(seek_until(vec2(0.0, 0.0), vec2(0.5, 0.5), 50.0, 1.0), Vec2::zeros());
        assert!(seek_until(vec2(0.0, 0.0), vec2(5.0, 0.0), 50.0, 1.0).x > 0.0);
    }

    #[test]
    fn test_step_toward_snaps_on_arrival() {
        let (pos, arrived) = step_toward(vec2(0.0, 0.0), vec2(100.0, 0.0), 300.0, 100.0);
        assert!(!arrived);
        assert!((pos.x - 30.0).abs() < 1e-4);

        let (pos, arrived) = step_toward(vec2(95.0, 0.0), vec2(100.0, 0.0), 300.0, 100.0);
        assert!(arrived);
        assert_eq!(pos, vec2(100.0, 0.0));
    }
}
