//! Small math helpers shared by every simulation component
//!
//! Vector arithmetic itself comes from `glam::Vec2` (`+`, `-`, `*`, `length`,
//! `distance`, `dot`, `normalize_or_zero`). This module adds the scalar and
//! random helpers the game needs on top.

use glam::Vec2;
use rand::Rng;

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp `value` into `[min, max]` (never panics, `min` wins if the range is inverted)
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

/// Uniform float in `[min, max)`
#[inline]
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

/// Uniform integer in `[min, max]`
#[inline]
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    // rand() < 1, so the floor never reaches max - min + 1
    (rng.random::<f32>() * (max - min + 1) as f32).floor() as i32 + min
}

/// Vector of the given length pointing along `angle`
#[inline]
pub fn polar(angle: f32, magnitude: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin()) * magnitude
}

/// Unit vector perpendicular to the direction `angle`
#[inline]
pub fn perpendicular(angle: f32) -> Vec2 {
    Vec2::new(-angle.sin(), angle.cos())
}

/// Unit vector from `from` to `to`, or zero when the points coincide
#[inline]
pub fn direction(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(direction(Vec2::new(3.0, 4.0), Vec2::new(3.0, 4.0)), Vec2::ZERO);
        assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
    }

    #[test]
    fn test_perpendicular_is_orthogonal() {
        for i in 0..16 {
            let angle = i as f32 * 0.4;
            let dir = polar(angle, 1.0);
            assert!(dir.dot(perpendicular(angle)).abs() < 1e-5);
        }
    }

    proptest! {
        #[test]
        fn random_int_stays_inclusive(seed in any::<u64>(), min in -50i32..50, span in 0i32..20) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let max = min + span;
            for _ in 0..32 {
                let v = random_int(&mut rng, min, max);
                prop_assert!(v >= min && v <= max);
            }
        }

        #[test]
        fn random_range_stays_in_bounds(seed in any::<u64>(), min in -1000.0f32..1000.0, span in 0.0f32..500.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let v = random_range(&mut rng, min, min + span);
            prop_assert!(v >= min && v <= min + span);
        }

        #[test]
        fn direction_is_unit_or_zero(x1 in -500.0f32..500.0, y1 in -500.0f32..500.0, x2 in -500.0f32..500.0, y2 in -500.0f32..500.0) {
            let d = direction(Vec2::new(x1, y1), Vec2::new(x2, y2));
            let len = d.length();
            prop_assert!(len == 0.0 || (len - 1.0).abs() < 1e-4);
        }
    }
}
