//! Time-bounded interpolation.
//!
//! A [`Tween`] only describes an animation; it never schedules itself.
//! Owners keep tweens in a collection keyed by the animated target and sample
//! them from a single per-frame driver, so replacing an entry is the only
//! cancellation needed.

use glam::Vec3;

/// Easing curve applied to linear progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    #[default]
    EaseInOutCubic,
    EaseOutQuad,
}

impl Easing {
    /// Map linear progress `t` in 0..=1 to eased progress
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOutCubic => ease_in_out_cubic(t),
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) * 0.5
    }
}

/// Values that can be linearly interpolated
pub trait Lerp: Copy {
    fn lerp_to(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp_to(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Vec3 {
    fn lerp_to(self, to: Self, t: f32) -> Self {
        self.lerp(to, t)
    }
}

/// Interpolation from `from` to `to` starting at `started_at` (seconds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T: Lerp> {
    pub from: T,
    pub to: T,
    pub duration: f64,
    pub started_at: f64,
    pub easing: Easing,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, duration: f64, started_at: f64) -> Self {
        Self {
            from,
            to,
            duration,
            started_at,
            easing: Easing::default(),
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Linear progress in 0..=1. Zero or negative durations complete immediately.
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration).clamp(0.0, 1.0) as f32
    }

    pub fn sample(&self, now: f64) -> T {
        let p = self.progress(now);
        if p >= 1.0 {
            return self.to;
        }
        self.from.lerp_to(self.to, self.easing.apply(p))
    }

    pub fn is_finished(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseInOutCubic, Easing::EaseOutQuad] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_ease_in_out_cubic_is_symmetric() {
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
        let a = ease_in_out_cubic(0.25);
        let b = ease_in_out_cubic(0.75);
        assert!((a + b - 1.0).abs() < 1e-6);
        assert!(a < 0.25);
    }

    #[test]
    fn test_sample_clamps_outside_range() {
        let t = Tween::new(1.0_f32, 2.0, 0.2, 10.0).with_easing(Easing::Linear);
        assert_eq!(t.sample(9.0), 1.0);
        assert!((t.sample(10.1) - 1.5).abs() < 1e-5);
        assert_eq!(t.sample(11.0), 2.0);
        assert!(!t.is_finished(10.19));
        assert!(t.is_finished(10.2));
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let t = Tween::new(Vec3::ZERO, Vec3::ONE, 0.0, 0.0);
        assert!(t.is_finished(0.0));
        assert_eq!(t.sample(0.0), Vec3::ONE);
    }
}
