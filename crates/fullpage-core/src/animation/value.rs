//! L3 Molecular Layer: Animated scalar property
//!
//! Behaves like a CSS-transitioned property: assigning a new target while a
//! motion is configured starts a transition from the value currently on
//! screen; assigning without a motion jumps straight to the target.

use std::time::Duration;

use crate::config::EasingType;

use super::timing::{is_complete, lerp, progress};

/// How a property moves toward a newly assigned target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Motion {
    pub duration: Duration,
    pub easing: EasingType,
}

impl Motion {
    pub fn new(duration: Duration, easing: EasingType) -> Self {
        Self { duration, easing }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedValue {
    from: f64,
    to: f64,
    start: Duration,
    duration: Duration,
    easing: EasingType,
}

impl AnimatedValue {
    /// A value at rest
    pub fn resting(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            start: Duration::ZERO,
            duration: Duration::ZERO,
            easing: EasingType::Linear,
        }
    }

    /// Final value once any running motion completes
    #[inline]
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Value on screen at `now`
    pub fn sample(&self, now: Duration) -> f64 {
        if is_complete(self.start, now, self.duration) {
            return self.to;
        }
        let t = self.easing.apply(progress(self.start, now, self.duration));
        lerp(self.from, self.to, t)
    }

    /// Whether a motion is still running at `now`
    #[inline]
    pub fn is_moving(&self, now: Duration) -> bool {
        self.from != self.to && !is_complete(self.start, now, self.duration)
    }

    /// Assign a new target
    ///
    /// With a non-zero motion the value travels from its current on-screen
    /// position; otherwise it lands on the target immediately.
    pub fn set(&mut self, target: f64, now: Duration, motion: Option<Motion>) {
        match motion {
            Some(motion) if !motion.duration.is_zero() => {
                let current = self.sample(now);
                *self = Self {
                    from: current,
                    to: target,
                    start: now,
                    duration: motion.duration,
                    easing: motion.easing,
                };
            }
            _ => *self = Self::resting(target),
        }
    }

    /// Cancel any running motion, landing on the target
    pub fn settle(&mut self) {
        *self = Self::resting(self.to);
    }
}
