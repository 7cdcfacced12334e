//! L4 Atomic Layer: Time calculation utilities for panel animations

use std::time::Duration;

/// Calculate animation progress (0.0 to 1.0)
///
/// # Arguments
/// * `start` - Animation start on the session clock
/// * `now` - Current time on the session clock
/// * `duration` - Total animation duration
///
/// # Returns
/// Progress value clamped to [0.0, 1.0]
#[inline]
pub fn progress(start: Duration, now: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_sub(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if animation is complete
#[inline]
pub fn is_complete(start: Duration, now: Duration, duration: Duration) -> bool {
    now.saturating_sub(start) >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Convert a duration in (possibly fractional) seconds from config into a `Duration`
///
/// Returns `None` for negative, NaN or infinite input.
pub fn secs_to_duration(secs: f64) -> Option<Duration> {
    if secs.is_finite() && secs >= 0.0 {
        Duration::try_from_secs_f64(secs).ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(24.0, 0.0, 1.0) - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_progress() {
        let start = Duration::from_millis(100);
        let duration = Duration::from_millis(1000);
        assert_eq!(progress(start, Duration::from_millis(50), duration), 0.0);
        assert!((progress(start, Duration::from_millis(600), duration) - 0.5).abs() < 1e-9);
        assert_eq!(progress(start, Duration::from_secs(5), duration), 1.0);
    }

    #[test]
    fn test_progress_zero_duration() {
        assert!((progress(Duration::ZERO, Duration::ZERO, Duration::ZERO) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_is_complete() {
        let start = Duration::from_secs(1);
        let duration = Duration::from_secs(1);
        assert!(!is_complete(start, Duration::from_millis(1999), duration));
        assert!(is_complete(start, Duration::from_secs(2), duration));
    }

    #[test]
    fn test_secs_to_duration() {
        assert_eq!(secs_to_duration(1.5), Some(Duration::from_millis(1500)));
        assert_eq!(secs_to_duration(0.0), Some(Duration::ZERO));
        assert_eq!(secs_to_duration(-1.0), None);
        assert_eq!(secs_to_duration(f64::NAN), None);
        assert_eq!(secs_to_duration(f64::INFINITY), None);
    }
}
