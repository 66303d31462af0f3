//! L4 Atomic Layer: Cycle duration and interpolation
//!
//! Pure functions: converting velocity and geometry into a cycle length,
//! and mapping normalized progress onto an offset.

use std::time::Duration;

use crate::error::{Error, Result};

/// Length of one full cycle: `(text_width + blank_space) / velocity`
///
/// Rounded to whole microseconds so fast scrolls do not judder.
///
/// # Errors
/// Rejects a non-positive or non-finite velocity, and negative or
/// non-finite lengths. These are configuration errors.
pub fn cycle_duration(velocity: f64, text_width: f64, blank_space: f64) -> Result<Duration> {
    if !velocity.is_finite() || velocity <= 0.0 {
        return Err(Error::InvalidVelocity(velocity));
    }
    for (name, value) in [("text width", text_width), ("blank space", blank_space)] {
        if !value.is_finite() {
            return Err(Error::NonFinite(name));
        }
        if value < 0.0 {
            return Err(Error::NegativeLength(name));
        }
    }

    let micros = ((text_width + blank_space) / velocity * 1_000_000.0).round();
    if !micros.is_finite() || micros > u64::MAX as f64 {
        return Err(Error::NonFinite("cycle duration"));
    }
    Ok(Duration::from_micros(micros as u64))
}

/// Fraction of `duration` covered by `elapsed`, unclamped
///
/// A zero duration covers any elapsed time in full.
#[inline]
pub fn fraction_of(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    elapsed.as_secs_f64() / duration.as_secs_f64()
}

/// Linear interpolation between two values
///
/// # Arguments
/// * `from` - Start value
/// * `to` - End value
/// * `t` - Interpolation factor [0.0, 1.0]
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_duration_example() {
        let duration = cycle_duration(100.0, 400.0, 100.0).unwrap();
        assert_eq!(duration, Duration::from_secs(5));
    }

    #[test]
    fn test_cycle_duration_microsecond_precision() {
        let duration = cycle_duration(3.0, 1.0, 0.0).unwrap();
        assert_eq!(duration, Duration::from_micros(333_333));
    }

    #[test]
    fn test_cycle_duration_zero_length() {
        assert_eq!(cycle_duration(10.0, 0.0, 0.0).unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_cycle_duration_rejects_bad_input() {
        assert!(matches!(
            cycle_duration(0.0, 10.0, 1.0),
            Err(Error::InvalidVelocity(_))
        ));
        assert!(matches!(
            cycle_duration(-1.0, 10.0, 1.0),
            Err(Error::InvalidVelocity(_))
        ));
        assert!(matches!(
            cycle_duration(f64::NAN, 10.0, 1.0),
            Err(Error::InvalidVelocity(_))
        ));
        assert!(matches!(
            cycle_duration(1.0, f64::INFINITY, 1.0),
            Err(Error::NonFinite("text width"))
        ));
        assert!(matches!(
            cycle_duration(1.0, 10.0, -1.0),
            Err(Error::NegativeLength("blank space"))
        ));
    }

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(100.0, 0.0, 0.25) - 75.0).abs() < 0.001);
    }

    #[test]
    fn test_fraction_of_zero_duration() {
        assert_eq!(fraction_of(Duration::from_millis(5), Duration::ZERO), 1.0);
        assert_eq!(fraction_of(Duration::ZERO, Duration::ZERO), 1.0);
        assert!((fraction_of(Duration::from_millis(250), Duration::from_secs(1)) - 0.25).abs() < 1e-9);
    }
}
