use std::time::Duration;

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Period of a signal running at `hz`, truncated to whole nanoseconds.
///
/// Non-positive or non-finite frequencies have no meaningful period and map
/// to [`Duration::ZERO`], which cyclic-device schedulers read as "not
/// periodic".
pub fn period_from_hz(hz: f64) -> Duration {
    if !hz.is_finite() || hz <= 0.0 {
        return Duration::ZERO;
    }

    let nanos = NANOS_PER_SEC / hz;
    if nanos >= u64::MAX as f64 {
        return Duration::ZERO;
    }

    Duration::from_nanos(nanos as u64)
}
