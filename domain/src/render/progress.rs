//! Progress curve for the pre-first-token wait

use std::time::Duration;

/// Linear progress toward a ceiling, used while no content has arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressCurve {
    pub estimate: Duration,
    pub ceiling: f64,
    pub tick: Duration,
    pub grace: Duration,
}

impl Default for ProgressCurve {
    fn default() -> Self {
        Self {
            estimate: Duration::from_secs(35),
            ceiling: 95.0,
            tick: Duration::from_millis(100),
            grace: Duration::from_millis(500),
        }
    }
}

impl ProgressCurve {
    pub fn with_estimate(mut self, estimate: Duration) -> Self {
        self.estimate = estimate;
        self
    }

    /// Percent shown after `elapsed`, never above the ceiling.
    pub fn percent(&self, elapsed: Duration) -> f64 {
        percent(elapsed, self.estimate).min(self.ceiling)
    }
}

/// Share of `estimate` covered by `elapsed`, as a percentage capped at 100.
pub fn percent(elapsed: Duration, estimate: Duration) -> f64 {
    if estimate.is_zero() {
        return 100.0;
    }
    (elapsed.as_secs_f64() / estimate.as_secs_f64() * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_is_linear() {
        let estimate = Duration::from_secs(10);
        assert_eq!(percent(Duration::ZERO, estimate), 0.0);
        assert!((percent(Duration::from_secs(5), estimate) - 50.0).abs() < 1e-9);
        assert_eq!(percent(Duration::from_secs(30), estimate), 100.0);
    }

    #[test]
    fn test_curve_stops_at_ceiling() {
        let curve = ProgressCurve::default();
        assert_eq!(curve.percent(Duration::from_secs(34)), 95.0);
        assert_eq!(curve.percent(Duration::from_secs(600)), 95.0);
        assert!(curve.percent(Duration::from_secs(7)) < 21.0);
    }

    #[test]
    fn test_zero_estimate_saturates() {
        let curve = ProgressCurve::default().with_estimate(Duration::ZERO);
        assert_eq!(curve.percent(Duration::ZERO), 95.0);
    }
}
