//! Time-range filtering

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::telemetry::Reading;

/// Time window for chart filtering: everything, a relative span measured
/// backward from now, or an absolute start/end range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeWindow {
    /// The full sequence, unfiltered.
    All,
    /// The trailing N hours ending at the current instant. The dashboard
    /// presets are 1, 6, and 24.
    LastHours(u32),
    /// An absolute range, both bounds inclusive.
    Between {
        /// Range start.
        start: DateTime<Utc>,
        /// Range end.
        end: DateTime<Utc>,
    },
}

/// Filters `readings` to the window measured against the current wall clock.
/// See [`filter_by_window_at`] for the semantics.
pub fn filter_by_window(readings: &[Reading], window: TimeWindow) -> Vec<Reading> {
    filter_by_window_at(readings, window, Utc::now())
}

/// Returns the ordered subsequence of `readings` whose timestamps fall
/// within the window, evaluated as of `now`. Bounds are inclusive.
///
/// If the window matches nothing, the full input sequence comes back
/// instead: charts must never go blank just because the operator picked a
/// quiet hour. Pure, never errors.
pub fn filter_by_window_at(
    readings: &[Reading],
    window: TimeWindow,
    now: DateTime<Utc>,
) -> Vec<Reading> {
    let (start, end) = match window {
        TimeWindow::All => return readings.to_vec(),
        TimeWindow::LastHours(hours) => (now - Duration::hours(hours as i64), now),
        TimeWindow::Between { start, end } => (start, end),
    };

    let filtered: Vec<Reading> = readings
        .iter()
        .filter(|r| r.timestamp >= start && r.timestamp <= end)
        .cloned()
        .collect();

    if filtered.is_empty() {
        readings.to_vec()
    } else {
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reading_at(now: DateTime<Utc>, mins_ago: i64) -> Reading {
        Reading::new(now - Duration::minutes(mins_ago))
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 21, 23, 30, 0).unwrap()
    }

    #[test]
    fn test_all_returns_everything() {
        let now = now();
        let readings = vec![reading_at(now, 600), reading_at(now, 30), reading_at(now, 0)];
        let filtered = filter_by_window_at(&readings, TimeWindow::All, now);
        assert_eq!(filtered, readings);
    }

    #[test]
    fn test_relative_window_keeps_recent_readings() {
        let now = now();
        let readings = vec![
            reading_at(now, 300),
            reading_at(now, 90),
            reading_at(now, 45),
            reading_at(now, 10),
        ];
        let filtered = filter_by_window_at(&readings, TimeWindow::LastHours(1), now);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].timestamp, now - Duration::minutes(45));
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let now = now();
        let readings = vec![reading_at(now, 600), reading_at(now, 60)];
        let filtered = filter_by_window_at(&readings, TimeWindow::LastHours(1), now);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].timestamp, now - Duration::minutes(60));
    }

    #[test]
    fn test_empty_window_falls_back_to_full_sequence() {
        let now = now();
        let readings = vec![reading_at(now, 600), reading_at(now, 480)];
        let filtered = filter_by_window_at(&readings, TimeWindow::LastHours(1), now);
        assert_eq!(filtered, readings);
    }

    #[test]
    fn test_between_window_is_inclusive_with_fallback() {
        let now = now();
        let readings = vec![reading_at(now, 120), reading_at(now, 60), reading_at(now, 0)];

        let window = TimeWindow::Between {
            start: now - Duration::minutes(120),
            end: now - Duration::minutes(60),
        };
        let filtered = filter_by_window_at(&readings, window, now);
        assert_eq!(filtered.len(), 2);

        let empty_window = TimeWindow::Between {
            start: now - Duration::minutes(50),
            end: now - Duration::minutes(40),
        };
        let fallback = filter_by_window_at(&readings, empty_window, now);
        assert_eq!(fallback, readings);
    }
}
