//! Window specifications and threshold evaluation
//!
//! The evaluator is a pure function of the window spec, a key's history, and
//! `now`; it holds no state of its own and can be called any number of times
//! over the same history.

use crate::events::Timestamp;
use chrono::{DateTime, Duration};
use std::collections::VecDeque;

/// Threshold window for an alert rule
///
/// Both kinds count events and compare against a threshold; they differ only
/// in where the window starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSpec {
    /// Fixed-size, non-overlapping window anchored to wall-clock multiples
    /// of its size, measured from the Unix epoch. All rules with equal
    /// `size_secs` share window edges regardless of individual event timing,
    /// so a burst can split across two windows and never trigger even when
    /// a sliding view of the same burst would.
    Tumbling { count: usize, size_secs: u64 },
    /// Fixed-size window anchored to "now minus size", recomputed on every
    /// evaluation. This is the accurate rolling-rate view.
    Sliding { count: usize, size_secs: u64 },
}

impl WindowSpec {
    /// Event-count threshold
    pub fn count(&self) -> usize {
        match *self {
            WindowSpec::Tumbling { count, .. } | WindowSpec::Sliding { count, .. } => count,
        }
    }

    /// Window size in seconds
    pub fn size_secs(&self) -> u64 {
        match *self {
            WindowSpec::Tumbling { size_secs, .. } | WindowSpec::Sliding { size_secs, .. } => {
                size_secs
            }
        }
    }
}

/// Decide whether a window's threshold is met for a key's history
///
/// Counts entries with a timestamp strictly after the window start (an entry
/// exactly on a tumbling boundary belongs to the previous window) and
/// returns `count >= threshold`.
pub fn threshold_met(spec: &WindowSpec, history: &VecDeque<Timestamp>, now: Timestamp) -> bool {
    let window_start = match *spec {
        WindowSpec::Tumbling { size_secs, .. } => tumbling_window_start(now, size_secs),
        WindowSpec::Sliding { size_secs, .. } => now - Duration::seconds(size_secs as i64),
    };

    let in_window = history.iter().filter(|ts| **ts > window_start).count();
    in_window >= spec.count()
}

/// Start of the tumbling window containing `now`
///
/// Truncates `now` down to the most recent multiple of `size_secs` measured
/// from the Unix epoch, zeroing the sub-second part.
fn tumbling_window_start(now: Timestamp, size_secs: u64) -> Timestamp {
    if size_secs == 0 {
        return now;
    }
    let secs = now.timestamp();
    let aligned = secs - secs.rem_euclid(size_secs as i64);
    DateTime::from_timestamp(aligned, 0).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    /// `now` aligned half a second past an epoch multiple of `size_secs`,
    /// so the window boundary sits `offset_secs` behind it
    fn aligned_now(size_secs: u64, offset_secs: i64) -> Timestamp {
        let base = 1_700_000_000_i64;
        let aligned = base - base.rem_euclid(size_secs as i64);
        DateTime::from_timestamp(aligned + offset_secs, 500_000_000).unwrap()
    }

    #[test]
    fn test_tumbling_boundary_belongs_to_previous_window() {
        // Window of 10s starting at `start`; now is 3.5s into it.
        let now = aligned_now(10, 3);
        let start = tumbling_window_start(now, 10);

        let history = VecDeque::from(vec![start]);
        let spec = WindowSpec::Tumbling {
            count: 1,
            size_secs: 10,
        };
        assert!(!threshold_met(&spec, &history, now));

        let history = VecDeque::from(vec![start + Duration::seconds(1)]);
        assert!(threshold_met(&spec, &history, now));
    }

    #[test]
    fn test_tumbling_triggers_on_nth_event_in_window() {
        let now = aligned_now(10, 5);
        let spec = WindowSpec::Tumbling {
            count: 3,
            size_secs: 10,
        };

        let mut history = VecDeque::from(vec![
            now - Duration::seconds(3),
            now - Duration::seconds(2),
        ]);
        assert!(!threshold_met(&spec, &history, now));

        history.push_back(now - Duration::seconds(1));
        assert!(threshold_met(&spec, &history, now));
    }

    #[test]
    fn test_tumbling_burst_split_across_boundary_does_not_trigger() {
        // Two events 2s apart straddling a window edge: neither window sees
        // both, though a 10s sliding view of the same burst does.
        let now = aligned_now(10, 1);
        let boundary = tumbling_window_start(now, 10);
        let history = VecDeque::from(vec![
            boundary - Duration::seconds(1),
            boundary + Duration::seconds(1),
        ]);

        let tumbling = WindowSpec::Tumbling {
            count: 2,
            size_secs: 10,
        };
        let sliding = WindowSpec::Sliding {
            count: 2,
            size_secs: 10,
        };
        assert!(!threshold_met(&tumbling, &history, now));
        assert!(threshold_met(&sliding, &history, now));
    }

    #[test]
    fn test_sliding_counts_only_entries_after_cutoff() {
        let now = Utc::now();
        let spec = WindowSpec::Sliding {
            count: 2,
            size_secs: 5,
        };

        // One entry exactly on the cutoff (excluded), one inside.
        let history = VecDeque::from(vec![now - Duration::seconds(5), now - Duration::seconds(2)]);
        assert!(!threshold_met(&spec, &history, now));

        // Two inside.
        let history = VecDeque::from(vec![now - Duration::seconds(4), now - Duration::seconds(2)]);
        assert!(threshold_met(&spec, &history, now));
    }

    #[test]
    fn test_sliding_aged_out_entries_do_not_count() {
        let now = Utc::now();
        let spec = WindowSpec::Sliding {
            count: 3,
            size_secs: 5,
        };

        // Three events that would have triggered 6 seconds ago, plus one
        // fresh event: only the fresh one is inside the window now.
        let history = VecDeque::from(vec![
            now - Duration::seconds(8),
            now - Duration::seconds(7),
            now - Duration::seconds(6),
            now,
        ]);
        assert!(!threshold_met(&spec, &history, now));
    }

    #[test]
    fn test_empty_history_never_meets_positive_threshold() {
        let now = Utc::now();
        let history = VecDeque::new();

        for spec in [
            WindowSpec::Tumbling {
                count: 1,
                size_secs: 10,
            },
            WindowSpec::Sliding {
                count: 1,
                size_secs: 10,
            },
        ] {
            assert!(!threshold_met(&spec, &history, now));
        }
    }

    #[test]
    fn test_zero_size_window_counts_nothing_past() {
        let now = Utc::now();
        let history = VecDeque::from(vec![now - Duration::seconds(1), now]);
        let spec = WindowSpec::Tumbling {
            count: 1,
            size_secs: 0,
        };
        assert!(!threshold_met(&spec, &history, now));
    }

    #[test]
    fn test_window_spec_accessors() {
        let tumbling = WindowSpec::Tumbling {
            count: 2,
            size_secs: 10,
        };
        let sliding = WindowSpec::Sliding {
            count: 3,
            size_secs: 5,
        };

        assert_eq!(tumbling.count(), 2);
        assert_eq!(tumbling.size_secs(), 10);
        assert_eq!(sliding.count(), 3);
        assert_eq!(sliding.size_secs(), 5);
    }
}
