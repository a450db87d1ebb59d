use std::collections::VecDeque;

use crate::sequencing::{MAX_BPM, MIN_BPM};

/// Taps kept in history
pub const MAX_TAPS: usize = 6;
/// Taps needed before an estimate is made
pub const MIN_TAPS: usize = 4;

/// Tempo estimation from tap timestamps
///
/// The estimate is the median inter-tap interval. With more than four
/// intervals the shortest and longest are dropped first, so one stray tap
/// does not move the result.
#[derive(Debug, Default, Clone)]
pub struct TapTempo {
    taps: VecDeque<f64>,
}

impl TapTempo {
    /// Record a tap (milliseconds) and return the estimated bpm, if any.
    pub fn tap(&mut self, timestamp_ms: f64) -> Option<u16> {
        if !timestamp_ms.is_finite() {
            return None;
        }
        self.taps.push_back(timestamp_ms);
        while self.taps.len() > MAX_TAPS {
            self.taps.pop_front();
        }

        if self.taps.len() < MIN_TAPS {
            return None;
        }
        self.estimate()
    }

    fn estimate(&self) -> Option<u16> {
        let mut intervals: Vec<f64> = self
            .taps
            .iter()
            .zip(self.taps.iter().skip(1))
            .map(|(a, b)| b - a)
            .collect();
        intervals.sort_by(f64::total_cmp);

        if intervals.len() > 4 {
            intervals.pop();
            intervals.remove(0);
        }

        let mid = intervals.len() / 2;
        let median = if intervals.len() % 2 == 0 {
            (intervals[mid - 1] + intervals[mid]) / 2.0
        } else {
            intervals[mid]
        };

        if median <= 0.0 {
            return None;
        }

        let bpm = (60_000.0 / median).round();
        Some(bpm.clamp(MIN_BPM as f64, MAX_BPM as f64) as u16)
    }

    pub fn clear(&mut self) {
        self.taps.clear();
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }
}
