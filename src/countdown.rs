use crate::domain::{format_countdown, Cycle};
use chrono::{DateTime, Local};

/// Result of sampling the wall clock against the active cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// No active cycle, nothing sampled
    Idle,
    Running { seconds_passed: i64 },
    /// The deadline was crossed on this sample
    Finished { total_seconds: i64 },
}

/// Whole seconds between `start` and `now`, floored, never negative
pub fn elapsed_seconds(start: DateTime<Local>, now: DateTime<Local>) -> i64 {
    now.signed_duration_since(start).num_seconds().max(0)
}

/// Derives seconds passed from the active cycle's start date.
///
/// Each sample re-reads the wall clock instead of counting ticks, so a
/// process that was suspended catches up on the next sample.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Countdown {
    seconds_passed: i64,
}

impl Countdown {
    /// Seed the counter for a (possibly restored) active cycle
    pub fn initial(active: Option<&Cycle>, now: DateTime<Local>) -> Self {
        let seconds_passed = active
            .map(|cycle| elapsed_seconds(cycle.start_date, now).min(cycle.total_seconds()))
            .unwrap_or(0);
        Self { seconds_passed }
    }

    pub fn seconds_passed(&self) -> i64 {
        self.seconds_passed
    }

    pub fn set_seconds_passed(&mut self, seconds: i64) {
        self.seconds_passed = seconds;
    }

    pub fn reset(&mut self) {
        self.seconds_passed = 0;
    }

    /// Sample the clock once
    pub fn sample(&mut self, active: Option<&Cycle>, now: DateTime<Local>) -> Tick {
        let Some(cycle) = active else {
            return Tick::Idle;
        };

        let total_seconds = cycle.total_seconds();
        let elapsed = elapsed_seconds(cycle.start_date, now);

        if elapsed >= total_seconds {
            self.seconds_passed = total_seconds;
            Tick::Finished { total_seconds }
        } else {
            self.seconds_passed = elapsed;
            Tick::Running {
                seconds_passed: elapsed,
            }
        }
    }

    /// Seconds left on the active cycle, 0 when there is none
    pub fn remaining_seconds(&self, active: Option<&Cycle>) -> i64 {
        match active {
            Some(cycle) => (cycle.total_seconds() - self.seconds_passed).max(0),
            None => 0,
        }
    }

    /// Zero-padded (minutes, seconds) for display
    pub fn display(&self, active: Option<&Cycle>) -> (String, String) {
        format_countdown(self.remaining_seconds(active))
    }
}
