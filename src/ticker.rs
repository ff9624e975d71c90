use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

/// Upper bound on how long the event loop blocks waiting for input
pub const UI_POLL_MS: u64 = 250;

/// Default countdown sampling cadence in milliseconds
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Get the event loop poll bound
pub fn ui_poll_duration() -> Duration {
    Duration::from_millis(UI_POLL_MS)
}

#[derive(Debug, Clone, Copy)]
struct Schedule {
    cycle_id: Uuid,
    next_due: Instant,
}

/// The one periodic timer driving the active cycle's countdown.
///
/// Arming for a new cycle replaces the old schedule, and dropping the
/// handle cancels whatever is scheduled.
#[derive(Debug)]
pub struct CycleTimer {
    period: Duration,
    schedule: Option<Schedule>,
}

impl CycleTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            schedule: None,
        }
    }

    /// Start firing every period for `cycle_id`, first firing one period from `now`
    pub fn arm(&mut self, cycle_id: Uuid, now: Instant) {
        if let Some(previous) = self.schedule {
            if previous.cycle_id != cycle_id {
                debug!(cycle = %previous.cycle_id, "replacing countdown timer");
            }
        }
        self.schedule = Some(Schedule {
            cycle_id,
            next_due: now + self.period,
        });
        debug!(cycle = %cycle_id, period_ms = self.period.as_millis() as u64, "countdown timer armed");
    }

    /// Cancel the schedule, returning the cycle it was bound to
    pub fn disarm(&mut self) -> Option<Uuid> {
        let schedule = self.schedule.take()?;
        debug!(cycle = %schedule.cycle_id, "countdown timer cancelled");
        Some(schedule.cycle_id)
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.schedule.is_some()
    }

    #[cfg(test)]
    pub fn armed_for(&self) -> Option<Uuid> {
        self.schedule.map(|s| s.cycle_id)
    }

    /// True when a firing is due; the next firing is re-synced from `now`
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.schedule.as_mut() {
            Some(schedule) if now >= schedule.next_due => {
                schedule.next_due = now + self.period;
                true
            }
            _ => false,
        }
    }

    /// Time left before the next firing, None when disarmed
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.schedule
            .map(|s| s.next_due.saturating_duration_since(now))
    }
}

impl Default for CycleTimer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_TICK_MS))
    }
}

impl Drop for CycleTimer {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_poll_duration() {
        assert_eq!(ui_poll_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_disarmed_timer_never_fires() {
        let mut timer = CycleTimer::default();
        let now = Instant::now();
        assert!(!timer.poll(now + Duration::from_secs(10)));
        assert_eq!(timer.time_until_due(now), None);
    }

    #[test]
    fn test_fires_once_per_period() {
        let mut timer = CycleTimer::new(Duration::from_secs(1));
        let id = Uuid::new_v4();
        let start = Instant::now();
        timer.arm(id, start);

        assert!(!timer.poll(start + Duration::from_millis(500)));
        assert!(timer.poll(start + Duration::from_secs(1)));
        assert!(!timer.poll(start + Duration::from_millis(1500)));
        assert!(timer.poll(start + Duration::from_secs(2)));
    }

    #[test]
    fn test_resyncs_after_long_gap() {
        let mut timer = CycleTimer::new(Duration::from_secs(1));
        let start = Instant::now();
        timer.arm(Uuid::new_v4(), start);

        let late = start + Duration::from_secs(30);
        assert!(timer.poll(late));
        // Missed periods are not replayed
        assert!(!timer.poll(late + Duration::from_millis(10)));
        assert_eq!(
            timer.time_until_due(late),
            Some(Duration::from_secs(1))
        );
    }

    #[test]
    fn test_arm_replaces_previous_schedule() {
        let mut timer = CycleTimer::default();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let now = Instant::now();

        timer.arm(first, now);
        timer.arm(second, now);
        assert_eq!(timer.armed_for(), Some(second));
    }

    #[test]
    fn test_disarm() {
        let mut timer = CycleTimer::default();
        let id = Uuid::new_v4();
        let now = Instant::now();
        timer.arm(id, now);

        assert_eq!(timer.disarm(), Some(id));
        assert!(!timer.is_armed());
        assert_eq!(timer.disarm(), None);
        assert!(!timer.poll(now + Duration::from_secs(5)));
    }
}
