use crate::countdown::{Countdown, Tick};
use crate::domain::{countdown_label, Cycle, CycleStatus};
use crate::form::CreateCycleData;
use crate::persistence::PersistenceMirror;
use crate::reducer::{
    add_new_cycle_action, cycles_reducer, mark_current_cycle_as_finished_action,
    stop_current_cycle_action, Action, CyclesState,
};
use crate::ticker::CycleTimer;
use chrono::{DateTime, Local};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

/// Application state handed to the input and render layers.
///
/// All writes to the cycle history go through `dispatch`, which runs the
/// reducer and mirrors the new state to persistence. The store may also be
/// written by another process (the CLI next to an open TUI), so the stored
/// state is re-read before every dispatch and on every tick.
pub struct CyclesContext {
    state: CyclesState,
    countdown: Countdown,
    timer: CycleTimer,
    mirror: PersistenceMirror,
}

impl CyclesContext {
    /// Restore state from the mirror's store and resume the countdown.
    /// A restored cycle already past its deadline is finished here, before
    /// anything is rendered.
    pub fn new(mut mirror: PersistenceMirror, tick_period: Duration, now: DateTime<Local>) -> Self {
        let state = mirror.load_initial();
        let countdown = Countdown::initial(state.active_cycle(), now);

        let mut context = Self {
            state,
            countdown,
            timer: CycleTimer::new(tick_period),
            mirror,
        };

        if let Some(id) = context.active_cycle_id_if_present() {
            context.timer.arm(id, Instant::now());
        }
        context.sample(now);
        context
    }

    pub fn cycles(&self) -> &[Cycle] {
        &self.state.cycles
    }

    #[cfg(test)]
    pub fn state(&self) -> &CyclesState {
        &self.state
    }

    pub fn active_cycle(&self) -> Option<&Cycle> {
        self.state.active_cycle()
    }

    /// Raw pointer value, which may be stale
    #[cfg(test)]
    pub fn active_cycle_id(&self) -> Option<Uuid> {
        self.state.active_cycle_id
    }

    pub fn amount_seconds_passed(&self) -> i64 {
        self.countdown.seconds_passed()
    }

    pub fn remaining_seconds(&self) -> i64 {
        self.countdown.remaining_seconds(self.active_cycle())
    }

    pub fn countdown_display(&self) -> (String, String) {
        self.countdown.display(self.active_cycle())
    }

    pub fn countdown_label(&self) -> String {
        countdown_label(self.remaining_seconds())
    }

    #[cfg(test)]
    pub fn timer(&self) -> &CycleTimer {
        &self.timer
    }

    /// How long until the countdown wants to be sampled again
    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        self.timer.time_until_due(now)
    }

    pub fn create_new_cycle(&mut self, data: CreateCycleData) -> Cycle {
        self.create_new_cycle_at(data, Local::now(), Instant::now())
    }

    /// Start a new cycle. One already running is interrupted first so only
    /// one cycle is ever active.
    pub fn create_new_cycle_at(
        &mut self,
        data: CreateCycleData,
        now: DateTime<Local>,
        instant: Instant,
    ) -> Cycle {
        self.sync_from_store(instant);
        if self.active_cycle().is_some() {
            info!("interrupting the running cycle to start a new one");
            self.stop_current_cycle_at(now);
        }

        let cycle = Cycle::new(data.task, data.minutes_amount, now);
        info!(
            cycle = %cycle.id,
            task = %cycle.task,
            minutes = cycle.minutes_amount,
            "cycle started"
        );

        self.dispatch(add_new_cycle_action(cycle.clone()));
        self.countdown.reset();
        self.timer.arm(cycle.id, instant);
        cycle
    }

    pub fn stop_current_cycle(&mut self) {
        self.stop_current_cycle_at(Local::now());
    }

    pub fn stop_current_cycle_at(&mut self, now: DateTime<Local>) {
        self.sync_from_store(Instant::now());
        if let Some(cycle) = self.active_cycle() {
            info!(cycle = %cycle.id, task = %cycle.task, "cycle interrupted");
        }
        self.dispatch(stop_current_cycle_action(now));
        self.timer.disarm();
        self.countdown.reset();
    }

    pub(crate) fn mark_current_cycle_as_finished_at(&mut self, now: DateTime<Local>) {
        self.dispatch(mark_current_cycle_as_finished_action(now));
    }

    /// Sample the countdown if the timer is due. Returns the cycle that
    /// finished on this tick, if any.
    pub fn tick(&mut self, instant: Instant, now: DateTime<Local>) -> Option<Cycle> {
        self.sync_from_store(instant);
        if !self.timer.poll(instant) {
            return None;
        }
        self.sample(now)
    }

    /// Sample the countdown now, finishing the active cycle at its deadline
    fn sample(&mut self, now: DateTime<Local>) -> Option<Cycle> {
        let active = self.state.active_cycle().cloned();

        match self.countdown.sample(active.as_ref(), now) {
            Tick::Idle => {
                self.timer.disarm();
                None
            }
            Tick::Running { seconds_passed } => {
                debug!(seconds_passed, "countdown tick");
                None
            }
            Tick::Finished { total_seconds } => {
                self.mark_current_cycle_as_finished_at(now);
                self.countdown.set_seconds_passed(total_seconds);
                self.timer.disarm();

                let finished = active.and_then(|cycle| {
                    self.state
                        .cycles
                        .iter()
                        .find(|c| c.id == cycle.id && c.status() == CycleStatus::Finished)
                        .cloned()
                });
                if let Some(cycle) = &finished {
                    info!(cycle = %cycle.id, task = %cycle.task, "cycle finished");
                }
                finished
            }
        }
    }

    fn active_cycle_id_if_present(&self) -> Option<Uuid> {
        self.active_cycle().map(|cycle| cycle.id)
    }

    /// Adopt the stored state when another process changed it. The timer
    /// follows the active cycle of the adopted state.
    fn sync_from_store(&mut self, instant: Instant) {
        let Some(stored) = self.mirror.reload() else {
            return;
        };
        if stored == self.state {
            return;
        }

        let previous = self.active_cycle_id_if_present();
        self.state = stored;
        let current = self.active_cycle_id_if_present();
        info!(
            cycles = self.state.cycles.len(),
            active = current.is_some(),
            "picked up cycles state written elsewhere"
        );

        if previous != current {
            self.countdown.reset();
            match current {
                Some(id) => self.timer.arm(id, instant),
                None => {
                    self.timer.disarm();
                }
            }
        }
    }

    /// Single writer for the cycle state. The reducer runs against the
    /// stored state so changes made elsewhere are never overwritten.
    fn dispatch(&mut self, action: Action) {
        self.sync_from_store(Instant::now());
        let name = action.name();
        let next = cycles_reducer(self.state.clone(), action);
        if next == self.state {
            debug!(action = name, "action left state unchanged");
            return;
        }
        self.state = next;
        self.mirror.mirror(&self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::mirror::{serialize_state, STATE_KEY};
    use crate::persistence::store::{FileStore, KeyValueStore, MemoryStore};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn t0() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn secs(n: i64) -> chrono::Duration {
        chrono::Duration::seconds(n)
    }

    fn empty_context() -> CyclesContext {
        let mirror = PersistenceMirror::new(Box::new(MemoryStore::new()));
        CyclesContext::new(mirror, Duration::from_secs(1), t0())
    }

    fn data(task: &str, minutes: u32) -> CreateCycleData {
        CreateCycleData {
            task: task.to_string(),
            minutes_amount: minutes,
        }
    }

    fn stored_state(context: &CyclesContext) -> Option<String> {
        context.mirror.store().get(STATE_KEY).unwrap()
    }

    #[test]
    fn test_starts_empty() {
        let context = empty_context();
        assert!(context.cycles().is_empty());
        assert!(context.active_cycle().is_none());
        assert_eq!(context.amount_seconds_passed(), 0);
        assert_eq!(context.countdown_label(), "00:00");
        assert!(!context.timer().is_armed());
    }

    #[test]
    fn test_create_then_stop() {
        let mut context = empty_context();
        let instant = Instant::now();

        let cycle = context.create_new_cycle_at(data("Write spec", 25), t0(), instant);
        assert_eq!(context.active_cycle_id(), Some(cycle.id));
        assert_eq!(context.active_cycle().unwrap().total_seconds(), 1500);
        assert_eq!(context.countdown_label(), "25:00");
        assert_eq!(context.timer().armed_for(), Some(cycle.id));

        context.stop_current_cycle_at(t0() + secs(1));
        assert_eq!(context.active_cycle_id(), None);
        assert_eq!(context.cycles()[0].status(), CycleStatus::Interrupted);
        assert_eq!(context.cycles()[0].finished_date, None);
        assert!(!context.timer().is_armed());
    }

    #[test]
    fn test_each_change_is_mirrored() {
        let mut context = empty_context();
        assert_eq!(stored_state(&context), None);

        context.create_new_cycle_at(data("Write spec", 25), t0(), Instant::now());
        let expected = serialize_state(context.state()).unwrap();
        assert_eq!(stored_state(&context), Some(expected));

        context.stop_current_cycle_at(t0() + secs(5));
        let expected = serialize_state(context.state()).unwrap();
        assert_eq!(stored_state(&context), Some(expected));
    }

    #[test]
    fn test_noop_stop_does_not_write() {
        let mut context = empty_context();
        context.stop_current_cycle_at(t0());
        assert_eq!(stored_state(&context), None);
    }

    #[test]
    fn test_tick_only_when_timer_due() {
        let mut context = empty_context();
        let instant = Instant::now();
        context.create_new_cycle_at(data("Focus", 1), t0(), instant);

        assert_eq!(context.tick(instant + Duration::from_millis(400), t0() + secs(30)), None);
        assert_eq!(context.amount_seconds_passed(), 0);

        assert_eq!(context.tick(instant + Duration::from_secs(1), t0() + secs(59)), None);
        assert_eq!(context.amount_seconds_passed(), 59);
        assert!(context.active_cycle().is_some());
    }

    #[test]
    fn test_finish_emitted_once() {
        let mut context = empty_context();
        let instant = Instant::now();
        let cycle = context.create_new_cycle_at(data("Focus", 1), t0(), instant);

        let finished = context.tick(instant + Duration::from_secs(1), t0() + secs(60));
        let finished = finished.expect("cycle should finish at its deadline");
        assert_eq!(finished.id, cycle.id);
        assert_eq!(finished.finished_date, Some(t0() + secs(60)));

        assert_eq!(context.amount_seconds_passed(), 60);
        assert_eq!(context.active_cycle_id(), None);
        assert!(!context.timer().is_armed());

        // Timer is cancelled, so later ticks do nothing
        assert_eq!(context.tick(instant + Duration::from_secs(2), t0() + secs(61)), None);
        assert_eq!(context.amount_seconds_passed(), 60);
        let finished_count = context
            .cycles()
            .iter()
            .filter(|c| c.status() == CycleStatus::Finished)
            .count();
        assert_eq!(finished_count, 1);
    }

    #[test]
    fn test_new_cycle_interrupts_running_one() {
        let mut context = empty_context();
        let instant = Instant::now();
        let first = context.create_new_cycle_at(data("First", 25), t0(), instant);
        let second = context.create_new_cycle_at(data("Second", 5), t0() + secs(10), instant);

        assert_eq!(context.cycles().len(), 2);
        assert_eq!(context.cycles()[0].id, first.id);
        assert_eq!(context.cycles()[0].interrupted_date, Some(t0() + secs(10)));
        assert_eq!(context.active_cycle_id(), Some(second.id));
        assert_eq!(context.timer().armed_for(), Some(second.id));
    }

    #[test]
    fn test_restores_running_cycle() {
        let temp_dir = tempfile::tempdir().unwrap();
        let instant = Instant::now();

        let cycle = {
            let mirror = PersistenceMirror::new(Box::new(FileStore::new(temp_dir.path())));
            let mut context = CyclesContext::new(mirror, Duration::from_secs(1), t0());
            context.create_new_cycle_at(data("Write spec", 25), t0(), instant)
        };

        let mirror = PersistenceMirror::new(Box::new(FileStore::new(temp_dir.path())));
        let context = CyclesContext::new(mirror, Duration::from_secs(1), t0() + secs(90));

        assert_eq!(context.active_cycle_id(), Some(cycle.id));
        assert_eq!(context.amount_seconds_passed(), 90);
        assert_eq!(context.countdown_label(), "23:30");
        assert!(context.timer().is_armed());
    }

    #[test]
    fn test_overdue_restored_cycle_finishes_on_load() {
        let cycle = Cycle::new("Old".to_string(), 5, t0());
        let state = CyclesState {
            active_cycle_id: Some(cycle.id),
            cycles: vec![cycle.clone()],
        };
        let mut store = MemoryStore::new();
        store.set(STATE_KEY, &serialize_state(&state).unwrap()).unwrap();

        let now = t0() + chrono::Duration::hours(4);
        let context = CyclesContext::new(PersistenceMirror::new(Box::new(store)), Duration::from_secs(1), now);

        assert_eq!(context.active_cycle_id(), None);
        assert_eq!(context.cycles()[0].finished_date, Some(now));
        assert!(!context.timer().is_armed());
    }

    #[test]
    fn test_stale_pointer_on_load_is_tolerated() {
        let state = CyclesState {
            cycles: vec![Cycle::new("Kept".to_string(), 5, t0())],
            active_cycle_id: Some(Uuid::new_v4()),
        };
        let mut store = MemoryStore::new();
        store.set(STATE_KEY, &serialize_state(&state).unwrap()).unwrap();

        let mut context =
            CyclesContext::new(PersistenceMirror::new(Box::new(store)), Duration::from_secs(1), t0());
        assert!(context.active_cycle().is_none());
        assert_eq!(context.remaining_seconds(), 0);

        context.stop_current_cycle_at(t0());
        assert_eq!(context.active_cycle_id(), None);
        assert_eq!(context.cycles()[0].status(), CycleStatus::InProgress);
    }

    fn file_context(dir: &std::path::Path, now: DateTime<Local>) -> CyclesContext {
        let mirror = PersistenceMirror::new(Box::new(FileStore::new(dir)));
        CyclesContext::new(mirror, Duration::from_secs(1), now)
    }

    #[test]
    fn test_second_writer_changes_are_kept() {
        let temp_dir = tempfile::tempdir().unwrap();
        let instant = Instant::now();

        let mut tui = file_context(temp_dir.path(), t0());
        let first = tui.create_new_cycle_at(data("A", 1), t0(), instant);

        let mut cli = file_context(temp_dir.path(), t0() + secs(10));
        cli.stop_current_cycle_at(t0() + secs(10));
        let second = cli.create_new_cycle_at(data("B", 25), t0() + secs(20), instant);

        // A's deadline passes, but the other writer already interrupted it
        let finished = tui.tick(instant + Duration::from_secs(1), t0() + secs(60));
        assert_eq!(finished, None);
        assert_eq!(tui.active_cycle_id(), Some(second.id));
        assert_eq!(tui.timer().armed_for(), Some(second.id));

        let reopened = file_context(temp_dir.path(), t0() + secs(61));
        let stored: Vec<(Uuid, CycleStatus)> =
            reopened.cycles().iter().map(|c| (c.id, c.status())).collect();
        assert_eq!(
            stored,
            vec![
                (first.id, CycleStatus::Interrupted),
                (second.id, CycleStatus::InProgress)
            ]
        );
        assert_eq!(reopened.cycles()[0].finished_date, None);
    }

    #[test]
    fn test_dispatch_reduces_against_stored_state() {
        let temp_dir = tempfile::tempdir().unwrap();
        let instant = Instant::now();

        // Both open while nothing runs
        let mut tui = file_context(temp_dir.path(), t0());
        let mut cli = file_context(temp_dir.path(), t0());

        let from_cli = cli.create_new_cycle_at(data("From CLI", 25), t0(), instant);
        let from_tui = tui.create_new_cycle_at(data("From TUI", 5), t0() + secs(30), instant);

        let reopened = file_context(temp_dir.path(), t0() + secs(31));
        let ids: Vec<Uuid> = reopened.cycles().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![from_cli.id, from_tui.id]);
        assert_eq!(reopened.cycles()[0].interrupted_date, Some(t0() + secs(30)));
        assert_eq!(reopened.active_cycle_id(), Some(from_tui.id));
    }

    #[test]
    fn test_idle_tick_picks_up_cycle_started_elsewhere() {
        let temp_dir = tempfile::tempdir().unwrap();
        let instant = Instant::now();

        let mut tui = file_context(temp_dir.path(), t0());
        assert!(!tui.timer().is_armed());

        let mut cli = file_context(temp_dir.path(), t0());
        let cycle = cli.create_new_cycle_at(data("Elsewhere", 25), t0(), instant);

        assert_eq!(tui.tick(instant, t0() + secs(1)), None);
        assert_eq!(tui.active_cycle_id(), Some(cycle.id));
        assert_eq!(tui.timer().armed_for(), Some(cycle.id));

        tui.tick(instant + Duration::from_secs(1), t0() + secs(2));
        assert_eq!(tui.countdown_label(), "24:58");
    }

    #[test]
    fn test_mark_finished_without_active_is_noop() {
        let mut context = empty_context();
        context.mark_current_cycle_as_finished_at(t0());
        assert!(context.cycles().is_empty());
        assert_eq!(stored_state(&context), None);
    }
}
