use crate::context::CyclesContext;
use crate::domain::{task_suggestions, Cycle, View};
use crate::form::NewCycleForm;
use crate::notifications;
use crate::persistence::Settings;
use chrono::{DateTime, Local};
use std::time::Instant;

/// How many recent tasks are offered as suggestions
const SUGGESTION_LIMIT: usize = 5;

/// One-line feedback shown under the countdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// Main application state
pub struct AppState {
    pub context: CyclesContext,
    pub settings: Settings,
    pub form: NewCycleForm,
    pub view: View,
    pub status: Option<StatusMessage>,
    pub history_scroll: usize,
    suggestion_cursor: usize,
}

impl AppState {
    pub fn new(context: CyclesContext, settings: Settings) -> Self {
        let form = NewCycleForm::new(settings.default_minutes);
        Self {
            context,
            settings,
            form,
            view: View::Home,
            status: None,
            history_scroll: 0,
            suggestion_cursor: 0,
        }
    }

    /// Inputs are locked while a cycle counts down
    pub fn form_locked(&self) -> bool {
        self.context.active_cycle().is_some()
    }

    /// Whether Enter would start a cycle from the current form
    pub fn can_start(&self) -> bool {
        !self.form_locked() && self.form.is_submittable()
    }

    /// Recent tasks first, then configured suggestions, without duplicates
    pub fn suggestions(&self) -> Vec<String> {
        let mut suggestions = task_suggestions(self.context.cycles(), SUGGESTION_LIMIT);
        for extra in &self.settings.suggestions {
            if !suggestions.contains(extra) {
                suggestions.push(extra.clone());
            }
        }
        suggestions
    }

    /// Fill the task field with the next suggestion
    pub fn apply_next_suggestion(&mut self) {
        if self.form_locked() {
            return;
        }
        let suggestions = self.suggestions();
        if suggestions.is_empty() {
            return;
        }
        let index = self.suggestion_cursor % suggestions.len();
        self.form.task = suggestions[index].clone();
        self.suggestion_cursor = index + 1;
    }

    pub fn form_add_char(&mut self, c: char) {
        if !self.form_locked() {
            self.form.push_char(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if !self.form_locked() {
            self.form.backspace();
        }
    }

    pub fn form_next_field(&mut self) {
        if !self.form_locked() {
            self.form.next_field();
        }
    }

    pub fn form_step_minutes(&mut self, up: bool) {
        if !self.form_locked() {
            self.form.step_minutes(up);
        }
    }

    /// Submit the form and start a cycle
    pub fn start_cycle(&mut self) {
        self.start_cycle_at(Local::now(), Instant::now());
    }

    pub fn start_cycle_at(&mut self, now: DateTime<Local>, instant: Instant) {
        if self.form_locked() {
            return;
        }

        match self.form.submit() {
            Ok(data) => {
                let cycle = self.context.create_new_cycle_at(data, now, instant);
                self.form.reset();
                self.suggestion_cursor = 0;
                self.status = Some(StatusMessage::Info(format!(
                    "Started \"{}\" for {} min",
                    cycle.task, cycle.minutes_amount
                )));
            }
            Err(e) => {
                self.status = Some(StatusMessage::Error(e.to_string()));
            }
        }
    }

    /// Interrupt the running cycle
    pub fn interrupt_cycle(&mut self) {
        self.interrupt_cycle_at(Local::now());
    }

    pub fn interrupt_cycle_at(&mut self, now: DateTime<Local>) {
        let Some(task) = self.context.active_cycle().map(|c| c.task.clone()) else {
            return;
        };
        self.context.stop_current_cycle_at(now);
        self.status = Some(StatusMessage::Info(format!("Interrupted \"{}\"", task)));
    }

    pub fn toggle_view(&mut self) {
        self.view = self.view.toggled();
        self.history_scroll = 0;
    }

    pub fn scroll_history_up(&mut self) {
        self.history_scroll = self.history_scroll.saturating_sub(1);
    }

    pub fn scroll_history_down(&mut self) {
        if self.history_scroll + 1 < self.context.cycles().len() {
            self.history_scroll += 1;
        }
    }

    /// Advance the countdown; returns the cycle that just finished
    pub fn tick(&mut self, instant: Instant, now: DateTime<Local>) -> Option<Cycle> {
        let finished = self.context.tick(instant, now)?;
        if self.settings.notifications {
            notifications::notify_cycle_finished(&finished.task);
        }
        self.status = Some(StatusMessage::Info(format!("Finished \"{}\"", finished.task)));
        Some(finished)
    }

    /// Terminal title while a cycle is running ("MM : SS")
    pub fn window_title(&self) -> Option<String> {
        self.context.active_cycle()?;
        let (minutes, seconds) = self.context.countdown_display();
        Some(format!("{} : {}", minutes, seconds))
    }
}
