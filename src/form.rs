use crate::domain::FormField;
use crate::persistence::{MAX_MINUTES, MIN_MINUTES};
use thiserror::Error;

/// Step applied by the up/down keys on the minutes field
pub const MINUTES_STEP: u32 = 5;

const MAX_MINUTES_DIGITS: usize = 2;

/// Reasons a new cycle request is rejected before it reaches the reducer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Inform the task")]
    TaskRequired,
    #[error("Minutes must be a whole number")]
    MinutesNotANumber,
    #[error("The cycle must last between {min} and {max} minutes")]
    MinutesOutOfRange { min: u32, max: u32 },
}

/// Validated input for creating a cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCycleData {
    pub task: String,
    pub minutes_amount: u32,
}

impl CreateCycleData {
    /// Validate raw values: trimmed task must be non-empty, minutes in 1..=60
    pub fn validate(task: &str, minutes_amount: &str) -> Result<Self, FormError> {
        let task = task.trim();
        if task.is_empty() {
            return Err(FormError::TaskRequired);
        }

        let minutes_amount: i64 = minutes_amount
            .trim()
            .parse()
            .map_err(|_| FormError::MinutesNotANumber)?;

        if minutes_amount < i64::from(MIN_MINUTES) || minutes_amount > i64::from(MAX_MINUTES) {
            return Err(FormError::MinutesOutOfRange {
                min: MIN_MINUTES,
                max: MAX_MINUTES,
            });
        }

        Ok(Self {
            task: task.to_string(),
            minutes_amount: minutes_amount as u32,
        })
    }
}

/// Input buffers of the new cycle form
#[derive(Debug, Clone)]
pub struct NewCycleForm {
    pub task: String,
    pub minutes_amount: String,
    pub focused: FormField,
    /// Last validation failure, cleared on the next edit
    pub error: Option<FormError>,
}

impl NewCycleForm {
    pub fn new(default_minutes: u32) -> Self {
        Self {
            task: String::new(),
            minutes_amount: default_minutes.to_string(),
            focused: FormField::Task,
            error: None,
        }
    }

    /// Type a character into the focused field
    pub fn push_char(&mut self, c: char) {
        self.error = None;
        match self.focused {
            FormField::Task => self.task.push(c),
            FormField::MinutesAmount => {
                if c.is_ascii_digit() && self.minutes_amount.len() < MAX_MINUTES_DIGITS {
                    self.minutes_amount.push(c);
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        self.error = None;
        match self.focused {
            FormField::Task => self.task.pop(),
            FormField::MinutesAmount => self.minutes_amount.pop(),
        };
    }

    pub fn next_field(&mut self) {
        self.focused = self.focused.next();
    }

    /// Move the minutes value by one step, staying within bounds
    pub fn step_minutes(&mut self, up: bool) {
        self.error = None;
        let current = self.minutes_amount.trim().parse::<u32>().unwrap_or(0);
        let next = if up {
            current.saturating_add(MINUTES_STEP)
        } else {
            current.saturating_sub(MINUTES_STEP)
        };
        self.minutes_amount = next.clamp(MIN_MINUTES, MAX_MINUTES).to_string();
    }

    /// The start action stays unavailable until a task is typed
    pub fn is_submittable(&self) -> bool {
        !self.task.trim().is_empty()
    }

    /// Validate the buffers; a failure is also kept in `error` for display
    pub fn submit(&mut self) -> Result<CreateCycleData, FormError> {
        let result = CreateCycleData::validate(&self.task, &self.minutes_amount);
        self.error = result.as_ref().err().cloned();
        result
    }

    /// Clear the task after a successful start, keeping the chosen minutes
    pub fn reset(&mut self) {
        self.task.clear();
        self.focused = FormField::Task;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn type_str(form: &mut NewCycleForm, text: &str) {
        for c in text.chars() {
            form.push_char(c);
        }
    }

    #[test]
    fn test_validate_accepts_bounds() {
        assert_eq!(
            CreateCycleData::validate("  Write spec ", "25"),
            Ok(CreateCycleData {
                task: "Write spec".to_string(),
                minutes_amount: 25,
            })
        );
        assert!(CreateCycleData::validate("a", "1").is_ok());
        assert!(CreateCycleData::validate("a", "60").is_ok());
    }

    #[test]
    fn test_validate_rejects() {
        assert_eq!(CreateCycleData::validate("   ", "25"), Err(FormError::TaskRequired));
        assert_eq!(CreateCycleData::validate("a", "abc"), Err(FormError::MinutesNotANumber));
        assert_eq!(CreateCycleData::validate("a", ""), Err(FormError::MinutesNotANumber));
        assert_eq!(
            CreateCycleData::validate("a", "0"),
            Err(FormError::MinutesOutOfRange { min: 1, max: 60 })
        );
        assert_eq!(
            CreateCycleData::validate("a", "61"),
            Err(FormError::MinutesOutOfRange { min: 1, max: 60 })
        );
        assert_eq!(
            CreateCycleData::validate("a", "-5"),
            Err(FormError::MinutesOutOfRange { min: 1, max: 60 })
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FormError::MinutesOutOfRange { min: 1, max: 60 }.to_string(),
            "The cycle must last between 1 and 60 minutes"
        );
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let mut form = NewCycleForm::new(25);
        type_str(&mut form, "Read");
        form.next_field();
        form.backspace();
        form.backspace();
        type_str(&mut form, "4x5");

        assert_eq!(form.task, "Read");
        assert_eq!(form.minutes_amount, "45");
    }

    #[test]
    fn test_minutes_field_caps_digits() {
        let mut form = NewCycleForm::new(25);
        form.next_field();
        type_str(&mut form, "9");
        assert_eq!(form.minutes_amount, "25");
    }

    #[test]
    fn test_step_minutes_clamps() {
        let mut form = NewCycleForm::new(25);
        form.step_minutes(true);
        assert_eq!(form.minutes_amount, "30");

        form.minutes_amount = "58".to_string();
        form.step_minutes(true);
        assert_eq!(form.minutes_amount, "60");

        form.minutes_amount = "3".to_string();
        form.step_minutes(false);
        assert_eq!(form.minutes_amount, "1");
    }

    #[test]
    fn test_submit_records_and_clears_error() {
        let mut form = NewCycleForm::new(25);
        assert!(!form.is_submittable());
        assert_eq!(form.submit(), Err(FormError::TaskRequired));
        assert_eq!(form.error, Some(FormError::TaskRequired));

        form.push_char('A');
        assert_eq!(form.error, None);
        assert!(form.is_submittable());

        let data = form.submit().unwrap();
        assert_eq!(data.task, "A");
        assert_eq!(data.minutes_amount, 25);

        form.reset();
        assert_eq!(form.task, "");
        assert_eq!(form.minutes_amount, "25");
    }
}
