use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of a cycle as shown in the history list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStatus {
    InProgress,
    Interrupted,
    Finished,
}

/// One timed task attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cycle {
    pub id: Uuid,
    pub task: String,
    pub minutes_amount: u32,
    pub start_date: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interrupted_date: Option<DateTime<Local>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_date: Option<DateTime<Local>>,
}

impl Cycle {
    pub fn new(task: String, minutes_amount: u32, start_date: DateTime<Local>) -> Self {
        Self {
            id: Uuid::new_v4(),
            task,
            minutes_amount,
            start_date,
            interrupted_date: None,
            finished_date: None,
        }
    }

    /// Length of the countdown in seconds
    pub fn total_seconds(&self) -> i64 {
        i64::from(self.minutes_amount) * 60
    }

    /// Moment the countdown reaches zero
    pub fn deadline(&self) -> DateTime<Local> {
        self.start_date + Duration::seconds(self.total_seconds())
    }

    pub fn status(&self) -> CycleStatus {
        if self.finished_date.is_some() {
            CycleStatus::Finished
        } else if self.interrupted_date.is_some() {
            CycleStatus::Interrupted
        } else {
            CycleStatus::InProgress
        }
    }

    /// True once either terminal date has been stamped
    pub fn is_terminal(&self) -> bool {
        self.status() != CycleStatus::InProgress
    }
}
