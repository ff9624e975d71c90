use crate::domain::Cycle;
use chrono::{DateTime, Local};

/// Transitions accepted by the cycles reducer
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddNewCycle { new_cycle: Cycle },
    /// Stamps `finished_date` on the active cycle and clears the pointer
    MarkCurrentCycleAsFinished { at: DateTime<Local> },
    /// Stamps `interrupted_date` on the active cycle and clears the pointer
    StopCurrentCycle { at: DateTime<Local> },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddNewCycle { .. } => "ADD_NEW_CYCLE",
            Self::MarkCurrentCycleAsFinished { .. } => "MARK_CURRENT_CYCLE_AS_FINISHED",
            Self::StopCurrentCycle { .. } => "STOP_CURRENT_CYCLE",
        }
    }
}

pub fn add_new_cycle_action(new_cycle: Cycle) -> Action {
    Action::AddNewCycle { new_cycle }
}

pub fn mark_current_cycle_as_finished_action(at: DateTime<Local>) -> Action {
    Action::MarkCurrentCycleAsFinished { at }
}

pub fn stop_current_cycle_action(at: DateTime<Local>) -> Action {
    Action::StopCurrentCycle { at }
}
