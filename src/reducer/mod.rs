pub mod actions;

pub use actions::{
    add_new_cycle_action, mark_current_cycle_as_finished_action, stop_current_cycle_action, Action,
};

use crate::domain::Cycle;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything the reducer owns: the history and the active-cycle pointer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CyclesState {
    pub cycles: Vec<Cycle>,
    pub active_cycle_id: Option<Uuid>,
}

impl CyclesState {
    /// The cycle the pointer refers to, if it still exists
    pub fn active_cycle(&self) -> Option<&Cycle> {
        let id = self.active_cycle_id?;
        self.cycles.iter().find(|cycle| cycle.id == id)
    }
}

/// Apply one action to the state.
///
/// Finish and stop both clear the active pointer, so a caller never has to
/// sequence a separate reset. Finishing with a null or stale pointer is a
/// no-op; stopping always leaves the pointer null.
pub fn cycles_reducer(mut state: CyclesState, action: Action) -> CyclesState {
    match action {
        Action::AddNewCycle { new_cycle } => {
            state.active_cycle_id = Some(new_cycle.id);
            state.cycles.push(new_cycle);
            state
        }
        Action::MarkCurrentCycleAsFinished { at } => match active_index(&state) {
            Some(index) => close_cycle(state, index, |cycle| cycle.finished_date = Some(at)),
            None => state,
        },
        Action::StopCurrentCycle { at } => match active_index(&state) {
            Some(index) => close_cycle(state, index, |cycle| cycle.interrupted_date = Some(at)),
            None => {
                state.active_cycle_id = None;
                state
            }
        },
    }
}

fn active_index(state: &CyclesState) -> Option<usize> {
    let active_id = state.active_cycle_id?;
    state.cycles.iter().position(|cycle| cycle.id == active_id)
}

fn close_cycle(
    mut state: CyclesState,
    index: usize,
    stamp: impl FnOnce(&mut Cycle),
) -> CyclesState {
    // A terminal cycle keeps its first outcome
    if !state.cycles[index].is_terminal() {
        let mut closed = state.cycles[index].clone();
        stamp(&mut closed);
        state.cycles[index] = closed;
    }
    state.active_cycle_id = None;
    state
}
