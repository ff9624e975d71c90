use super::store::KeyValueStore;
use crate::reducer::CyclesState;
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Fixed key the cycle state is stored under
pub const STATE_KEY: &str = "@pomodoro-timer:cycles-state-1.0.0";

/// Serialize the full state snapshot
pub fn serialize_state(state: &CyclesState) -> Result<String> {
    serde_json::to_string_pretty(state).context("Failed to serialize cycles state")
}

/// Parse a stored snapshot
pub fn deserialize_state(raw: &str) -> Result<CyclesState> {
    serde_json::from_str(raw).context("Failed to parse cycles state")
}

/// Mirrors every reducer state into a key-value store
pub struct PersistenceMirror {
    store: Box<dyn KeyValueStore>,
}

impl PersistenceMirror {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    #[cfg(test)]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Read the stored state once. Missing or unreadable data yields the
    /// empty state; a blob that fails to parse is copied aside first.
    pub fn load_initial(&mut self) -> CyclesState {
        let raw = match self.store.get(STATE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no stored cycles state, starting empty");
                return CyclesState::default();
            }
            Err(e) => {
                warn!(error = %e, "could not read stored cycles state");
                return CyclesState::default();
            }
        };

        match deserialize_state(&raw) {
            Ok(state) => {
                info!(
                    cycles = state.cycles.len(),
                    active = state.active_cycle_id.is_some(),
                    "restored cycles state"
                );
                state
            }
            Err(e) => {
                warn!(error = %e, "stored cycles state is malformed, starting empty");
                let empty = CyclesState::default();
                if self.backup_malformed(&raw) {
                    self.mirror(&empty);
                }
                empty
            }
        }
    }

    /// Re-read the stored state, which another process may have written.
    /// None when nothing usable is stored.
    pub fn reload(&self) -> Option<CyclesState> {
        let raw = match self.store.get(STATE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                debug!(error = %e, "could not re-read stored cycles state");
                return None;
            }
        };
        match deserialize_state(&raw) {
            Ok(state) => Some(state),
            Err(e) => {
                debug!(error = %e, "stored cycles state is malformed, keeping ours");
                None
            }
        }
    }

    /// Write the snapshot. Failures are logged and otherwise ignored.
    pub fn mirror(&mut self, state: &CyclesState) {
        if let Err(e) = self.try_mirror(state) {
            warn!(error = %e, "failed to persist cycles state");
        }
    }

    fn try_mirror(&mut self, state: &CyclesState) -> Result<()> {
        let json = serialize_state(state)?;
        self.store.set(STATE_KEY, &json)?;
        debug!(cycles = state.cycles.len(), "persisted cycles state");
        Ok(())
    }

    /// Copy a malformed blob aside. Returns true once the copy is stored.
    fn backup_malformed(&mut self, raw: &str) -> bool {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let backup_key = format!("{}.corrupt-{}", STATE_KEY, timestamp);
        match self.store.set(&backup_key, raw) {
            Ok(()) => {
                info!(key = %backup_key, "kept a copy of the malformed state");
                true
            }
            Err(e) => {
                warn!(error = %e, "could not back up malformed state");
                false
            }
        }
    }
}
