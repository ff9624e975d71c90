pub mod cycle;
pub mod enums;
pub mod views;

pub use cycle::{Cycle, CycleStatus};
pub use enums::{FormField, View};
pub use views::{
    countdown_label, format_countdown, relative_start, status_badge, summarize_history,
    task_suggestions,
};
