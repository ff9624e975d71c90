use super::cycle::{Cycle, CycleStatus};
use chrono::{DateTime, Local};
use std::collections::HashSet;

/// Split remaining seconds into zero-padded minutes and seconds
pub fn format_countdown(remaining_seconds: i64) -> (String, String) {
    let remaining = remaining_seconds.max(0);
    let minutes = remaining / 60;
    let seconds = remaining % 60;
    (format!("{:02}", minutes), format!("{:02}", seconds))
}

/// Countdown rendered as "MM:SS"
pub fn countdown_label(remaining_seconds: i64) -> String {
    let (minutes, seconds) = format_countdown(remaining_seconds);
    format!("{}:{}", minutes, seconds)
}

/// Human distance between a start date and now (e.g., "12 minutes ago")
pub fn relative_start(start: DateTime<Local>, now: DateTime<Local>) -> String {
    let elapsed = now.signed_duration_since(start);

    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = elapsed.num_hours();
    if hours < 24 {
        return plural(hours, "hour");
    }

    plural(elapsed.num_days(), "day")
}

fn plural(amount: i64, unit: &str) -> String {
    if amount == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", amount, unit)
    }
}

/// Label used in the history status column
pub fn status_badge(status: CycleStatus) -> &'static str {
    match status {
        CycleStatus::InProgress => "In progress",
        CycleStatus::Interrupted => "Interrupted",
        CycleStatus::Finished => "Finished",
    }
}

/// Aggregate counts over the cycle history
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistorySummary {
    pub total: usize,
    pub finished: usize,
    pub interrupted: usize,
    pub in_progress: usize,
    /// Minutes from cycles that ran to completion
    pub focused_minutes: u64,
}

pub fn summarize_history(cycles: &[Cycle]) -> HistorySummary {
    let mut summary = HistorySummary {
        total: cycles.len(),
        ..HistorySummary::default()
    };

    for cycle in cycles {
        match cycle.status() {
            CycleStatus::Finished => {
                summary.finished += 1;
                summary.focused_minutes += u64::from(cycle.minutes_amount);
            }
            CycleStatus::Interrupted => summary.interrupted += 1,
            CycleStatus::InProgress => summary.in_progress += 1,
        }
    }

    summary
}

/// Distinct task labels, most recently started first
pub fn task_suggestions(cycles: &[Cycle], limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    cycles
        .iter()
        .rev()
        .filter(|cycle| seen.insert(cycle.task.as_str()))
        .take(limit)
        .map(|cycle| cycle.task.clone())
        .collect()
}
