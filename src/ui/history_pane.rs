use crate::app::AppState;
use crate::domain::{relative_start, status_badge, summarize_history, CycleStatus};
use crate::ui::styles::{
    border_style, finished_style, hint_style, in_progress_style, interrupted_style, title_style,
};
use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

fn badge_style(status: CycleStatus) -> Style {
    match status {
        CycleStatus::InProgress => in_progress_style(),
        CycleStatus::Interrupted => interrupted_style(),
        CycleStatus::Finished => finished_style(),
    }
}

/// Render the cycle history, newest first, with a summary line
pub fn render_history_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let now = Local::now();
    let rows: Vec<Row> = app
        .context
        .cycles()
        .iter()
        .rev()
        .skip(app.history_scroll)
        .map(|cycle| {
            let status = cycle.status();
            Row::new(vec![
                Cell::from(cycle.task.clone()),
                Cell::from(format!("{} minutes", cycle.minutes_amount)),
                Cell::from(relative_start(cycle.start_date, now)),
                Cell::from(Span::styled(format!("● {}", status_badge(status)), badge_style(status))),
            ])
        })
        .collect();

    let header = Row::new(vec!["Task", "Duration", "Started", "Status"]).style(title_style());
    let title = format!(" History ({}) ", app.context.cycles().len());

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(45),
            Constraint::Percentage(15),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );
    f.render_widget(table, chunks[0]);

    let summary = summarize_history(app.context.cycles());
    let line = format!(
        " {} finished · {} interrupted · {} in progress · {} focused minutes",
        summary.finished, summary.interrupted, summary.in_progress, summary.focused_minutes
    );
    f.render_widget(Paragraph::new(line).style(hint_style()), chunks[1]);
}
