use crate::app::AppState;
use crate::domain::FormField;
use crate::ui::styles::{
    border_style, focused_field_style, hint_style, locked_field_style, title_style,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn field_style(app: &AppState, field: FormField) -> Style {
    if app.form_locked() {
        locked_field_style()
    } else if app.form.focused == field {
        focused_field_style()
    } else {
        Style::default()
    }
}

/// Render the new cycle form
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    let form = &app.form;
    let locked = app.form_locked();

    let task_text = if form.task.is_empty() && !locked {
        "Give your project a name".to_string()
    } else {
        form.task.clone()
    };
    let cursor = |field: FormField| {
        if !locked && form.focused == field {
            Span::styled("█", title_style())
        } else {
            Span::raw("")
        }
    };

    let mut lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::raw(" I will work on  "),
            Span::styled(format!(" {} ", task_text), field_style(app, FormField::Task)),
            cursor(FormField::Task),
            Span::raw("  for  "),
            Span::styled(
                format!(" {:>2} ", form.minutes_amount),
                field_style(app, FormField::MinutesAmount),
            ),
            cursor(FormField::MinutesAmount),
            Span::raw("  minutes."),
        ]),
        Line::raw(""),
    ];

    if !locked {
        let start_style = if app.can_start() {
            focused_field_style()
        } else {
            locked_field_style()
        };
        lines.push(Line::from(vec![
            Span::raw(" "),
            Span::styled(" ▶ Start (Enter) ", start_style),
        ]));
    }

    let suggestions = app.suggestions();
    if !locked && !suggestions.is_empty() {
        lines.push(Line::from(vec![
            Span::styled(" Suggestions: ", hint_style()),
            Span::styled(suggestions.join(" · "), hint_style()),
        ]));
    }

    let title = if locked { " Running " } else { " New cycle " };
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(paragraph, area);
}
