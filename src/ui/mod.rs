pub mod countdown_pane;
pub mod history_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod styles;

use crate::app::{AppState, StatusMessage};
use crate::domain::View;
use countdown_pane::render_countdown_pane;
use history_pane::render_history_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::{create_home_layout, create_layout};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use styles::{active_tab_style, error_style, hint_style, info_style};

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);
    let running = app.context.active_cycle().is_some();

    render_keybindings(f, layout.keybindings_area, app.view, running);
    render_tabs(f, app.view, layout.tabs_area);

    match app.view {
        View::Home => render_home(f, app, layout.content_area),
        View::History => render_history_pane(f, app, layout.content_area),
    }
}

fn render_tabs(f: &mut Frame, current: View, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for view in [View::Home, View::History] {
        let style = if view == current { active_tab_style() } else { hint_style() };
        spans.push(Span::styled(view.title(), style));
        spans.push(Span::raw("   "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_home(f: &mut Frame, app: &AppState, area: Rect) {
    let home = create_home_layout(area);

    render_input_form(f, app, home.form_area);
    render_countdown_pane(f, app, home.countdown_area);

    if let Some(status) = &app.status {
        let (text, style) = match status {
            StatusMessage::Info(text) => (text, info_style()),
            StatusMessage::Error(text) => (text, error_style()),
        };
        f.render_widget(Paragraph::new(format!(" {}", text)).style(style), home.status_area);
    }
}
