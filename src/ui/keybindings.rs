use crate::domain::View;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Hints for the given screen
pub fn hints(view: View, running: bool) -> Vec<&'static str> {
    match view {
        View::Home if running => vec![
            " Esc/Ctrl+S interrupt   ",
            "Ctrl+L history   ",
            "Ctrl+C quit",
        ],
        View::Home => vec![
            " Enter start   ",
            "Tab field   ",
            "↑/↓ minutes   ",
            "Ctrl+T suggest   ",
            "Ctrl+L history   ",
            "Ctrl+C quit",
        ],
        View::History => vec![" ↑/↓ scroll   ", "Tab/Esc timer   ", "q quit"],
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect, view: View, running: bool) {
    let spans: Vec<Span> = hints(view, running).into_iter().map(Span::raw).collect();
    let paragraph = Paragraph::new(Line::from(spans)).style(hint_style());
    f.render_widget(paragraph, area);
}
