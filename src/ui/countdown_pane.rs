use crate::app::AppState;
use crate::ui::layout::centered_rect;
use crate::ui::styles::{countdown_idle_style, countdown_style};
use ratatui::{
    layout::{Alignment, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

const GLYPH_HEIGHT: usize = 5;

/// 5-row block glyph for a countdown character
fn glyph(c: char) -> [&'static str; GLYPH_HEIGHT] {
    match c {
        '0' => ["███", "█ █", "█ █", "█ █", "███"],
        '1' => ["  █", "  █", "  █", "  █", "  █"],
        '2' => ["███", "  █", "███", "█  ", "███"],
        '3' => ["███", "  █", "███", "  █", "███"],
        '4' => ["█ █", "█ █", "███", "  █", "  █"],
        '5' => ["███", "█  ", "███", "  █", "███"],
        '6' => ["███", "█  ", "███", "█ █", "███"],
        '7' => ["███", "  █", "  █", "  █", "  █"],
        '8' => ["███", "█ █", "███", "█ █", "███"],
        '9' => ["███", "█ █", "███", "  █", "███"],
        ':' => ["   ", " █ ", "   ", " █ ", "   "],
        _ => ["   ", "   ", "   ", "   ", "   "],
    }
}

/// Render text as rows of block glyphs separated by one column
pub fn big_text(text: &str) -> Vec<String> {
    (0..GLYPH_HEIGHT)
        .map(|row| {
            text.chars()
                .map(|c| glyph(c)[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Render the countdown in large digits
pub fn render_countdown_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let label = app.context.countdown_label();
    let style = if app.context.active_cycle().is_some() {
        countdown_style()
    } else {
        countdown_idle_style()
    };

    let rows = big_text(&label);
    let width = rows.first().map(|r| r.chars().count()).unwrap_or(0) as u16;
    let target = centered_rect(width, GLYPH_HEIGHT as u16, area);

    let lines: Vec<Line> = rows.into_iter().map(Line::raw).collect();
    let paragraph = Paragraph::new(lines)
        .style(style)
        .alignment(Alignment::Left);
    f.render_widget(paragraph, target);
}
