use ratatui::style::{Color, Modifier, Style};

/// Countdown digits while a cycle runs
pub fn countdown_style() -> Style {
    Style::default()
        .fg(Color::LightGreen)
        .add_modifier(Modifier::BOLD)
}

/// Countdown digits with nothing running
pub fn countdown_idle_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Focused input field
pub fn focused_field_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Inputs locked while a cycle runs
pub fn locked_field_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Selected tab
pub fn active_tab_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Informational status line
pub fn info_style() -> Style {
    Style::default().fg(Color::Green)
}

/// History badge: running
pub fn in_progress_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// History badge: interrupted
pub fn interrupted_style() -> Style {
    Style::default().fg(Color::Red)
}

/// History badge: finished
pub fn finished_style() -> Style {
    Style::default().fg(Color::Green)
}
