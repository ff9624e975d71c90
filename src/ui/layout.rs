use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub tabs_area: Rect,
    pub content_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Tabs: Timer | History (1 row)
/// - Content: the selected screen
pub fn create_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Length(1), // Tabs
            Constraint::Min(0),    // Screen
        ])
        .split(area);

    MainLayout {
        keybindings_area: chunks[0],
        tabs_area: chunks[1],
        content_area: chunks[2],
    }
}

/// Areas of the timer screen
pub struct HomeLayout {
    pub form_area: Rect,
    pub countdown_area: Rect,
    pub status_area: Rect,
}

/// Form on top, big countdown centered below, status line at the bottom
pub fn create_home_layout(area: Rect) -> HomeLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Form
            Constraint::Min(7),    // Countdown
            Constraint::Length(1), // Status
        ])
        .split(area);

    HomeLayout {
        form_area: chunks[0],
        countdown_area: chunks[1],
        status_area: chunks[2],
    }
}

/// Center a box of the given size inside `area`, shrinking it to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
