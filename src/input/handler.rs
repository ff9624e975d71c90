use crate::app::AppState;
use crate::domain::{FormField, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events, returns true when the app should quit
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Quit from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    // Switch screens from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('l') {
        app.toggle_view();
        return Ok(false);
    }

    match app.view {
        View::Home => handle_home(app, key),
        View::History => handle_history(app, key),
    }
}

/// Handle keys on the timer screen
fn handle_home(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            // Interrupt
            KeyCode::Char('s') => app.interrupt_cycle(),
            // Fill a suggested task
            KeyCode::Char('t') => app.apply_next_suggestion(),
            _ => {}
        }
        return Ok(false);
    }

    match key.code {
        // Start a cycle
        KeyCode::Enter => app.start_cycle(),

        // Interrupt
        KeyCode::Esc => app.interrupt_cycle(),

        // Switch between task and minutes
        KeyCode::Tab | KeyCode::BackTab => app.form_next_field(),

        // Step minutes
        KeyCode::Up if app.form.focused == FormField::MinutesAmount => app.form_step_minutes(true),
        KeyCode::Down if app.form.focused == FormField::MinutesAmount => app.form_step_minutes(false),

        KeyCode::Backspace => app.form_backspace(),

        KeyCode::Char(c) => app.form_add_char(c),

        _ => {}
    }
    Ok(false)
}

/// Handle keys on the history screen
fn handle_history(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
        KeyCode::Tab | KeyCode::Esc => app.toggle_view(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_history_up(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_history_down(),
        _ => {}
    }
    Ok(false)
}
