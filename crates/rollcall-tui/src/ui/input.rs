//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use rollcall_core::models::GroupAssignment;

use crate::app::{App, AppState, Move, StatusMessage};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.state = AppState::Quitting;
        return true;
    }

    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return false;
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                if app.submitting {
                    app.status = Some(StatusMessage::error(
                        "Cannot quit while a submit is in progress. Please wait...",
                    ));
                    app.state = AppState::Normal;
                    return false;
                }
                app.state = AppState::Quitting;
                return true;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(Move::Up),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(Move::Down),
        KeyCode::Left | KeyCode::Char('h') => app.move_cursor(Move::Left),
        KeyCode::Right | KeyCode::Char('l') => app.move_cursor(Move::Right),
        KeyCode::PageUp => app.move_cursor(Move::PageUp),
        KeyCode::PageDown => app.move_cursor(Move::PageDown),
        KeyCode::Home => app.move_cursor(Move::Top),
        KeyCode::End => app.move_cursor(Move::Bottom),

        // Selection and submit
        KeyCode::Char(' ') => app.toggle_current(),
        KeyCode::Enter => app.start_submit(),
        KeyCode::Char('r') => app.reload(),

        // Display options
        KeyCode::Char('s') => app.toggle_sort_mode(),
        KeyCode::Char('g') => app.toggle_group_by_mode(),
        KeyCode::Char('t') => app.toggle_theme(),

        // Group picker
        KeyCode::Char('x') => app.select_group(GroupAssignment::Unchanged),
        KeyCode::Char(c @ '0'..='9') => {
            if let Some(group) = picker_group(c) {
                app.select_group(group);
            }
        }

        KeyCode::Esc => app.status = None,
        _ => {}
    }

    false
}

/// Digit keys pick groups 1-9; `0` picks group 10.
fn picker_group(c: char) -> Option<GroupAssignment> {
    let n = c.to_digit(10)? as u8;
    GroupAssignment::group(if n == 0 { 10 } else { n })
}
