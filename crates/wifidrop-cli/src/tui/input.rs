//! Input handling for TUI key events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::Dispatcher;
use crate::app::{App, AppMode};
use crate::clipboard::Clipboard;

/// Process a key event, updating app state and dispatching store work.
pub fn handle_key_event(app: &mut App, jobs: &Dispatcher, clipboard: &mut Clipboard, key: KeyEvent) {
    // Ctrl+C quits from any mode.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.mode {
        AppMode::Browse => handle_browse_key(app, jobs, clipboard, key),
        AppMode::AddForm => handle_form_key(app, jobs, key),
        // The success acknowledgment blocks until any key dismisses it.
        AppMode::SubmitNotice => app.dismiss_notice(),
    }
}

/// Keys in Browse mode: characters edit the search term live, arrows move
/// the selection, Enter copies the selected password.
fn handle_browse_key(app: &mut App, jobs: &Dispatcher, clipboard: &mut Clipboard, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('n') {
        app.open_form();
        return;
    }

    match key.code {
        KeyCode::Up => app.select_prev(),
        KeyCode::Down => app.select_next(),
        KeyCode::Enter => copy_selected_password(app, jobs, clipboard),
        KeyCode::Char(c) => app.push_search(c),
        KeyCode::Backspace => app.pop_search(),
        KeyCode::Esc => app.clear_search(),
        _ => {}
    }
}

/// Copy the selected record's password and mark it for the copied window.
fn copy_selected_password(app: &mut App, jobs: &Dispatcher, clipboard: &mut Clipboard) {
    let Some((id, password)) = app.selected_record().map(|r| (r.id, r.password.clone())) else {
        return;
    };
    // The marker is set even when the platform clipboard is unavailable;
    // the failure only shows up in the status line.
    if !clipboard.copy(&password) {
        app.status = "Clipboard unavailable".to_string();
    }
    app.mark_copied(id);
    jobs.spawn_copy_expiry(id);
}

/// Keys in the creation form: characters edit the focused field, Tab/arrows
/// move focus, Enter submits, Esc closes without submitting.
fn handle_form_key(app: &mut App, jobs: &Dispatcher, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Tab | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_prev(),
        KeyCode::Enter => submit_draft(app, jobs),
        KeyCode::Char(c) => app.draft.field_mut(app.focus).push(c),
        KeyCode::Backspace => {
            app.draft.field_mut(app.focus).pop();
        }
        _ => {}
    }
}

/// Submit the draft once the required fields are filled.
fn submit_draft(app: &mut App, jobs: &Dispatcher) {
    if !app.draft.is_complete() {
        app.status = "Network name, password and business name are required".to_string();
        return;
    }
    jobs.spawn_insert(app.draft.to_record());
}
