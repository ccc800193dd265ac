use super::mode::Mode;
use super::state::{AppState, FormFocus};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Result<()> {
    match state.mode {
        Mode::Navigate => handle_navigate_mode(key, state),
        Mode::AddTask | Mode::EditTask => handle_form_mode(key, state),
        Mode::ConfirmDelete => handle_confirm_delete_mode(key, state),
        Mode::Search => handle_search_mode(key, state),
    }
    Ok(())
}

fn handle_navigate_mode(key: KeyEvent, state: &mut AppState) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('q') => state.should_quit = true,

        KeyCode::Char('h') | KeyCode::Left => state.move_column(-1),
        KeyCode::Char('l') | KeyCode::Right => state.move_column(1),
        KeyCode::Char('j') | KeyCode::Down => state.move_row(1),
        KeyCode::Char('k') | KeyCode::Up => state.move_row(-1),

        // Shifted horizontal movement carries the selected card along.
        KeyCode::Char('H') => state.request_move(-1),
        KeyCode::Char('L') => state.request_move(1),

        KeyCode::Char('[') => state.change_page(-1),
        KeyCode::Char(']') => state.change_page(1),
        KeyCode::Char('g') => state.cycle_group_by(),

        KeyCode::Char('a') | KeyCode::Char('n') => state.begin_add(),
        KeyCode::Char('e') | KeyCode::Enter => state.begin_edit(),
        KeyCode::Char('d') => state.request_delete(),

        KeyCode::Char('u') => state.undo_action(),
        KeyCode::Char('r') if ctrl => state.redo_action(),
        KeyCode::Char('U') => state.redo_action(),

        KeyCode::Char('/') => state.begin_search(),
        KeyCode::Char('f') => state.cycle_status_filter(),
        KeyCode::Char('p') => state.cycle_priority_filter(),
        KeyCode::Char('c') => state.clear_filters(),

        KeyCode::Char('i') => state.login(),
        KeyCode::Char('o') => state.logout(),

        _ => {}
    }
}

fn handle_form_mode(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Esc => {
            state.cancel_form();
            return;
        }
        KeyCode::Enter => {
            state.submit_form();
            return;
        }
        _ => {}
    }

    let Some(form) = &mut state.form else {
        return;
    };

    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
        KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.prev(),

        KeyCode::Left => match form.focus {
            // Selector rows cycle; text rows move the cursor.
            FormFocus::Status => form.status = form.status.next().next(),
            FormFocus::Priority => form.priority = form.priority.next().next(),
            FormFocus::Name => form.name.move_left(),
            FormFocus::Due => form.due.move_left(),
            FormFocus::Description => form.description.move_left(),
            FormFocus::Image => form.image.move_left(),
        },
        KeyCode::Right => match form.focus {
            FormFocus::Status => form.status = form.status.next(),
            FormFocus::Priority => form.priority = form.priority.next(),
            FormFocus::Name => form.name.move_right(),
            FormFocus::Due => form.due.move_right(),
            FormFocus::Description => form.description.move_right(),
            FormFocus::Image => form.image.move_right(),
        },

        KeyCode::Backspace => match form.focus {
            FormFocus::Name => form.name.backspace(),
            FormFocus::Due => form.due.backspace(),
            FormFocus::Description => form.description.backspace(),
            FormFocus::Image => form.image.backspace(),
            FormFocus::Status | FormFocus::Priority => {}
        },
        KeyCode::Home => match form.focus {
            FormFocus::Name => form.name.home(),
            FormFocus::Due => form.due.home(),
            FormFocus::Description => form.description.home(),
            FormFocus::Image => form.image.home(),
            FormFocus::Status | FormFocus::Priority => {}
        },
        KeyCode::End => match form.focus {
            FormFocus::Name => form.name.end(),
            FormFocus::Due => form.due.end(),
            FormFocus::Description => form.description.end(),
            FormFocus::Image => form.image.end(),
            FormFocus::Status | FormFocus::Priority => {}
        },

        KeyCode::Char(c) => match form.focus {
            FormFocus::Name => form.name.insert(c),
            FormFocus::Due => form.due.insert(c),
            FormFocus::Description => form.description.insert(c),
            FormFocus::Image => form.image.insert(c),
            // Space also cycles the selector rows.
            FormFocus::Status if c == ' ' => form.status = form.status.next(),
            FormFocus::Priority if c == ' ' => form.priority = form.priority.next(),
            FormFocus::Status | FormFocus::Priority => {}
        },

        _ => {}
    }
}

fn handle_confirm_delete_mode(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => state.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => state.cancel_delete(),
        _ => {}
    }
}

fn handle_search_mode(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Esc => state.cancel_search(),
        KeyCode::Enter => state.commit_search(),
        KeyCode::Backspace => state.search_input.backspace(),
        KeyCode::Left => state.search_input.move_left(),
        KeyCode::Right => state.search_input.move_right(),
        KeyCode::Home => state.search_input.home(),
        KeyCode::End => state.search_input.end(),
        KeyCode::Char(c) => state.search_input.insert(c),
        _ => {}
    }
}
