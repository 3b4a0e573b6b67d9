//! Keyboard handling: native events map to the shell's `Key` enum, then
//! route to the prompt line or the palette depending on which is focused.

use lumen_shell::markup::span;
use lumen_types::Key;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app_state::AppState;

/// Map a crossterm key event to a shell key. Returns `None` for keys the
/// terminal does not handle.
pub fn map_key(event: KeyEvent) -> Option<Key> {
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char(c) = event.code {
            return Some(Key::Ctrl(c.to_ascii_lowercase()));
        }
    }
    match event.code {
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

/// Route one key press.
pub fn handle_key(state: &mut AppState, key: Key) {
    if state.palette.is_open() {
        handle_palette_key(state, key);
    } else {
        handle_prompt_key(state, key);
    }
}

fn handle_prompt_key(state: &mut AppState, key: Key) {
    match key {
        Key::Enter => {
            state.session.typing.cancel();
            let value = std::mem::take(&mut state.input_buf);
            state.session.push_history(&value);
            state.dispatch(&value);
        },
        Key::Ctrl('c') => {
            state.session.typing.cancel();
            state.surface.echo_text("^C");
            state.input_buf.clear();
        },
        Key::Ctrl('l') => state.clear_and_banner(),
        Key::Ctrl('k') => {
            state.palette.open(&state.registry);
            state.palette_input.clear();
        },
        Key::Ctrl('q') => state.quit = true,
        Key::Up => {
            if let Some(line) = state.session.history_prev() {
                state.input_buf = line;
            }
        },
        Key::Down => {
            if let Some(line) = state.session.history_next() {
                state.input_buf = line;
            }
        },
        Key::Tab => autocomplete(state),
        Key::Backspace => {
            state.input_buf.pop();
        },
        Key::Char(c) => state.input_buf.push(c),
        Key::Escape | Key::Ctrl(_) => {},
    }
}

/// Tab completion: a single prefix match fills the prompt, several are
/// listed dimly in the output pane.
fn autocomplete(state: &mut AppState) {
    let current = state.input_buf.trim().to_string();
    if current.is_empty() {
        return;
    }
    let matches = state.registry.completions(&current);
    match matches.len() {
        0 => {},
        1 => state.input_buf = format!("{} ", matches[0]),
        _ => state.surface.echo_line(span("dim", &matches.join("  "))),
    }
}

fn handle_palette_key(state: &mut AppState, key: Key) {
    match key {
        Key::Escape | Key::Ctrl('k') => state.palette.close(),
        Key::Ctrl('q') => state.quit = true,
        Key::Up => state.palette.move_up(),
        Key::Down => state.palette.move_down(),
        Key::Enter => {
            let selected = state.palette.selected(&state.registry);
            state.palette.close();
            if let Some(cmd) = selected {
                state.dispatch(&cmd);
            }
        },
        Key::Backspace => {
            state.palette_input.pop();
            state
                .palette
                .set_query(&state.registry, &state.palette_input);
        },
        Key::Char(c) => {
            state.palette_input.push(c);
            state
                .palette
                .set_query(&state.registry, &state.palette_input);
        },
        Key::Tab | Key::Ctrl(_) => {},
    }
}
