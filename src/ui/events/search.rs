//! Search handlers: activating search mode, live filtering, clearing

use super::helpers::{apply, log_debug};
use crate::actions::AppAction;
use crate::state::AppState;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::widgets::ListState;
use std::sync::{Arc, RwLock};

/// Activate search mode
pub fn handle_search_activate(state: Arc<RwLock<AppState>>) {
    apply(state, AppAction::EnterSearchMode);
}

/// Handle key input while searching
pub fn handle_search_input(
    selected_index: &mut usize,
    key: crossterm::event::KeyEvent,
    state: Arc<RwLock<AppState>>,
    list_state: &mut ListState,
) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            // Exit search mode and keep the filter active
            apply(state, AppAction::ExitSearchMode { clear: false });
            log_debug("Exiting search mode (keeping filter)");
        }
        KeyCode::Esc => {
            // Exit search mode and clear the filter
            apply(state.clone(), AppAction::ExitSearchMode { clear: true });
            log_debug("Exiting search mode (cleared filter)");
            reset_cursor(selected_index, list_state);
        }
        KeyCode::Backspace => {
            apply(state.clone(), AppAction::BackspaceSearch);
            reset_cursor(selected_index, list_state);
        }
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state.clone(), AppAction::ClearSearch);
            reset_cursor(selected_index, list_state);
        }
        KeyCode::Char(c) => {
            apply(state.clone(), AppAction::AppendToSearch(c.to_string()));
            reset_cursor(selected_index, list_state);
        }
        _ => {}
    }
    Ok(())
}

/// Clear an active search filter from normal mode (Ctrl+L)
pub fn handle_search_clear(
    selected_index: &mut usize,
    state: Arc<RwLock<AppState>>,
    list_state: &mut ListState,
) {
    let has_query = {
        let s = state.read().unwrap();
        !s.search.query.is_empty()
    };
    if has_query {
        apply(state, AppAction::ClearSearch);
        log_debug("Cleared search filter");
        reset_cursor(selected_index, list_state);
    }
}

// Filtering reorders the visible rows, so the cursor restarts at the top
fn reset_cursor(selected_index: &mut usize, list_state: &mut ListState) {
    *selected_index = 0;
    list_state.select(Some(0));
}
