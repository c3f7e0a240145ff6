//! List cursor movement for the endpoints panel

use crate::state::{count_visible_items, AppState};
use ratatui::widgets::ListState;
use std::sync::{Arc, RwLock};

pub fn handle_up(
    selected_index: &mut usize,
    _state: Arc<RwLock<AppState>>,
    list_state: &mut ListState,
) {
    if *selected_index > 0 {
        *selected_index -= 1;
        list_state.select(Some(*selected_index));
    }
}

pub fn handle_down(
    selected_index: &mut usize,
    state: Arc<RwLock<AppState>>,
    list_state: &mut ListState,
) {
    let max_index = {
        let s = state.read().unwrap();
        count_visible_items(&s).saturating_sub(1)
    };

    if *selected_index < max_index {
        *selected_index += 1;
        list_state.select(Some(*selected_index));
    }
}

/// Clamp the cursor after the visible row count shrank (collapse, filter)
pub fn clamp_selection(
    selected_index: &mut usize,
    state: &AppState,
    list_state: &mut ListState,
) {
    let visible = count_visible_items(state);
    if *selected_index >= visible {
        *selected_index = visible.saturating_sub(1);
        list_state.select(Some(*selected_index));
    }
}
