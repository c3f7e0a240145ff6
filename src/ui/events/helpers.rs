//! Helper functions for event handling

use crate::actions::{apply_action, AppAction};
use crate::state::AppState;
use crate::types::RequestEditMode;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use std::sync::{Arc, RwLock};

pub use crate::utils::log_debug;

/// Apply a single action to state
pub fn apply(state: Arc<RwLock<AppState>>, action: AppAction) {
    let mut s = state.write().unwrap();
    apply_action(action, &mut s);
}

/// Check if currently editing a parameter
pub fn is_editing(state: &Arc<RwLock<AppState>>) -> bool {
    let state_read = state.read().unwrap();
    matches!(state_read.request.edit_mode, RequestEditMode::Editing(_))
}

/// Collect a batch of characters for paste support
///
/// When a character is typed, this function checks for any immediately
/// available character events and batches them together. This enables fast
/// paste operations in terminals.
pub fn collect_paste_batch(initial_char: char) -> String {
    let mut chars = vec![initial_char];

    while let Ok(true) = event::poll(std::time::Duration::from_millis(0)) {
        if let Ok(Event::Key(next_key)) = event::read() {
            match next_key.code {
                KeyCode::Char(next_c) if !next_key.modifiers.contains(KeyModifiers::CONTROL) => {
                    chars.push(next_c);
                }
                _ => {
                    // Non-character or control key, stop batching
                    break;
                }
            }
        } else {
            break;
        }
    }

    chars.into_iter().collect()
}
