//! Selection and request execution handlers
//!
//! Enter on the endpoints panel expands/collapses a category or selects an
//! endpoint; Space fires the playground request; Ctrl+R retries a failed
//! catalog load.

use super::helpers::{apply, log_debug};
use super::navigation::clamp_selection;
use crate::actions::AppAction;
use crate::request::execute_request_background;
use crate::state::AppState;
use crate::types::{LoadingState, RenderItem};
use ratatui::widgets::ListState;
use std::sync::{Arc, RwLock};

/// Handle Enter on the endpoints panel
pub fn handle_enter(
    selected_index: &mut usize,
    state: Arc<RwLock<AppState>>,
    list_state: &mut ListState,
) {
    let item = {
        let state_read = state.read().unwrap();
        state_read.render_items().get(*selected_index).cloned()
    };

    match item {
        Some(RenderItem::CategoryHeader { name, .. }) => {
            log_debug(&format!("Toggling category: {name}"));
            apply(state.clone(), AppAction::ToggleCategory(name));

            // collapsing may have shortened the list
            let state_read = state.read().unwrap();
            clamp_selection(selected_index, &state_read, list_state);
        }
        Some(RenderItem::Endpoint { .. }) => {
            let endpoint = {
                let state_read = state.read().unwrap();
                state_read.endpoint_at(*selected_index).cloned()
            };
            if let Some(endpoint) = endpoint {
                log_debug(&format!("Selected: {} {}", endpoint.method, endpoint.path));
                apply(state, AppAction::SelectEndpoint(endpoint));
            }
        }
        None => {}
    }
}

/// Handle Space: fire one request for the selected endpoint.
/// The send control is disabled while a request is pending; missing
/// configuration surfaces as an error outcome in the response panel.
pub fn handle_send(state: Arc<RwLock<AppState>>, config_base_url: Option<String>) {
    let base_url = {
        let state_read = state.read().unwrap();

        if state_read.request.selected.is_none() {
            log_debug("No endpoint selected, nothing to send");
            return;
        }
        if state_read.request.in_flight {
            log_debug("Request already in flight, send disabled");
            return;
        }

        config_base_url.or_else(|| state_read.data.server_url.clone())
    };

    match base_url {
        Some(base) => execute_request_background(state, base),
        None => {
            apply(
                state,
                AppAction::SetErrorOutcome(
                    "Base URL not configured. Press [,] to set one".to_string(),
                ),
            );
        }
    }
}

/// Handle retry after a failed catalog load (Ctrl+R)
pub fn handle_retry(state: Arc<RwLock<AppState>>) -> bool {
    let state_read = state.read().unwrap();
    if matches!(state_read.data.loading_state, LoadingState::Error(_)) {
        drop(state_read);

        if let Ok(mut s) = state.write() {
            s.data.retry_count += 1;
        }

        return true; // Signal that we should fetch
    }
    false // Don't fetch if not in error state
}
