//! Inline query parameter editing in the Request tab

use super::helpers::{apply, log_debug};
use crate::actions::AppAction;
use crate::state::AppState;
use std::sync::{Arc, RwLock};

/// Start editing the parameter under the cursor ('e' key).
/// Endpoints with example scenarios take their values from the chosen
/// scenario instead, so there is nothing to edit.
pub fn handle_param_edit(state: Arc<RwLock<AppState>>) {
    let param_name = {
        let state_read = state.read().unwrap();
        let Some(endpoint) = &state_read.request.selected else {
            return;
        };
        if !endpoint.examples.is_empty() {
            log_debug("Endpoint uses example scenarios, ad-hoc entry disabled");
            return;
        }

        let params = endpoint.query_params();
        let Some(param) = params.get(state_read.ui.selected_param_index) else {
            return;
        };
        param.name.clone()
    };

    log_debug(&format!("Editing parameter: {param_name}"));
    apply(state, AppAction::StartEditingParameter(param_name));
}
