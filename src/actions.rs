use crate::state::AppState;
use crate::types::{
    ApiEndpoint, AuthField, ConfigField, InputMode, PanelFocus, PlaygroundTab, RequestEditMode,
    RequestOutcome,
};
use std::time::Duration;

/// State-changing actions. Input handling produces these; `apply_action` is
/// the single place state mutates, which keeps the handlers testable.
#[derive(Debug, Clone)]
pub enum AppAction {
    // Navigation
    FocusPanel(PanelFocus),
    NextTab,
    PrevTab,
    NavigateParamUp,
    NavigateParamDown,
    ScrollUp,
    ScrollDown,
    ResponseLineUp,
    ResponseLineDown,
    NextStatusTab,
    PrevStatusTab,
    ToggleCategory(String),
    SelectEndpoint(ApiEndpoint),

    // Scenario picker
    NextScenario,
    PrevScenario,

    // Search
    EnterSearchMode,
    ExitSearchMode { clear: bool },
    AppendToSearch(String),
    BackspaceSearch,
    ClearSearch,

    // Auth modal (playground credentials)
    EnterAuthMode,
    ExitAuthMode,
    SubmitAuth,
    NextAuthField,
    AppendToAuthField(String),
    BackspaceAuthField,

    // Config modal (gateway base URL + catalog URL)
    EnterConfigMode,
    ExitConfigMode,
    NextConfigField,
    AppendToConfigField(String),
    BackspaceConfigField,

    // Session token modal
    EnterTokenMode,
    ExitTokenMode,
    AppendToTokenInput(String),
    BackspaceTokenInput,
    EnterConfirmClearToken,
    ExitConfirmClearToken,

    // Parameter editing
    StartEditingParameter(String),
    AppendToParamBuffer(String),
    BackspaceParamBuffer,
    ConfirmParameterEdit,
    CancelParameterEdit,

    // Response
    SetErrorOutcome(String),
    SetYankFlash(bool),
}

/// Apply an action to the application state
pub fn apply_action(action: AppAction, state: &mut AppState) {
    match action {
        // Navigation
        AppAction::FocusPanel(panel) => {
            state.ui.panel_focus = panel;
        }
        AppAction::NextTab => {
            state.ui.playground_tab = match state.ui.playground_tab {
                PlaygroundTab::Request => PlaygroundTab::Response,
                PlaygroundTab::Response => PlaygroundTab::Headers,
                PlaygroundTab::Headers => PlaygroundTab::Request,
            };
            state.ui.selected_param_index = 0;
        }
        AppAction::PrevTab => {
            state.ui.playground_tab = match state.ui.playground_tab {
                PlaygroundTab::Request => PlaygroundTab::Headers,
                PlaygroundTab::Response => PlaygroundTab::Request,
                PlaygroundTab::Headers => PlaygroundTab::Response,
            };
            state.ui.selected_param_index = 0;
        }
        AppAction::NavigateParamUp => {
            state.ui.selected_param_index = state.ui.selected_param_index.saturating_sub(1);
        }
        AppAction::NavigateParamDown => {
            let count = state
                .request
                .selected
                .as_ref()
                .map(|e| e.query_params().len())
                .unwrap_or(0);
            if state.ui.selected_param_index + 1 < count {
                state.ui.selected_param_index += 1;
            }
        }
        AppAction::ScrollUp => match (&state.ui.panel_focus, &state.ui.playground_tab) {
            (PanelFocus::Docs, _) => {
                state.ui.docs_scroll = state.ui.docs_scroll.saturating_sub(5);
            }
            (PanelFocus::Playground, PlaygroundTab::Response) => {
                state.ui.response_scroll = state.ui.response_scroll.saturating_sub(5);
            }
            (PanelFocus::Playground, PlaygroundTab::Headers) => {
                state.ui.headers_scroll = state.ui.headers_scroll.saturating_sub(5);
            }
            _ => {}
        },
        AppAction::ScrollDown => match (&state.ui.panel_focus, &state.ui.playground_tab) {
            (PanelFocus::Docs, _) => {
                state.ui.docs_scroll = state.ui.docs_scroll.saturating_add(5);
            }
            (PanelFocus::Playground, PlaygroundTab::Response) => {
                state.ui.response_scroll = state.ui.response_scroll.saturating_add(5);
            }
            (PanelFocus::Playground, PlaygroundTab::Headers) => {
                state.ui.headers_scroll = state.ui.headers_scroll.saturating_add(5);
            }
            _ => {}
        },
        AppAction::ResponseLineUp => {
            state.ui.response_selected_line = state.ui.response_selected_line.saturating_sub(1);
        }
        AppAction::ResponseLineDown => {
            state.ui.response_selected_line = state.ui.response_selected_line.saturating_add(1);
        }
        AppAction::NextStatusTab => {
            cycle_status_tab(state, 1);
        }
        AppAction::PrevStatusTab => {
            cycle_status_tab(state, -1);
        }
        AppAction::ToggleCategory(name) => {
            if state.ui.expanded_categories.contains(&name) {
                state.ui.expanded_categories.remove(&name);
            } else {
                state.ui.expanded_categories.insert(name);
            }
        }
        AppAction::SelectEndpoint(endpoint) => {
            state.select_endpoint(endpoint);
        }

        // Scenario picker
        AppAction::NextScenario => {
            cycle_scenario(state, 1);
        }
        AppAction::PrevScenario => {
            cycle_scenario(state, -1);
        }

        // Search
        AppAction::EnterSearchMode => {
            state.input.mode = InputMode::Searching;
        }
        AppAction::ExitSearchMode { clear } => {
            state.input.mode = InputMode::Normal;
            if clear {
                state.search.query.clear();
                state.refresh_filtered();
            }
        }
        AppAction::AppendToSearch(text) => {
            state.search.query.push_str(&text);
            state.refresh_filtered();
        }
        AppAction::BackspaceSearch => {
            state.search.query.pop();
            state.refresh_filtered();
        }
        AppAction::ClearSearch => {
            state.search.query.clear();
            state.refresh_filtered();
        }

        // Auth modal
        AppAction::EnterAuthMode => {
            state.input.mode = InputMode::EnteringAuth;
            state.input.auth_username = state.request.credentials.username.clone();
            state.input.auth_password = state.request.credentials.password.clone();
            state.input.auth_api_key = state.request.credentials.api_key.clone();
            let api_key = state
                .request
                .selected
                .as_ref()
                .is_some_and(|e| e.uses_api_key());
            state.input.auth_field = if api_key {
                AuthField::ApiKey
            } else {
                AuthField::Username
            };
        }
        AppAction::ExitAuthMode => {
            state.input.mode = InputMode::Normal;
        }
        AppAction::SubmitAuth => {
            state.request.credentials.username = state.input.auth_username.clone();
            state.request.credentials.password = state.input.auth_password.clone();
            state.request.credentials.api_key = state.input.auth_api_key.clone();
            state.input.mode = InputMode::Normal;
        }
        AppAction::NextAuthField => {
            state.input.auth_field = match state.input.auth_field {
                AuthField::Username => AuthField::Password,
                AuthField::Password => AuthField::Username,
                AuthField::ApiKey => AuthField::ApiKey,
            };
        }
        AppAction::AppendToAuthField(text) => {
            active_auth_buffer(state).push_str(&text);
        }
        AppAction::BackspaceAuthField => {
            active_auth_buffer(state).pop();
        }

        // Config modal
        AppAction::EnterConfigMode => {
            state.input.mode = InputMode::EnteringConfig;
            state.input.config_field = ConfigField::BaseUrl;
        }
        AppAction::ExitConfigMode => {
            state.input.mode = InputMode::Normal;
            state.input.base_url_input.clear();
            state.input.catalog_url_input.clear();
        }
        AppAction::NextConfigField => {
            state.input.config_field = match state.input.config_field {
                ConfigField::BaseUrl => ConfigField::CatalogUrl,
                ConfigField::CatalogUrl => ConfigField::BaseUrl,
            };
        }
        AppAction::AppendToConfigField(text) => {
            active_config_buffer(state).push_str(&text);
        }
        AppAction::BackspaceConfigField => {
            active_config_buffer(state).pop();
        }

        // Token modal
        AppAction::EnterTokenMode => {
            state.input.mode = InputMode::EnteringToken;
            state.input.token_input.clear();
        }
        AppAction::ExitTokenMode => {
            state.input.mode = InputMode::Normal;
            state.input.token_input.clear();
        }
        AppAction::AppendToTokenInput(text) => {
            state.input.token_input.push_str(&text);
        }
        AppAction::BackspaceTokenInput => {
            state.input.token_input.pop();
        }
        AppAction::EnterConfirmClearToken => {
            state.input.mode = InputMode::ConfirmClearToken;
        }
        AppAction::ExitConfirmClearToken => {
            state.input.mode = InputMode::Normal;
        }

        // Parameter editing
        AppAction::StartEditingParameter(param_name) => {
            state.request.param_edit_buffer = state
                .request
                .config
                .get(&param_name)
                .unwrap_or("")
                .to_string();
            state.request.edit_mode = RequestEditMode::Editing(param_name);
        }
        AppAction::AppendToParamBuffer(text) => {
            state.request.param_edit_buffer.push_str(&text);
        }
        AppAction::BackspaceParamBuffer => {
            state.request.param_edit_buffer.pop();
        }
        AppAction::ConfirmParameterEdit => {
            if let RequestEditMode::Editing(param_name) = &state.request.edit_mode {
                let name = param_name.clone();
                let value = state.request.param_edit_buffer.clone();
                state.request.config.set(name, value);
            }
            state.request.edit_mode = RequestEditMode::Viewing;
            state.request.param_edit_buffer.clear();
        }
        AppAction::CancelParameterEdit => {
            state.request.edit_mode = RequestEditMode::Viewing;
            state.request.param_edit_buffer.clear();
        }

        // Response
        AppAction::SetErrorOutcome(message) => {
            state.request.outcome =
                Some(RequestOutcome::transport_error(message, Duration::ZERO));
            state.ui.playground_tab = PlaygroundTab::Response;
        }
        AppAction::SetYankFlash(on) => {
            state.ui.yank_flash = on;
        }
    }
}

fn active_auth_buffer(state: &mut AppState) -> &mut String {
    match state.input.auth_field {
        AuthField::Username => &mut state.input.auth_username,
        AuthField::Password => &mut state.input.auth_password,
        AuthField::ApiKey => &mut state.input.auth_api_key,
    }
}

fn active_config_buffer(state: &mut AppState) -> &mut String {
    match state.input.config_field {
        ConfigField::BaseUrl => &mut state.input.base_url_input,
        ConfigField::CatalogUrl => &mut state.input.catalog_url_input,
    }
}

fn cycle_status_tab(state: &mut AppState, step: isize) {
    let Some(endpoint) = &state.request.selected else {
        return;
    };
    let tabs = endpoint.status_tabs();
    if tabs.is_empty() {
        return;
    }

    let current = tabs
        .iter()
        .position(|t| *t == state.ui.active_status_tab)
        .unwrap_or(0) as isize;
    let next = (current + step).rem_euclid(tabs.len() as isize) as usize;
    state.ui.active_status_tab = tabs[next].to_string();
}

fn cycle_scenario(state: &mut AppState, step: isize) {
    let Some(endpoint) = &state.request.selected else {
        return;
    };
    if endpoint.examples.is_empty() {
        return;
    }

    let current = state
        .request
        .chosen_scenario
        .as_deref()
        .and_then(|name| endpoint.examples.iter().position(|e| e.scenario == name))
        .unwrap_or(0) as isize;
    let next = (current + step).rem_euclid(endpoint.examples.len() as isize) as usize;
    state.request.chosen_scenario = Some(endpoint.examples[next].scenario.clone());
}
