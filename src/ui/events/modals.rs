//! Modal input handlers: credentials, gateway config, session token

use super::helpers::{apply, collect_paste_batch, log_debug};
use super::ConfigSubmission;
use crate::actions::{apply_action, AppAction};
use crate::config::validate_url;
use crate::state::AppState;
use crate::types::SessionStatus;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::{Arc, RwLock};

/// Open the credentials dialog ('a')
pub fn handle_auth_dialog(state: Arc<RwLock<AppState>>) {
    apply(state, AppAction::EnterAuthMode);
}

/// Open the gateway config dialog (','), prefilled with the current values
pub fn handle_config_dialog(
    state: Arc<RwLock<AppState>>,
    base_url: Option<String>,
    catalog_url: Option<String>,
) {
    let mut s = state.write().unwrap();
    apply_action(AppAction::EnterConfigMode, &mut s);
    s.input.base_url_input = base_url.unwrap_or_default();
    s.input.catalog_url_input = catalog_url.unwrap_or_default();
}

/// Open the session token dialog ('t'); with a stored token, ask for
/// confirmation to clear it instead
pub fn handle_token_dialog(state: Arc<RwLock<AppState>>) {
    let has_token = {
        let s = state.read().unwrap();
        s.session.token.is_some()
    };
    if has_token {
        apply(state, AppAction::EnterConfirmClearToken);
    } else {
        apply(state, AppAction::EnterTokenMode);
    }
}

pub fn handle_auth_input(key: KeyEvent, state: Arc<RwLock<AppState>>) -> Result<()> {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab => {
            apply(state, AppAction::NextAuthField);
        }
        KeyCode::Enter => {
            apply(state, AppAction::SubmitAuth);
            log_debug("Credentials saved");
        }
        KeyCode::Esc => {
            apply(state, AppAction::ExitAuthMode);
        }
        KeyCode::Backspace => {
            apply(state, AppAction::BackspaceAuthField);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let batch = collect_paste_batch(c);
            apply(state, AppAction::AppendToAuthField(batch));
        }
        _ => {}
    }
    Ok(())
}

pub fn handle_config_input(
    key: KeyEvent,
    state: Arc<RwLock<AppState>>,
) -> Result<Option<ConfigSubmission>> {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab => {
            apply(state, AppAction::NextConfigField);
        }
        KeyCode::Enter => {
            let (base_url, catalog_url) = {
                let s = state.read().unwrap();
                (
                    s.input.base_url_input.trim().to_string(),
                    s.input.catalog_url_input.trim().to_string(),
                )
            };

            for url in [&base_url, &catalog_url] {
                if !url.is_empty() {
                    if let Err(e) = validate_url(url) {
                        log_debug(&format!("Rejected URL '{url}': {e}"));
                        return Ok(None);
                    }
                }
            }

            apply(state, AppAction::ExitConfigMode);
            return Ok(Some(ConfigSubmission {
                base_url: Some(base_url).filter(|u| !u.is_empty()),
                catalog_url: Some(catalog_url).filter(|u| !u.is_empty()),
            }));
        }
        KeyCode::Esc => {
            apply(state, AppAction::ExitConfigMode);
        }
        KeyCode::Backspace => {
            apply(state, AppAction::BackspaceConfigField);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let batch = collect_paste_batch(c);
            apply(state, AppAction::AppendToConfigField(batch));
        }
        _ => {}
    }
    Ok(None)
}

pub fn handle_token_input(key: KeyEvent, state: Arc<RwLock<AppState>>) -> Result<Option<String>> {
    match key.code {
        KeyCode::Enter => {
            let token = {
                let s = state.read().unwrap();
                s.input.token_input.trim().to_string()
            };
            apply(state, AppAction::ExitTokenMode);
            if !token.is_empty() {
                return Ok(Some(token));
            }
        }
        KeyCode::Esc => {
            apply(state, AppAction::ExitTokenMode);
        }
        KeyCode::Backspace => {
            apply(state, AppAction::BackspaceTokenInput);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let batch = collect_paste_batch(c);
            apply(state, AppAction::AppendToTokenInput(batch));
        }
        _ => {}
    }
    Ok(None)
}

/// Returns true when the stored token was cleared
pub fn handle_clear_confirmation(key: KeyEvent, state: Arc<RwLock<AppState>>) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            let mut s = state.write().unwrap();
            s.session.token = None;
            s.session.status = SessionStatus::Ok;
            apply_action(AppAction::ExitConfirmClearToken, &mut s);
            log_debug("Session token cleared");
            Ok(true)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            apply(state, AppAction::ExitConfirmClearToken);
            Ok(false)
        }
        _ => Ok(false),
    }
}
