//! Event handling
//!
//! Processes user input and translates it into state-changing actions.
//! Input modes:
//! - Normal: navigation, selection, send
//! - Searching: live endpoint filtering
//! - EnteringAuth / EnteringConfig / EnteringToken: modal text entry
//! - Parameter editing: inline editing inside the Request tab
//!
//! Key events generate `AppAction`s applied to `AppState` through
//! `actions::apply_action`; the few cross-cutting results (persist config,
//! persist token, reload catalog) are reported back to the app loop via
//! `EventOutcome`.

mod execution;
mod helpers;
mod modals;
mod navigation;
mod parameters;
mod search;
mod yank;

use crate::actions::AppAction;
use crate::state::AppState;
use crate::types::{InputMode, PanelFocus, PlaygroundTab};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use helpers::{apply, collect_paste_batch};
use ratatui::widgets::ListState;
use std::sync::{Arc, RwLock};

/// Gateway URLs submitted from the config modal
#[derive(Debug, Clone)]
pub struct ConfigSubmission {
    pub base_url: Option<String>,
    pub catalog_url: Option<String>,
}

/// Cross-cutting results of one event round, handled by the app loop
#[derive(Debug, Default)]
pub struct EventOutcome {
    pub should_fetch: bool,
    pub config_submitted: Option<ConfigSubmission>,
    pub token_submitted: Option<String>,
    pub token_cleared: bool,
}

/// Event handler for managing user input and state updates
#[derive(Debug)]
pub struct EventHandler {
    pub should_quit: bool,
    pub selected_index: usize,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            selected_index: 0,
        }
    }

    /// Main event dispatch - routes to the handler for the active input mode
    pub fn handle_events(
        &mut self,
        state: Arc<RwLock<AppState>>,
        list_state: &mut ListState,
        base_url: Option<String>,
        catalog_url: Option<String>,
    ) -> Result<EventOutcome> {
        let mut outcome = EventOutcome::default();

        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                let input_mode = state.read().unwrap().input.mode.clone();

                match input_mode {
                    InputMode::Searching => {
                        search::handle_search_input(
                            &mut self.selected_index,
                            key,
                            state.clone(),
                            list_state,
                        )?;
                    }
                    InputMode::EnteringAuth => {
                        modals::handle_auth_input(key, state.clone())?;
                    }
                    InputMode::EnteringConfig => {
                        outcome.config_submitted =
                            modals::handle_config_input(key, state.clone())?;
                    }
                    InputMode::EnteringToken => {
                        outcome.token_submitted = modals::handle_token_input(key, state.clone())?;
                    }
                    InputMode::ConfirmClearToken => {
                        outcome.token_cleared =
                            modals::handle_clear_confirmation(key, state.clone())?;
                    }
                    InputMode::Normal => {
                        self.handle_normal_mode(
                            key,
                            state.clone(),
                            list_state,
                            base_url,
                            catalog_url,
                            &mut outcome,
                        );
                    }
                }
            }
        }
        Ok(outcome)
    }

    fn handle_normal_mode(
        &mut self,
        key: crossterm::event::KeyEvent,
        state: Arc<RwLock<AppState>>,
        list_state: &mut ListState,
        base_url: Option<String>,
        catalog_url: Option<String>,
        outcome: &mut EventOutcome,
    ) {
        // While a parameter is being edited, keys go to the edit buffer
        if helpers::is_editing(&state) {
            match key.code {
                KeyCode::Enter => apply(state, AppAction::ConfirmParameterEdit),
                KeyCode::Esc => apply(state, AppAction::CancelParameterEdit),
                KeyCode::Backspace => apply(state, AppAction::BackspaceParamBuffer),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    let batch = collect_paste_batch(c);
                    apply(state, AppAction::AppendToParamBuffer(batch));
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }

            // ctrl-modified first so plain character arms below don't shadow them
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                outcome.should_fetch = execution::handle_retry(state);
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                search::handle_search_clear(&mut self.selected_index, state, list_state);
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                apply(state, AppAction::ScrollUp);
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                apply(state, AppAction::ScrollDown);
            }

            KeyCode::Char('/') => {
                search::handle_search_activate(state);
            }
            KeyCode::Char('a') => {
                modals::handle_auth_dialog(state);
            }
            KeyCode::Char(',') => {
                modals::handle_config_dialog(state, base_url, catalog_url);
            }
            KeyCode::Char('t') => {
                modals::handle_token_dialog(state);
            }

            KeyCode::Char('1') => {
                apply(state, AppAction::FocusPanel(PanelFocus::Endpoints));
            }
            KeyCode::Char('2') => {
                apply(state, AppAction::FocusPanel(PanelFocus::Docs));
            }
            KeyCode::Char('3') => {
                apply(state, AppAction::FocusPanel(PanelFocus::Playground));
            }

            KeyCode::Tab => {
                if self.playground_focused(&state) {
                    apply(state, AppAction::NextTab);
                } else {
                    apply(state, AppAction::FocusPanel(PanelFocus::Playground));
                }
            }
            KeyCode::BackTab => {
                if self.playground_focused(&state) {
                    apply(state, AppAction::PrevTab);
                } else {
                    apply(state, AppAction::FocusPanel(PanelFocus::Playground));
                }
            }

            KeyCode::Char('j') | KeyCode::Down => {
                self.route_vertical(state, list_state, 1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.route_vertical(state, list_state, -1);
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.route_horizontal(state, -1);
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.route_horizontal(state, 1);
            }

            KeyCode::Char('e') => {
                let (panel, tab) = focus_and_tab(&state);
                if panel == PanelFocus::Playground && tab == PlaygroundTab::Request {
                    parameters::handle_param_edit(state);
                }
            }
            KeyCode::Char('y') => {
                let (panel, tab) = focus_and_tab(&state);
                if panel == PanelFocus::Playground && tab == PlaygroundTab::Response {
                    yank::handle_yank_response_line(state);
                }
            }

            KeyCode::Enter => {
                let (panel, _) = focus_and_tab(&state);
                if panel == PanelFocus::Endpoints {
                    execution::handle_enter(&mut self.selected_index, state, list_state);
                }
            }
            KeyCode::Char(' ') => {
                execution::handle_send(state, base_url);
            }

            _ => {}
        }
    }

    fn playground_focused(&self, state: &Arc<RwLock<AppState>>) -> bool {
        state.read().unwrap().ui.panel_focus == PanelFocus::Playground
    }

    /// j/k routing depends on which panel and tab has focus
    fn route_vertical(
        &mut self,
        state: Arc<RwLock<AppState>>,
        list_state: &mut ListState,
        step: isize,
    ) {
        let (panel, tab) = focus_and_tab(&state);
        match panel {
            PanelFocus::Endpoints => {
                if step > 0 {
                    navigation::handle_down(&mut self.selected_index, state, list_state);
                } else {
                    navigation::handle_up(&mut self.selected_index, state, list_state);
                }
            }
            PanelFocus::Docs => {
                let action = if step > 0 {
                    AppAction::ScrollDown
                } else {
                    AppAction::ScrollUp
                };
                apply(state, action);
            }
            PanelFocus::Playground => match tab {
                PlaygroundTab::Request => {
                    let has_scenarios = {
                        let s = state.read().unwrap();
                        s.request
                            .selected
                            .as_ref()
                            .is_some_and(|e| !e.examples.is_empty())
                    };
                    let action = match (has_scenarios, step > 0) {
                        (true, true) => AppAction::NextScenario,
                        (true, false) => AppAction::PrevScenario,
                        (false, true) => AppAction::NavigateParamDown,
                        (false, false) => AppAction::NavigateParamUp,
                    };
                    apply(state, action);
                }
                PlaygroundTab::Response => {
                    let action = if step > 0 {
                        AppAction::ResponseLineDown
                    } else {
                        AppAction::ResponseLineUp
                    };
                    apply(state, action);
                }
                PlaygroundTab::Headers => {
                    let action = if step > 0 {
                        AppAction::ScrollDown
                    } else {
                        AppAction::ScrollUp
                    };
                    apply(state, action);
                }
            },
        }
    }

    /// h/l switch the scenario on the Request tab and the status tab on the
    /// Response tab
    fn route_horizontal(&mut self, state: Arc<RwLock<AppState>>, step: isize) {
        let (panel, tab) = focus_and_tab(&state);
        if panel != PanelFocus::Playground {
            return;
        }
        let action = match (tab, step > 0) {
            (PlaygroundTab::Request, true) => AppAction::NextScenario,
            (PlaygroundTab::Request, false) => AppAction::PrevScenario,
            (PlaygroundTab::Response, true) => AppAction::NextStatusTab,
            (PlaygroundTab::Response, false) => AppAction::PrevStatusTab,
            (PlaygroundTab::Headers, _) => return,
        };
        apply(state, action);
    }
}

fn focus_and_tab(state: &Arc<RwLock<AppState>>) -> (PanelFocus, PlaygroundTab) {
    let s = state.read().unwrap();
    (s.ui.panel_focus.clone(), s.ui.playground_tab.clone())
}
