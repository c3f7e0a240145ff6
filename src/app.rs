use crate::catalog;
use crate::config::Config;
use crate::session::SessionClient;
use crate::state::AppState;
use crate::types::{InputMode, SessionStatus};
use crate::ui::{self, draw, EventOutcome};
use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::ListState,
    DefaultTerminal, Frame,
};
use std::sync::{Arc, RwLock};
use std::time::Instant;

#[derive(Debug)]
pub struct App {
    state: Arc<RwLock<AppState>>,
    list_state: ListState,
    config: Config,
    session_client: SessionClient,
    spinner_index: usize,
    last_tick: Instant,
    event_handler: ui::EventHandler,
}

impl Default for App {
    fn default() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        let config = Config::load().unwrap_or_default();
        let session_client = SessionClient::new(config.session.token.clone());

        let mut state = AppState::default();
        state.session.token = config.session.token.clone();

        Self {
            state: Arc::new(RwLock::new(state)),
            list_state,
            config,
            session_client,
            spinner_index: 0,
            last_tick: Instant::now(),
            event_handler: ui::EventHandler::new(),
        }
    }
}

impl App {
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        // Initial catalog load
        self.fetch_catalog();

        // Main UI loop
        while !self.event_handler.should_quit {
            // Update spinner animation
            if self.last_tick.elapsed().as_millis() > 100 {
                self.spinner_index = (self.spinner_index + 1) % 4;
                self.last_tick = Instant::now();
            }

            terminal.draw(|frame| self.draw(frame))?;

            let outcome = self.event_handler.handle_events(
                Arc::clone(&self.state),
                &mut self.list_state,
                self.config.gateway.base_url.clone(),
                self.config.gateway.catalog_url.clone(),
            )?;

            self.process_outcome(outcome)?;
        }

        Ok(())
    }

    /// Persist and act on cross-cutting event results
    fn process_outcome(&mut self, outcome: EventOutcome) -> Result<()> {
        if let Some(submission) = outcome.config_submitted {
            self.config
                .set_gateway(submission.base_url, submission.catalog_url)?;
            self.fetch_catalog();
        }

        if let Some(token) = outcome.token_submitted {
            self.config.set_token(Some(token.clone()))?;
            {
                let mut s = self.state.write().unwrap();
                s.session.token = Some(token.clone());
                s.session.status = SessionStatus::Ok;
            }
            self.session_client = SessionClient::new(Some(token));
            self.fetch_catalog();
        }

        if outcome.token_cleared {
            self.config.set_token(None)?;
            self.session_client = SessionClient::new(None);
        }

        if outcome.should_fetch {
            self.fetch_catalog();
        }

        Ok(())
    }

    fn fetch_catalog(&self) {
        catalog::load_catalog_background(
            Arc::clone(&self.state),
            self.config.catalog_source(),
            self.session_client.clone(),
        );
    }

    fn draw(&mut self, frame: &mut Frame) {
        let state = self.state.read().unwrap();

        // Header, search bar, three-column body, footer
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Search bar
                Constraint::Min(0),    // Body
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(28), // Endpoints
                Constraint::Percentage(42), // Docs
                Constraint::Percentage(30), // Playground
            ])
            .split(main_chunks[2]);

        draw::render_header(frame, main_chunks[0], &state);
        draw::render_search_bar(frame, main_chunks[1], &state);

        draw::render_endpoints_panel(
            frame,
            body_chunks[0],
            &state,
            self.spinner_index,
            &mut self.list_state,
        );
        draw::render_docs_panel(frame, body_chunks[1], &state);
        draw::render_playground_panel(frame, body_chunks[2], &state);

        draw::render_footer(frame, main_chunks[3], &state);

        // Modals render last, over everything else
        match state.input.mode {
            InputMode::EnteringAuth => draw::render_auth_modal(frame, &state),
            InputMode::EnteringConfig => draw::render_config_modal(frame, &state),
            InputMode::EnteringToken => draw::render_token_modal(frame, &state),
            InputMode::ConfirmClearToken => draw::render_clear_confirmation_modal(frame),
            InputMode::Normal | InputMode::Searching => {}
        }
    }
}
