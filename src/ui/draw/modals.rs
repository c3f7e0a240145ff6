//! Modal dialogs: credentials, gateway config, session token

use crate::state::AppState;
use crate::types::{AuthField, ConfigField};
use crate::utils::mask_secret;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Centered popup rect
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn field_line(label: &str, value: &str, active: bool, mask: bool) -> Line<'static> {
    let shown = if mask && !value.is_empty() {
        mask_secret(value)
    } else {
        value.to_string()
    };
    let cursor = if active { "▊" } else { "" };
    let style = if active {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::Cyan)),
        Span::styled(format!("{shown}{cursor}"), style),
    ])
}

/// Credentials modal: API key field or username/password, depending on the
/// selected endpoint's declared capability
pub fn render_auth_modal(frame: &mut Frame, state: &AppState) {
    let api_key = state
        .request
        .selected
        .as_ref()
        .is_some_and(|e| e.uses_api_key());

    let area = centered_rect(60, if api_key { 5 } else { 6 }, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = Vec::new();
    if api_key {
        lines.push(field_line(
            "API Key",
            &state.input.auth_api_key,
            state.input.auth_field == AuthField::ApiKey,
            true,
        ));
    } else {
        lines.push(field_line(
            "Username",
            &state.input.auth_username,
            state.input.auth_field == AuthField::Username,
            false,
        ));
        lines.push(field_line(
            "Password",
            &state.input.auth_password,
            state.input.auth_field == AuthField::Password,
            true,
        ));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab: Switch field | Enter: Save | Esc: Cancel",
        Style::default().fg(Color::DarkGray),
    )));

    let modal = Paragraph::new(lines).block(
        Block::default()
            .title("Authentication")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(modal, area);
}

/// Gateway config modal: base URL and optional catalog URL
pub fn render_config_modal(frame: &mut Frame, state: &AppState) {
    let area = centered_rect(70, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        field_line(
            "Base URL",
            &state.input.base_url_input,
            state.input.config_field == ConfigField::BaseUrl,
            false,
        ),
        field_line(
            "Catalog URL",
            &state.input.catalog_url_input,
            state.input.config_field == ConfigField::CatalogUrl,
            false,
        ),
        Line::from(""),
        Line::from(Span::styled(
            "Leave Catalog URL empty to use the embedded catalog",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "Tab: Switch field | Enter: Save | Esc: Cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let modal = Paragraph::new(lines).block(
        Block::default()
            .title("Gateway Configuration")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(modal, area);
}

/// Session token modal
pub fn render_token_modal(frame: &mut Frame, state: &AppState) {
    let area = centered_rect(60, 5, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        field_line("Token", &state.input.token_input, true, true),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: Save | Esc: Cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let modal = Paragraph::new(lines).block(
        Block::default()
            .title("Session Token")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(modal, area);
}

/// Confirmation before clearing the persisted session token
pub fn render_clear_confirmation_modal(frame: &mut Frame) {
    let area = centered_rect(50, 5, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from("Clear the stored session token?"),
        Line::from(""),
        Line::from(Span::styled(
            "y: Clear | n/Esc: Keep",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let modal = Paragraph::new(lines).block(
        Block::default()
            .title("Confirm")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(modal, area);
}
