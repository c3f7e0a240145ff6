//! Playground tab rendering: request, response and headers

use super::styling;
use crate::request::resolve_parameters;
use crate::state::AppState;
use crate::types::{ApiParameter, PlaygroundTab, RequestEditMode, RequestOutcome};
use crate::utils::mask_secret;
use serde_json::Value;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Render the Request tab: credentials summary, scenario picker or editable
/// query parameters, and a preview of what one send would put on the wire
pub fn render_request_tab(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(endpoint) = &state.request.selected else {
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(
            endpoint.method.clone(),
            Style::default()
                .fg(styling::get_method_color(&endpoint.method))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::raw(endpoint.path.clone()),
    ]));
    lines.push(Line::from(""));

    // ===== Credentials =====
    lines.push(Line::from(Span::styled(
        "Authentication:",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    let credentials = &state.request.credentials;
    if endpoint.uses_api_key() {
        let shown = if credentials.api_key.is_empty() {
            "<not set>".to_string()
        } else {
            mask_secret(&credentials.api_key)
        };
        lines.push(Line::from(vec![
            Span::raw("  API key: "),
            Span::styled(shown, Style::default().fg(Color::Green)),
        ]));
    } else {
        let user = if credentials.username.is_empty() {
            "<not set>".to_string()
        } else {
            credentials.username.clone()
        };
        let pass = if credentials.password.is_empty() {
            "<not set>".to_string()
        } else {
            mask_secret(&credentials.password)
        };
        lines.push(Line::from(vec![
            Span::raw("  Username: "),
            Span::styled(user, Style::default().fg(Color::Green)),
        ]));
        lines.push(Line::from(vec![
            Span::raw("  Password: "),
            Span::styled(pass, Style::default().fg(Color::Green)),
        ]));
    }
    lines.push(Line::from(Span::styled(
        "  [a] edit credentials",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    // ===== Scenario picker or editable parameters =====
    if !endpoint.examples.is_empty() {
        lines.push(Line::from(Span::styled(
            "Example scenario:",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));

        let chosen = state.request.chosen_scenario.as_deref();
        for example in &endpoint.examples {
            let is_chosen = chosen == Some(example.scenario.as_str());
            let marker = if is_chosen { "→ " } else { "  " };
            let style = if is_chosen {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(styling::default_fg())
            };
            lines.push(Line::from(Span::styled(
                format!("{marker}{}", example.scenario),
                style,
            )));
        }
        lines.push(Line::from(""));

        // the chosen scenario's literal parameter mapping, pretty-printed
        if let Some(example) = chosen.and_then(|name| endpoint.find_scenario(name)) {
            let rendered = serde_json::to_string_pretty(&example.parameters)
                .unwrap_or_else(|_| "{}".to_string());
            for line in rendered.lines() {
                lines.push(Line::from(Span::styled(
                    format!("  {line}"),
                    Style::default().fg(Color::Yellow),
                )));
            }
            lines.push(Line::from(""));
        }
    } else {
        let query_params = endpoint.query_params();
        if query_params.is_empty() {
            lines.push(Line::from(Span::styled(
                "No parameters defined for this endpoint",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(""));
        } else {
            lines.push(Line::from(Span::styled(
                "Query Parameters:",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));

            for (idx, param) in query_params.iter().enumerate() {
                let is_selected = state.ui.selected_param_index == idx;
                let is_editing = matches!(
                    &state.request.edit_mode,
                    RequestEditMode::Editing(name) if name == &param.name
                );

                let current_value = if is_editing {
                    state.request.param_edit_buffer.as_str()
                } else {
                    state.request.config.get(&param.name).unwrap_or("")
                };

                lines.push(build_param_line(param, current_value, is_selected, is_editing));
            }
            lines.push(Line::from(""));
        }
    }

    // ===== Wire preview =====
    let resolved = resolve_parameters(
        endpoint,
        state.request.chosen_scenario.as_deref(),
        &state.request.config,
    );
    lines.push(Line::from(Span::styled(
        "Preview:",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    if endpoint.is_get() {
        lines.push(Line::from(Span::styled(
            preview_query_url(&endpoint.path, &resolved),
            Style::default().fg(Color::Yellow),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            endpoint.path.clone(),
            Style::default().fg(Color::Yellow),
        )));
        let body: serde_json::Map<String, serde_json::Value> = resolved
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();
        let rendered = serde_json::to_string_pretty(&serde_json::Value::Object(body))
            .unwrap_or_else(|_| "{}".to_string());
        for line in rendered.lines() {
            lines.push(Line::from(Span::styled(
                format!("  {line}"),
                Style::default().fg(Color::Yellow),
            )));
        }
    }

    // ===== Help text =====
    lines.push(Line::from(""));
    let help_text = match &state.request.edit_mode {
        RequestEditMode::Viewing => {
            if endpoint.examples.is_empty() {
                "j/k: Navigate  |  e: Edit parameter  |  Space: Send"
            } else {
                "h/l: Switch scenario  |  Space: Send"
            }
        }
        RequestEditMode::Editing(_) => "Type to edit  |  Enter: Confirm  |  Esc: Cancel",
    };
    lines.push(Line::from(Span::styled(
        help_text,
        Style::default().fg(Color::DarkGray),
    )));

    let content = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(content, area);
}

/// Render the Response tab: pending indicator, live outcome, or the catalog's
/// example payload for the active status tab
pub fn render_response_tab(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(endpoint) = &state.request.selected else {
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    // Status tab bar from the endpoint's declared statuses
    let tabs = endpoint.status_tabs();
    if !tabs.is_empty() {
        let mut spans = Vec::new();
        for status in &tabs {
            let is_active = state.ui.active_status_tab == *status;
            let style = if is_active {
                Style::default()
                    .fg(Color::Black)
                    .bg(status_color(status))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(status_color(status))
            };
            spans.push(Span::styled(format!(" {status} "), style));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    if state.request.in_flight {
        lines.push(Line::from(Span::styled(
            "⏳ Sending request...",
            Style::default().fg(Color::Cyan),
        )));
    } else if let Some(outcome) = &state.request.outcome {
        render_outcome_lines(&mut lines, outcome, state);
    } else {
        // no live outcome yet: show the catalog's example for the active tab
        let example = match state.ui.active_status_tab.as_str() {
            "200" => endpoint.success_example(),
            status => endpoint.response_example(status),
        };
        match example {
            Some(payload) => {
                lines.push(Line::from(Span::styled(
                    "Example response:",
                    Style::default().fg(Color::DarkGray),
                )));
                lines.push(Line::from(""));
                let rendered = serde_json::to_string_pretty(payload)
                    .unwrap_or_else(|_| payload.to_string());
                for line in rendered.lines() {
                    lines.push(Line::from(Span::raw(line.to_string())));
                }
            }
            None => {
                lines.push(Line::from(Span::styled(
                    "Press [Space] to send the request",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
    }

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((state.ui.response_scroll as u16, 0));
    frame.render_widget(content, area);
}

fn render_outcome_lines(lines: &mut Vec<Line>, outcome: &RequestOutcome, state: &AppState) {
    match outcome {
        RequestOutcome::Failure {
            status, message, ..
        } => {
            let status_text = if *status > 0 {
                format!("❌ Error {status}")
            } else {
                "❌ Error".to_string()
            };
            lines.push(Line::from(Span::styled(
                status_text,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            for part in message.lines() {
                lines.push(Line::from(Span::styled(
                    part.to_string(),
                    Style::default().fg(Color::Red),
                )));
            }
        }
        RequestOutcome::Success {
            status, payload, ..
        } => {
            lines.push(Line::from(vec![
                Span::styled("Status: ", Style::default().fg(Color::Cyan)),
                Span::styled(format!("{status}"), Style::default().fg(Color::Green)),
                Span::raw("  "),
                Span::styled("Duration: ", Style::default().fg(Color::Cyan)),
                Span::raw(format!("{}ms", outcome.duration().as_millis())),
            ]));
            lines.push(Line::from(""));

            let rendered = render_payload(payload);
            for (idx, line) in rendered.lines().enumerate() {
                // body lines start after status + blank line
                let total_line_idx = idx + 2;
                let line_style = if state.ui.playground_tab == PlaygroundTab::Response
                    && state.ui.response_selected_line == total_line_idx
                {
                    if state.ui.yank_flash {
                        Style::default()
                            .bg(Color::Green)
                            .fg(Color::Black)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().bg(Color::DarkGray)
                    }
                } else {
                    Style::default()
                };
                lines.push(Line::from(Span::styled(line.to_string(), line_style)));
            }
        }
    }
}

/// Render the Headers tab: response headers of the last live outcome
pub fn render_headers_tab(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(outcome) = &state.request.outcome {
        let headers = outcome.headers();
        if !headers.is_empty() {
            let mut header_vec: Vec<_> = headers.iter().collect();
            header_vec.sort_by_key(|(k, _)| k.as_str());

            for (key, value) in header_vec {
                lines.push(Line::from(vec![
                    Span::styled(format!("{key}: "), Style::default().fg(Color::Cyan)),
                    Span::raw(value.to_string()),
                ]));
            }
        } else {
            lines.push(Line::from(Span::styled(
                "No headers",
                Style::default().fg(Color::DarkGray),
            )));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "No response yet",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((state.ui.headers_scroll as u16, 0));
    frame.render_widget(content, area);
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Body lines exactly as the yank handler sees them: plain-text bodies stay
/// plain, everything else is pretty-printed JSON
pub fn render_payload(payload: &Value) -> String {
    match payload {
        Value::String(text) => try_format_json(text),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

fn status_color(status: &str) -> Color {
    if status.starts_with('2') {
        Color::Green
    } else {
        Color::Red
    }
}

/// Path plus resolved query pairs, for the GET preview line
fn preview_query_url(path: &str, resolved: &[(String, String)]) -> String {
    if resolved.is_empty() {
        return path.to_string();
    }
    let pairs: Vec<String> = resolved
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect();
    format!("{path}?{}", pairs.join("&"))
}

fn build_param_line(
    param: &ApiParameter,
    current_value: &str,
    is_selected: bool,
    is_editing: bool,
) -> Line<'static> {
    let type_info = param.schema_type.as_deref().unwrap_or("string");
    let required_str = if param.required { "*" } else { "" };
    let indicator = if is_selected { "→ " } else { "  " };

    let value_display = if is_editing {
        format!("[{current_value}▊]")
    } else if current_value.is_empty() {
        "[_____]".to_string()
    } else {
        format!("[{current_value}]")
    };

    let indicator_style = if is_selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let name_style = if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let value_style = if is_editing {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if is_selected {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Gray)
    };

    Line::from(vec![
        Span::styled(indicator.to_string(), indicator_style),
        Span::styled(format!("{}{required_str}: ", param.name), name_style),
        Span::styled(value_display, value_style),
        Span::raw("  "),
        Span::styled(format!("({type_info})"), Style::default().fg(Color::DarkGray)),
    ])
}

/// Attempts to pretty-print JSON, returns original string if not valid JSON
pub fn try_format_json(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => serde_json::to_string_pretty(&json).unwrap_or_else(|_| body.to_string()),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_query_url() {
        assert_eq!(preview_query_url("/orgs", &[]), "/orgs");
        assert_eq!(
            preview_query_url(
                "/orgs",
                &[
                    ("a".to_string(), "1".to_string()),
                    ("b".to_string(), "2".to_string())
                ]
            ),
            "/orgs?a=1&b=2"
        );
    }

    #[test]
    fn test_try_format_json_passthrough_for_plain_text() {
        assert_eq!(try_format_json("not json"), "not json");
    }

    #[test]
    fn test_try_format_json_pretty_prints() {
        let formatted = try_format_json(r#"{"a":1}"#);
        assert!(formatted.contains("\n"));
        assert!(formatted.contains("\"a\": 1"));
    }
}
