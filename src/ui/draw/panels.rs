//! Main panel rendering: endpoints list, docs, playground shell

use super::components::{
    render_empty_message, render_error_message, render_loading_spinner, render_no_search_results,
};
use super::styling::{self, get_method_color};
use super::tabs::{render_headers_tab, render_request_tab, render_response_tab};
use crate::state::AppState;
use crate::types::{LoadingState, PanelFocus, PlaygroundTab, RenderItem, SecurityScheme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Render the left panel with the categorized endpoint list
pub fn render_endpoints_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    spinner_index: usize,
    list_state: &mut ListState,
) {
    match &state.data.loading_state {
        LoadingState::Fetching | LoadingState::Parsing => {
            render_loading_spinner(frame, area, &state.data.loading_state, spinner_index);
        }
        LoadingState::Error(error) => {
            render_error_message(frame, area, error, state.data.retry_count);
        }
        LoadingState::Complete | LoadingState::Idle => {
            if state.active_categories().is_empty() {
                if !state.search.query.is_empty() {
                    render_no_search_results(frame, area);
                } else {
                    render_empty_message(frame, area);
                }
            } else {
                render_category_list(frame, area, state, list_state);
            }
        }
    }
}

fn render_category_list(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    list_state: &mut ListState,
) {
    let mut items = Vec::new();
    let render_items = state.render_items();

    for item in &render_items {
        match item {
            RenderItem::CategoryHeader {
                name,
                count,
                expanded,
            } => {
                let icon = if *expanded { "▼" } else { "▶" };
                let line = Line::from(vec![Span::styled(
                    format!("{icon} {name} ({count})"),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )]);
                items.push(ListItem::new(line));
            }
            RenderItem::Endpoint { category, index } => {
                let Some(endpoint) = state
                    .active_categories()
                    .get(*category)
                    .and_then(|c| c.endpoints.get(*index))
                else {
                    continue;
                };

                let marker = if state.is_selected(endpoint) {
                    "● "
                } else {
                    "  "
                };
                let method_color = get_method_color(&endpoint.method);

                let line = Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Cyan)),
                    Span::styled(
                        format!("{:7}", endpoint.method),
                        Style::default()
                            .fg(method_color)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" "),
                    Span::raw(endpoint.path.clone()),
                ]);

                items.push(ListItem::new(line));
            }
        }
    }

    let border_color = if state.ui.panel_focus == PanelFocus::Endpoints {
        styling::focused_border()
    } else {
        styling::unfocused_border()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(
                    "[1] Endpoints - {} categories",
                    state.active_categories().len()
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    frame.render_stateful_widget(list, area, list_state);
}

/// Render the middle panel: documentation for the selected endpoint
pub fn render_docs_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let border_color = if state.ui.panel_focus == PanelFocus::Docs {
        styling::focused_border()
    } else {
        styling::unfocused_border()
    };

    let block = Block::default()
        .title("[2] Docs")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let Some(endpoint) = &state.request.selected else {
        let empty = Paragraph::new("Select an endpoint to view its documentation")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner_area);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(
            endpoint.method.clone(),
            Style::default()
                .fg(get_method_color(&endpoint.method))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::raw(endpoint.path.clone()),
    ]));
    lines.push(Line::from(""));

    if let Some(summary) = &endpoint.summary {
        lines.push(Line::from(Span::styled(
            summary.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    if let Some(description) = &endpoint.description {
        for part in description.lines() {
            lines.push(Line::from(Span::raw(part.trim().to_string())));
        }
        lines.push(Line::from(""));
    }

    if !endpoint.security.is_empty() {
        let labels: Vec<&str> = endpoint.security.iter().map(SecurityScheme::label).collect();
        lines.push(Line::from(vec![
            Span::styled("Auth: ", Style::default().fg(Color::Cyan)),
            Span::raw(labels.join(", ")),
        ]));
        lines.push(Line::from(""));
    }

    if !endpoint.parameters.is_empty() {
        lines.push(Line::from(Span::styled(
            "Parameters:",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));

        for param in &endpoint.parameters {
            let required = if param.required { " *" } else { "" };
            let type_info = param.schema_type.as_deref().unwrap_or("string");

            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {}{required}", param.name),
                    Style::default().fg(Color::Magenta),
                ),
                Span::styled(format!("  ({type_info})"), Style::default().fg(Color::DarkGray)),
            ]));

            if let Some(description) = &param.description {
                lines.push(Line::from(Span::styled(
                    format!("    {description}"),
                    Style::default().fg(styling::default_fg()),
                )));
            }
            if let Some(example) = &param.example {
                lines.push(Line::from(Span::styled(
                    format!("    Example: {example}"),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        lines.push(Line::from(""));
    }

    if let Some(body) = &endpoint.request_body {
        lines.push(Line::from(Span::styled(
            "Request Body:",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        if let Some(description) = &body.description {
            lines.push(Line::from(Span::raw(format!("  {description}"))));
        }
        if let Some(content_type) = body.content_type() {
            lines.push(Line::from(Span::styled(
                format!("  Content type: {content_type}"),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((state.ui.docs_scroll as u16, 0));
    frame.render_widget(content, inner_area);
}

/// Render the right panel: playground tabs and their content
pub fn render_playground_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let border_color = if state.ui.panel_focus == PanelFocus::Playground {
        styling::focused_border()
    } else {
        styling::unfocused_border()
    };

    let block = Block::default()
        .title("[3] Playground")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(0),    // Content area
        ])
        .split(inner_area);

    render_tab_bar(frame, chunks[0], state);

    if state.request.selected.is_some() {
        match state.ui.playground_tab {
            PlaygroundTab::Request => render_request_tab(frame, chunks[1], state),
            PlaygroundTab::Response => render_response_tab(frame, chunks[1], state),
            PlaygroundTab::Headers => render_headers_tab(frame, chunks[1], state),
        }
    } else {
        let empty =
            Paragraph::new("No endpoint selected").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, chunks[1]);
    }
}

/// Render the tab bar showing [ Request ] [ Response ] [ Headers ]
fn render_tab_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let active_tab = &state.ui.playground_tab;

    let tab_style = |tab: PlaygroundTab| {
        if *active_tab == tab {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(styling::default_fg())
        }
    };

    let response_label = if state.request.in_flight {
        "Response (...)"
    } else {
        "Response"
    };

    let tabs = Line::from(vec![
        Span::styled("[ ", Style::default().fg(Color::DarkGray)),
        Span::styled("Request", tab_style(PlaygroundTab::Request)),
        Span::styled(" ] [ ", Style::default().fg(Color::DarkGray)),
        Span::styled(response_label, tab_style(PlaygroundTab::Response)),
        Span::styled(" ] [ ", Style::default().fg(Color::DarkGray)),
        Span::styled("Headers", tab_style(PlaygroundTab::Headers)),
        Span::styled(" ]", Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Paragraph::new(tabs), area);
}
