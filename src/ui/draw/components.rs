//! Reusable UI components: header, search bar, footer, loading and empty states

use crate::state::AppState;
use crate::types::{InputMode, LoadingState, PanelFocus, PlaygroundTab, SessionStatus};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the header: catalog title, endpoint count, load state, session badge
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let endpoint_count: usize = state
        .data
        .categories
        .iter()
        .map(|c| c.endpoints.len())
        .sum();

    let status_text = match &state.data.loading_state {
        LoadingState::Idle => "Idle".to_string(),
        LoadingState::Fetching => "Fetching...".to_string(),
        LoadingState::Parsing => "Parsing...".to_string(),
        LoadingState::Complete => format!("{endpoint_count} endpoints"),
        LoadingState::Error(_) => "Error".to_string(),
    };

    let session_badge = match state.session.status {
        SessionStatus::Ok => {
            if state.session.token.is_some() {
                Span::styled("session ✓", Style::default().fg(Color::Green))
            } else {
                Span::styled("no session", Style::default().fg(Color::DarkGray))
            }
        }
        SessionStatus::Expired => Span::styled("session expired", Style::default().fg(Color::Red)),
        SessionStatus::Forbidden => Span::styled("forbidden", Style::default().fg(Color::Red)),
    };

    let mut title = state.data.title.clone();
    if let Some(version) = &state.data.version {
        title.push_str(&format!(" v{version}"));
    }

    let line = Line::from(vec![
        Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("[{status_text}]"), Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        session_badge,
    ]);

    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Render the search bar under the header
pub fn render_search_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let searching = state.input.mode == InputMode::Searching;

    let content = if state.search.query.is_empty() && !searching {
        Line::from(Span::styled(
            "Press [/] to search endpoints",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let cursor = if searching { "▊" } else { "" };
        Line::from(vec![
            Span::styled("/ ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{}{cursor}", state.search.query)),
        ])
    };

    let border_color = if searching {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let bar = Paragraph::new(content).block(
        Block::default()
            .title("Search")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(bar, area);
}

/// Footer with context-sensitive keybindings
pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let text = match state.input.mode {
        InputMode::Searching => "Type to filter | Enter: Keep filter | Esc: Clear | Ctrl+L: Reset",
        InputMode::EnteringAuth => "Tab: Switch field | Enter: Save | Esc: Cancel",
        InputMode::EnteringConfig => "Tab: Switch field | Enter: Save | Esc: Cancel",
        InputMode::EnteringToken => "Enter: Save token | Esc: Cancel",
        InputMode::ConfirmClearToken => "y: Clear token | n/Esc: Keep",
        InputMode::Normal => match state.ui.panel_focus {
            PanelFocus::Endpoints => {
                "j/k: Navigate | Enter: Expand/Select | Space: Send | /: Search | a: Auth | ,: Config | t: Token | q: Quit"
            }
            PanelFocus::Docs => {
                "Ctrl+d/u: Scroll | 1/2/3: Panels | Space: Send | a: Auth | q: Quit"
            }
            PanelFocus::Playground => match state.ui.playground_tab {
                PlaygroundTab::Request => {
                    "Tab: Next tab | j/k: Params | e: Edit | h/l: Scenario | Space: Send | a: Auth"
                }
                PlaygroundTab::Response => {
                    "Tab: Next tab | h/l: Status tab | j/k: Line | y: Yank | Ctrl+d/u: Scroll"
                }
                PlaygroundTab::Headers => "Tab: Next tab | Ctrl+d/u: Scroll | Space: Send",
            },
        },
    };

    let footer = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Commands"));
    frame.render_widget(footer, area);
}

/// Render the loading spinner while fetching/parsing the catalog
pub fn render_loading_spinner(
    frame: &mut Frame,
    area: Rect,
    loading_state: &LoadingState,
    spinner_index: usize,
) {
    let spinner = ["⠋", "⠙", "⠹", "⠸"];
    let progress_text = match loading_state {
        LoadingState::Fetching => "Loading catalog",
        LoadingState::Parsing => "Projecting endpoints",
        _ => "",
    };
    let loading_text = format!(
        "{} {}\n\nPlease wait...",
        spinner[spinner_index % spinner.len()],
        progress_text
    );
    let loading = Paragraph::new(loading_text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("[1] Endpoints"));
    frame.render_widget(loading, area);
}

pub fn render_error_message(frame: &mut Frame, area: Rect, error: &str, retry_count: u32) {
    let retry_text = if retry_count > 0 {
        format!("\n\nRetry attempt: {retry_count}")
    } else {
        String::new()
    };
    let error_msg = format!("❌ {error}{retry_text}\n\nPress [Ctrl+R] to retry");
    let error_widget = Paragraph::new(error_msg)
        .style(Style::default().fg(Color::Red))
        .block(Block::default().borders(Borders::ALL).title("[1] Endpoints"));
    frame.render_widget(error_widget, area);
}

pub fn render_empty_message(frame: &mut Frame, area: Rect) {
    let empty = Paragraph::new("No endpoints in catalog")
        .block(Block::default().borders(Borders::ALL).title("[1] Endpoints"));
    frame.render_widget(empty, area);
}

pub fn render_no_search_results(frame: &mut Frame, area: Rect) {
    let empty = Paragraph::new("No endpoints match the search\n\nPress [Esc] to clear")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title("[1] Endpoints"));
    frame.render_widget(empty, area);
}
