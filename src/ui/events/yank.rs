//! Yank (copy) handlers: line-based yanking from the Response tab

use super::helpers::{apply, log_debug};
use crate::actions::AppAction;
use crate::state::AppState;
use crate::types::RequestOutcome;
use crate::ui::draw::render_payload;
use arboard::Clipboard;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Yank the currently selected response line to the system clipboard
pub fn handle_yank_response_line(state: Arc<RwLock<AppState>>) {
    let value_to_copy = {
        let state_read = state.read().unwrap();

        let Some(RequestOutcome::Success { payload, .. }) = &state_read.request.outcome else {
            log_debug("No success response to yank from");
            return;
        };

        let formatted = render_payload(payload);
        let lines: Vec<&str> = formatted.lines().collect();

        // Lines in the response view: [status line, empty line, ...body...]
        let selected_line_idx = state_read.ui.response_selected_line;
        if selected_line_idx < 2 {
            log_debug("Cursor on header lines, nothing to yank");
            return;
        }

        let body_line_idx = selected_line_idx - 2;
        if body_line_idx >= lines.len() {
            log_debug(&format!(
                "Line index {body_line_idx} out of bounds ({} body lines)",
                lines.len()
            ));
            return;
        }

        extract_json_value(lines[body_line_idx])
    };

    match Clipboard::new() {
        Ok(mut clipboard) => match clipboard.set_text(value_to_copy.clone()) {
            Ok(_) => {
                log_debug(&format!("Yanked: {value_to_copy}"));
                apply(state.clone(), AppAction::SetYankFlash(true));

                // clear the flash after a short delay
                let state_clone = state.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(400)).await;
                    apply(state_clone, AppAction::SetYankFlash(false));
                });
            }
            Err(e) => log_debug(&format!("Clipboard write failed: {e}")),
        },
        Err(e) => log_debug(&format!("Clipboard unavailable: {e}")),
    }
}

/// Copy just the value out of a `"key": value` line where possible
fn extract_json_value(line: &str) -> String {
    let trimmed = line.trim();

    let value_part = match trimmed.split_once(':') {
        Some((key, value)) if key.trim_start().starts_with('"') => value.trim(),
        _ => trimmed,
    };

    value_part
        .trim_end_matches(',')
        .trim_matches('"')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_value_from_key_value_line() {
        assert_eq!(extract_json_value(r#"  "name": "Flowers Foods","#), "Flowers Foods");
        assert_eq!(extract_json_value(r#"  "org_id": 100003273517,"#), "100003273517");
    }

    #[test]
    fn test_extract_plain_line() {
        assert_eq!(extract_json_value("  }"), "}");
        assert_eq!(extract_json_value(r#"  "standalone""#), "standalone");
    }
}
