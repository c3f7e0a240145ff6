use std::time::Duration;

/// Shared HTTP client for application-internal calls (catalog fetch).
///
/// Attaches the persisted session bearer token to every request and maps
/// gateway auth failures onto dedicated variants so the UI can react
/// (401 clears the session, 403 shows a forbidden notice). This is separate
/// from the playground's own per-request credentials.
#[derive(Debug, Clone)]
pub struct SessionClient {
    client: reqwest::Client,
    token: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    Unauthorized,
    Forbidden,
    Status { status: u16, message: String },
    Transport(String),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Unauthorized => write!(f, "Unauthorized (401)"),
            SessionError::Forbidden => write!(f, "Forbidden (403)"),
            SessionError::Status { status, message } => {
                if message.is_empty() {
                    write!(f, "HTTP {status}")
                } else {
                    write!(f, "HTTP {status}: {message}")
                }
            }
            SessionError::Transport(msg) => write!(f, "Network error: {msg}"),
        }
    }
}

impl SessionClient {
    pub fn new(token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client, token }
    }

    pub async fn get_text(&self, url: &str) -> Result<String, SessionError> {
        let mut request = self
            .client
            .get(url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SessionError::Transport(e.to_string()))?;

        match response.status().as_u16() {
            401 => Err(SessionError::Unauthorized),
            403 => Err(SessionError::Forbidden),
            status if status >= 400 => {
                let message = response.text().await.unwrap_or_default();
                Err(SessionError::Status { status, message })
            }
            _ => response
                .text()
                .await
                .map_err(|e| SessionError::Transport(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(SessionError::Unauthorized.to_string(), "Unauthorized (401)");
        assert_eq!(
            SessionError::Status {
                status: 502,
                message: String::new()
            }
            .to_string(),
            "HTTP 502"
        );
        assert_eq!(
            SessionError::Transport("connection refused".to_string()).to_string(),
            "Network error: connection refused"
        );
    }
}
