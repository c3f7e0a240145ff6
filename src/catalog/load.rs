use crate::catalog::project::project_catalog;
use crate::catalog::spec::CatalogSpec;
use crate::session::{SessionClient, SessionError};
use crate::state::AppState;
use crate::types::{LoadingState, SessionStatus};
use crate::utils::log_debug;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Catalog shipped with the binary, used when no URL or file is configured
pub static EMBEDDED_CATALOG: &str = include_str!("../../assets/catalog.json");

#[derive(Debug, Clone)]
pub enum CatalogSource {
    Embedded,
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    pub fn describe(&self) -> String {
        match self {
            CatalogSource::Embedded => "embedded catalog".to_string(),
            CatalogSource::File(path) => path.display().to_string(),
            CatalogSource::Url(url) => url.clone(),
        }
    }
}

enum LoadError {
    Session(SessionError),
    Io(String),
}

/// Spawns a background task that loads, parses and projects the catalog,
/// then installs the result into shared state
pub fn load_catalog_background(
    state: Arc<RwLock<AppState>>,
    source: CatalogSource,
    client: SessionClient,
) {
    if let Ok(mut s) = state.write() {
        s.data.loading_state = LoadingState::Fetching;
    }

    tokio::spawn(async move {
        log_debug(&format!("Loading catalog from {}", source.describe()));

        let raw = match fetch_raw(&source, &client).await {
            Ok(raw) => raw,
            Err(err) => {
                fail(&state, err);
                return;
            }
        };

        if let Ok(mut s) = state.write() {
            s.data.loading_state = LoadingState::Parsing;
        }

        match serde_json::from_str::<CatalogSpec>(&raw) {
            Ok(spec) => {
                let categories = project_catalog(&spec);
                log_debug(&format!("Projected {} categories", categories.len()));

                if let Ok(mut s) = state.write() {
                    s.data.title = spec.title().to_string();
                    s.data.version = spec
                        .info
                        .as_ref()
                        .and_then(|i| i.version.clone());
                    s.data.server_url = spec.server_url().map(str::to_string);
                    s.data.categories = categories;
                    s.data.loading_state = LoadingState::Complete;
                    s.data.retry_count = 0;
                    s.refresh_filtered();
                    s.ensure_default_selection();
                }
            }
            Err(e) => {
                if let Ok(mut s) = state.write() {
                    s.data.loading_state = LoadingState::Error(format!("Parse error: {e}"));
                }
            }
        }
    });
}

async fn fetch_raw(source: &CatalogSource, client: &SessionClient) -> Result<String, LoadError> {
    match source {
        CatalogSource::Embedded => Ok(EMBEDDED_CATALOG.to_string()),
        CatalogSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| LoadError::Io(format!("Failed to read {}: {e}", path.display()))),
        CatalogSource::Url(url) => client
            .get_text(url)
            .await
            .map_err(LoadError::Session),
    }
}

fn fail(state: &Arc<RwLock<AppState>>, err: LoadError) {
    if let Ok(mut s) = state.write() {
        match err {
            LoadError::Session(SessionError::Unauthorized) => {
                // token no longer valid; drop it and ask for a new one
                s.session.status = SessionStatus::Expired;
                s.session.token = None;
                s.data.loading_state = LoadingState::Error(
                    "Session expired (401). Press [t] to enter a new token".to_string(),
                );
            }
            LoadError::Session(SessionError::Forbidden) => {
                s.session.status = SessionStatus::Forbidden;
                s.data.loading_state =
                    LoadingState::Error("Access forbidden (403) by the gateway".to_string());
            }
            LoadError::Session(other) => {
                s.data.loading_state = LoadingState::Error(other.to_string());
            }
            LoadError::Io(msg) => {
                s.data.loading_state = LoadingState::Error(msg);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_parses_and_projects() {
        let spec: CatalogSpec = serde_json::from_str(EMBEDDED_CATALOG).unwrap();
        let categories = project_catalog(&spec);

        assert!(!categories.is_empty());
        assert!(!categories[0].endpoints.is_empty());

        // default selection needs a canonical 200 example on the first endpoint
        let first = &categories[0].endpoints[0];
        assert!(first.success_example().is_some());
        assert!(spec.server_url().is_some());
    }

    #[test]
    fn test_embedded_catalog_declares_both_auth_capabilities() {
        use crate::types::SecurityScheme;

        let spec: CatalogSpec = serde_json::from_str(EMBEDDED_CATALOG).unwrap();
        let categories = project_catalog(&spec);
        let schemes: Vec<&SecurityScheme> = categories
            .iter()
            .flat_map(|c| &c.endpoints)
            .filter_map(|e| e.security.first())
            .collect();

        assert!(schemes.contains(&&SecurityScheme::Basic));
        assert!(schemes.contains(&&SecurityScheme::ApiKey));
    }
}
