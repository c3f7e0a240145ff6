use crate::catalog::project::{filter_categories, Category};
use crate::types::{
    ApiEndpoint, AuthField, ConfigField, Credentials, InputMode, LoadingState, PanelFocus,
    PlaygroundTab, RenderItem, RequestConfig, RequestEditMode, RequestOutcome, SessionStatus,
};
use std::collections::HashSet;

/// Everything the UI renders, owned behind one Arc<RwLock<..>> shared with the
/// background tasks. Grouped by concern; the playground's transient state
/// lives in `request` and is reset wholesale on selection change.
#[derive(Debug, Clone)]
pub struct AppState {
    pub data: DataState,
    pub search: SearchState,
    pub ui: UiState,
    pub request: RequestState,
    pub input: InputState,
    pub session: SessionState,
}

/// Catalog data as loaded and projected
#[derive(Debug, Clone)]
pub struct DataState {
    pub title: String,
    pub version: Option<String>,
    /// Gateway base URL declared by the catalog
    pub server_url: Option<String>,
    pub categories: Vec<Category>,
    pub loading_state: LoadingState,
    pub retry_count: u32,
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    /// Projection filtered by `query`, rebuilt on every query change
    pub filtered: Vec<Category>,
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub panel_focus: PanelFocus,
    pub playground_tab: PlaygroundTab,
    pub expanded_categories: HashSet<String>,
    /// Status key of the response tab bar ("200", "422", ...)
    pub active_status_tab: String,
    pub selected_param_index: usize,
    pub docs_scroll: usize,
    pub response_scroll: usize,
    pub headers_scroll: usize,
    /// Cursor line in the response body, for yanking
    pub response_selected_line: usize,
    pub yank_flash: bool,
}

/// Transient per-selection playground state
#[derive(Debug, Clone)]
pub struct RequestState {
    pub selected: Option<ApiEndpoint>,
    /// Bumped on every selection change; in-flight responses carrying an older
    /// generation are dropped instead of mutating display state
    pub generation: u64,
    pub chosen_scenario: Option<String>,
    pub config: RequestConfig,
    /// Credentials survive selection changes
    pub credentials: Credentials,
    pub edit_mode: RequestEditMode,
    pub param_edit_buffer: String,
    pub in_flight: bool,
    pub outcome: Option<RequestOutcome>,
}

/// Modal input buffers
#[derive(Debug, Clone)]
pub struct InputState {
    pub mode: InputMode,
    pub auth_field: AuthField,
    pub auth_username: String,
    pub auth_password: String,
    pub auth_api_key: String,
    pub config_field: ConfigField,
    pub base_url_input: String,
    pub catalog_url_input: String,
    pub token_input: String,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub token: Option<String>,
    pub status: SessionStatus,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            data: DataState {
                title: "API Catalog".to_string(),
                version: None,
                server_url: None,
                categories: Vec::new(),
                loading_state: LoadingState::Idle,
                retry_count: 0,
            },
            search: SearchState::default(),
            ui: UiState {
                panel_focus: PanelFocus::Endpoints,
                playground_tab: PlaygroundTab::Request,
                expanded_categories: HashSet::new(),
                active_status_tab: "200".to_string(),
                selected_param_index: 0,
                docs_scroll: 0,
                response_scroll: 0,
                headers_scroll: 0,
                response_selected_line: 0,
                yank_flash: false,
            },
            request: RequestState {
                selected: None,
                generation: 0,
                chosen_scenario: None,
                config: RequestConfig::default(),
                credentials: Credentials::default(),
                edit_mode: RequestEditMode::Viewing,
                param_edit_buffer: String::new(),
                in_flight: false,
                outcome: None,
            },
            input: InputState {
                mode: InputMode::Normal,
                auth_field: AuthField::Username,
                auth_username: String::new(),
                auth_password: String::new(),
                auth_api_key: String::new(),
                config_field: ConfigField::BaseUrl,
                base_url_input: String::new(),
                catalog_url_input: String::new(),
                token_input: String::new(),
            },
            session: SessionState {
                token: None,
                status: SessionStatus::Ok,
            },
        }
    }
}

impl AppState {
    /// Categories currently shown: the filtered projection while a search
    /// query is active, the full projection otherwise
    pub fn active_categories(&self) -> &[Category] {
        if self.search.query.is_empty() {
            &self.data.categories
        } else {
            &self.search.filtered
        }
    }

    /// Rebuild the filtered projection after the query or catalog changed
    pub fn refresh_filtered(&mut self) {
        self.search.filtered = filter_categories(&self.data.categories, &self.search.query);
    }

    /// Flatten the active categories into list rows, honoring expansion
    pub fn render_items(&self) -> Vec<RenderItem> {
        let mut items = Vec::new();
        for (category_idx, category) in self.active_categories().iter().enumerate() {
            let expanded = self.ui.expanded_categories.contains(&category.name);
            items.push(RenderItem::CategoryHeader {
                name: category.name.clone(),
                count: category.endpoints.len(),
                expanded,
            });
            if expanded {
                for index in 0..category.endpoints.len() {
                    items.push(RenderItem::Endpoint {
                        category: category_idx,
                        index,
                    });
                }
            }
        }
        items
    }

    pub fn endpoint_at(&self, item_index: usize) -> Option<&ApiEndpoint> {
        match self.render_items().get(item_index)? {
            RenderItem::Endpoint { category, index } => self
                .active_categories()
                .get(*category)
                .and_then(|c| c.endpoints.get(*index)),
            RenderItem::CategoryHeader { .. } => None,
        }
    }

    /// Make `endpoint` the selection and wipe every piece of per-endpoint
    /// transient state in the same mutation, so nothing stale survives.
    /// Credentials intentionally persist.
    pub fn select_endpoint(&mut self, endpoint: ApiEndpoint) {
        self.request.generation = self.request.generation.wrapping_add(1);
        self.request.config = RequestConfig::default();
        self.request.chosen_scenario = endpoint.examples.first().map(|e| e.scenario.clone());
        self.request.outcome = None;
        self.request.in_flight = false;
        self.request.edit_mode = RequestEditMode::Viewing;
        self.request.param_edit_buffer.clear();

        self.ui.selected_param_index = 0;
        self.ui.active_status_tab = "200".to_string();
        self.ui.docs_scroll = 0;
        self.ui.response_scroll = 0;
        self.ui.headers_scroll = 0;
        self.ui.response_selected_line = 0;
        self.ui.yank_flash = false;

        self.request.selected = Some(endpoint);
    }

    /// After a catalog load: select the first endpoint of the first category
    /// if nothing is selected yet, and expand that category
    pub fn ensure_default_selection(&mut self) {
        if self.request.selected.is_some() {
            return;
        }
        if let Some(first_category) = self.data.categories.first() {
            self.ui
                .expanded_categories
                .insert(first_category.name.clone());
            if let Some(first) = first_category.endpoints.first() {
                let endpoint = first.clone();
                self.select_endpoint(endpoint);
            }
        }
    }

    /// Whether the list row endpoint is the current selection
    pub fn is_selected(&self, endpoint: &ApiEndpoint) -> bool {
        self.request
            .selected
            .as_ref()
            .is_some_and(|s| s.key() == endpoint.key())
    }
}

/// Helper function to count visible items in the endpoints panel
pub fn count_visible_items(state: &AppState) -> usize {
    state.render_items().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{project_catalog, CatalogSpec};
    use crate::types::bare_endpoint;

    fn loaded_state() -> AppState {
        let spec: CatalogSpec = serde_json::from_str(
            r#"{"paths": [{
                "First": [
                    {"/first/a": {"post": {
                        "summary": "A",
                        "example": [{"scenario": "S1", "parameters": {"q": "1"}}],
                        "responses": {"200": {"message": "Success"}}
                    }}},
                    {"/first/b": {"get": {"summary": "B"}}}
                ],
                "Second": [
                    {"/second/c": {"get": {"summary": "C"}}}
                ]
            }]}"#,
        )
        .unwrap();

        let mut state = AppState::default();
        state.data.categories = project_catalog(&spec);
        state.refresh_filtered();
        state
    }

    #[test]
    fn test_default_selection_is_first_of_first_category() {
        let mut state = loaded_state();
        state.ensure_default_selection();

        let selected = state.request.selected.as_ref().unwrap();
        assert_eq!(selected.path, "/first/a");
        assert_eq!(selected.method, "POST");
        // first category is expanded for the list
        assert!(state.ui.expanded_categories.contains("First"));
        // scenario defaults to the first declared one
        assert_eq!(state.request.chosen_scenario.as_deref(), Some("S1"));
    }

    #[test]
    fn test_default_selection_does_not_steal_an_existing_one() {
        let mut state = loaded_state();
        state.select_endpoint(bare_endpoint("GET", "/second/c"));
        state.ensure_default_selection();
        assert_eq!(state.request.selected.as_ref().unwrap().path, "/second/c");
    }

    #[test]
    fn test_select_endpoint_resets_transient_state() {
        let mut state = loaded_state();
        state.ensure_default_selection();

        // dirty every piece of per-endpoint state
        state
            .request
            .config
            .set("q".to_string(), "stale".to_string());
        state.request.outcome = Some(RequestOutcome::transport_error(
            "old".to_string(),
            std::time::Duration::ZERO,
        ));
        state.request.in_flight = true;
        state.request.edit_mode = RequestEditMode::Editing("q".to_string());
        state.request.param_edit_buffer = "half-typed".to_string();
        state.ui.active_status_tab = "422".to_string();
        state.ui.response_scroll = 12;
        state.ui.selected_param_index = 3;
        state.request.credentials.username = "u".to_string();

        let generation_before = state.request.generation;
        state.select_endpoint(bare_endpoint("GET", "/second/c"));

        assert!(state.request.config.values.is_empty());
        assert!(state.request.outcome.is_none());
        assert!(!state.request.in_flight);
        assert_eq!(state.request.edit_mode, RequestEditMode::Viewing);
        assert!(state.request.param_edit_buffer.is_empty());
        assert_eq!(state.ui.active_status_tab, "200");
        assert_eq!(state.ui.response_scroll, 0);
        assert_eq!(state.ui.selected_param_index, 0);
        // no scenarios on the new endpoint
        assert!(state.request.chosen_scenario.is_none());
        // generation advanced, so an in-flight response is now stale
        assert!(state.request.generation > generation_before);
        // credentials survive
        assert_eq!(state.request.credentials.username, "u");
    }

    #[test]
    fn test_render_items_honor_expansion() {
        let mut state = loaded_state();
        state.ui.expanded_categories.insert("Second".to_string());

        let items = state.render_items();
        // two headers, one expanded category with one endpoint
        assert_eq!(items.len(), 3);
        assert!(matches!(
            items[0],
            RenderItem::CategoryHeader { expanded: false, .. }
        ));
        assert!(matches!(
            items[2],
            RenderItem::Endpoint { category: 1, index: 0 }
        ));
    }

    #[test]
    fn test_endpoint_at_resolves_rows() {
        let mut state = loaded_state();
        state.ui.expanded_categories.insert("First".to_string());

        assert!(state.endpoint_at(0).is_none()); // header row
        assert_eq!(state.endpoint_at(1).unwrap().path, "/first/a");
        assert_eq!(state.endpoint_at(2).unwrap().path, "/first/b");
    }

    #[test]
    fn test_active_categories_switch_with_query() {
        let mut state = loaded_state();
        assert_eq!(state.active_categories().len(), 2);

        state.search.query = "second".to_string();
        state.refresh_filtered();
        assert_eq!(state.active_categories().len(), 1);
        assert_eq!(state.active_categories()[0].name, "Second");

        state.search.query.clear();
        assert_eq!(state.active_categories().len(), 2);
    }

    #[test]
    fn test_count_visible_items() {
        let mut state = loaded_state();
        assert_eq!(count_visible_items(&state), 2); // collapsed headers only

        state.ui.expanded_categories.insert("First".to_string());
        assert_eq!(count_visible_items(&state), 4);
    }
}
