use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// One (path, method) pair projected out of the catalog, with everything the
/// docs and playground panels need to render it.
#[derive(Debug, Clone)]
pub struct ApiEndpoint {
    pub method: String,
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub parameters: Vec<ApiParameter>,
    pub request_body: Option<RequestBodySpec>,
    /// Example payloads keyed by status, in catalog order
    pub responses: Vec<ResponseExample>,
    pub security: Vec<SecurityScheme>,
    /// Named example scenarios ("example" array in the catalog)
    pub examples: Vec<ExampleScenario>,
}

impl ApiEndpoint {
    /// Get all query parameters for this endpoint
    pub fn query_params(&self) -> Vec<&ApiParameter> {
        self.parameters
            .iter()
            .filter(|p| p.location == "query")
            .collect()
    }

    /// Whether the first declared security capability is an API-key capability
    pub fn uses_api_key(&self) -> bool {
        matches!(self.security.first(), Some(SecurityScheme::ApiKey))
    }

    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET")
    }

    /// Endpoint identity for list highlighting and selection comparison
    pub fn key(&self) -> (&str, &str) {
        (self.path.as_str(), self.method.as_str())
    }

    pub fn response_example(&self, status: &str) -> Option<&Value> {
        self.responses
            .iter()
            .find(|r| r.status == status)
            .map(|r| &r.payload)
    }

    /// The canonical 200 example, if the catalog declares one
    pub fn success_example(&self) -> Option<&Value> {
        self.response_example("200")
    }

    /// Declared status keys in catalog order, for the status tab bar
    pub fn status_tabs(&self) -> Vec<&str> {
        self.responses.iter().map(|r| r.status.as_str()).collect()
    }

    pub fn find_scenario(&self, name: &str) -> Option<&ExampleScenario> {
        self.examples.iter().find(|e| e.scenario == name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiParameter {
    pub name: String,

    #[serde(rename = "in", default)]
    pub location: String, // "query", "header", etc.

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(rename = "type", default)]
    pub schema_type: Option<String>, // "string", "int", "boolean"

    #[serde(default)]
    pub example: Option<String>,
}

/// Request body descriptor, documentation only (the playground sends the
/// resolved parameter mapping as the body for non-GET methods)
#[derive(Debug, Clone, Deserialize)]
pub struct RequestBodySpec {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub content: serde_json::Map<String, Value>,
}

impl RequestBodySpec {
    pub fn content_type(&self) -> Option<&str> {
        self.content.keys().next().map(|k| k.as_str())
    }
}

/// A named, pre-filled set of example parameter values
#[derive(Debug, Clone, Deserialize)]
pub struct ExampleScenario {
    pub scenario: String,

    #[serde(default)]
    pub parameters: serde_json::Map<String, Value>,
}

/// Example payload for one status key ("200", "422", ...)
#[derive(Debug, Clone)]
pub struct ResponseExample {
    pub status: String,
    pub payload: Value,
}

/// Security capability descriptor. The catalog writes these as single-key
/// objects ({"apiKey": []} / {"basicAuth": []}); unknown keys are carried
/// through so the docs panel can still name them.
#[derive(Debug, Clone, PartialEq)]
pub enum SecurityScheme {
    ApiKey,
    Basic,
    Other(String),
}

impl SecurityScheme {
    pub fn from_key(key: &str) -> Self {
        match key {
            "apiKey" => SecurityScheme::ApiKey,
            "basicAuth" => SecurityScheme::Basic,
            other => SecurityScheme::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SecurityScheme::ApiKey => "API key",
            SecurityScheme::Basic => "HTTP basic",
            SecurityScheme::Other(name) => name.as_str(),
        }
    }
}

/// Credentials entered in the auth dialog. Which fields apply depends on the
/// selected endpoint's declared capability.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub api_key: String,
}

/// User-entered query parameter values for the selected endpoint, in entry order
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    pub values: Vec<(String, String)>,
}

impl RequestConfig {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, name: String, value: String) {
        if let Some(entry) = self.values.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.values.push((name, value));
        }
    }
}

/// Outcome of one playground send, replaced wholesale on the next send
#[derive(Debug, Clone)]
pub enum RequestOutcome {
    Success {
        status: u16,
        payload: Value,
        headers: HashMap<String, String>,
        duration: Duration,
    },
    Failure {
        /// 0 when the request never produced an HTTP response
        status: u16,
        message: String,
        headers: HashMap<String, String>,
        duration: Duration,
    },
}

impl RequestOutcome {
    pub fn transport_error(message: String, duration: Duration) -> Self {
        RequestOutcome::Failure {
            status: 0,
            message,
            headers: HashMap::new(),
            duration,
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            RequestOutcome::Success { status, .. } => *status,
            RequestOutcome::Failure { status, .. } => *status,
        }
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        match self {
            RequestOutcome::Success { headers, .. } => headers,
            RequestOutcome::Failure { headers, .. } => headers,
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            RequestOutcome::Success { duration, .. } => *duration,
            RequestOutcome::Failure { duration, .. } => *duration,
        }
    }
}

#[derive(Debug, Clone)]
pub enum LoadingState {
    Idle,
    Fetching,
    Parsing,
    Complete,
    Error(String),
}

/// Session layer status for application-internal calls (catalog fetch)
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    Ok,
    /// 401 from the gateway: token cleared, user must re-enter one
    Expired,
    /// 403 from the gateway
    Forbidden,
}

/// One row of the endpoints panel
#[derive(Debug, Clone, PartialEq)]
pub enum RenderItem {
    CategoryHeader {
        name: String,
        count: usize,
        expanded: bool,
    },
    /// Indices into the active (possibly filtered) category list
    Endpoint {
        category: usize,
        index: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelFocus {
    Endpoints,  // [1] left column
    Docs,       // [2] middle column
    Playground, // [3] right column
}

/// Tabs of the playground panel
#[derive(Debug, Clone, PartialEq)]
pub enum PlaygroundTab {
    Request,
    Response,
    Headers,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Searching,
    EnteringAuth,
    EnteringConfig,
    EnteringToken,
    ConfirmClearToken,
}

/// Which field the auth modal is editing
#[derive(Debug, Clone, PartialEq)]
pub enum AuthField {
    Username,
    Password,
    ApiKey,
}

/// Which field the config modal is editing
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigField {
    BaseUrl,
    CatalogUrl,
}

// For tracking UI state in Request tab
#[derive(Debug, Clone, PartialEq)]
pub enum RequestEditMode {
    // Just navigating, not editing
    Viewing,

    // Editing parameter with this name
    Editing(String),
}

#[cfg(test)]
pub(crate) fn bare_endpoint(method: &str, path: &str) -> ApiEndpoint {
    ApiEndpoint {
        method: method.to_string(),
        path: path.to_string(),
        summary: None,
        description: None,
        parameters: vec![],
        request_body: None,
        responses: vec![],
        security: vec![],
        examples: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_param(name: &str, location: &str, required: bool) -> ApiParameter {
        ApiParameter {
            name: name.to_string(),
            location: location.to_string(),
            description: None,
            required,
            schema_type: None,
            example: None,
        }
    }

    #[test]
    fn test_query_params_filter() {
        let mut endpoint = bare_endpoint("GET", "/orgs");
        endpoint.parameters = vec![
            create_param("company_name", "query", false),
            create_param("x-trace", "header", false),
            create_param("website", "query", false),
        ];

        let query_params = endpoint.query_params();
        assert_eq!(query_params.len(), 2);
        assert_eq!(query_params[0].name, "company_name");
        assert_eq!(query_params[1].name, "website");
    }

    #[test]
    fn test_uses_api_key_checks_first_capability_only() {
        let mut endpoint = bare_endpoint("GET", "/orgs");
        endpoint.security = vec![SecurityScheme::Basic, SecurityScheme::ApiKey];
        assert!(!endpoint.uses_api_key());

        endpoint.security = vec![SecurityScheme::ApiKey];
        assert!(endpoint.uses_api_key());

        endpoint.security = vec![];
        assert!(!endpoint.uses_api_key());
    }

    #[test]
    fn test_response_example_lookup() {
        let mut endpoint = bare_endpoint("GET", "/orgs");
        endpoint.responses = vec![
            ResponseExample {
                status: "200".to_string(),
                payload: json!({"message": "Success"}),
            },
            ResponseExample {
                status: "422".to_string(),
                payload: json!({"message": "Search Parameter Missing"}),
            },
        ];

        assert_eq!(
            endpoint.success_example(),
            Some(&json!({"message": "Success"}))
        );
        assert_eq!(endpoint.status_tabs(), vec!["200", "422"]);
        assert!(endpoint.response_example("404").is_none());
    }

    #[test]
    fn test_request_config_set_updates_in_place() {
        let mut config = RequestConfig::default();
        config.set("company_name".to_string(), "Flower".to_string());
        config.set("website".to_string(), "flowersfoods.com".to_string());
        config.set("company_name".to_string(), "Flowers Foods".to_string());

        assert_eq!(config.get("company_name"), Some("Flowers Foods"));
        // entry order preserved, no duplicate rows
        assert_eq!(config.values.len(), 2);
        assert_eq!(config.values[0].0, "company_name");
    }

    #[test]
    fn test_security_scheme_from_key() {
        assert_eq!(SecurityScheme::from_key("apiKey"), SecurityScheme::ApiKey);
        assert_eq!(SecurityScheme::from_key("basicAuth"), SecurityScheme::Basic);
        assert_eq!(
            SecurityScheme::from_key("oauth2"),
            SecurityScheme::Other("oauth2".to_string())
        );
    }

    #[test]
    fn test_transport_error_outcome_has_no_status() {
        let outcome = RequestOutcome::transport_error(
            "Request failed: connection refused".to_string(),
            Duration::from_millis(12),
        );
        assert!(matches!(outcome, RequestOutcome::Failure { .. }));
        assert_eq!(outcome.status(), 0);
    }
}
