use crate::state::AppState;
use crate::types::{ApiEndpoint, Credentials, PlaygroundTab, RequestConfig, RequestOutcome};
use crate::utils::log_debug;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use url::Url;

/// Fully resolved outbound request, ready to hand to the HTTP client
#[derive(Debug, Clone)]
pub struct RequestPlan {
    pub method: reqwest::Method,
    pub url: String,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl RequestPlan {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Resolve the parameter mapping for one send.
///
/// A chosen example scenario replaces ad-hoc entry entirely; without
/// scenarios, only query-location parameters with a non-empty entered value
/// are included, in declaration order.
pub fn resolve_parameters(
    endpoint: &ApiEndpoint,
    chosen_scenario: Option<&str>,
    config: &RequestConfig,
) -> Vec<(String, String)> {
    if !endpoint.examples.is_empty() {
        let scenario = chosen_scenario
            .and_then(|name| endpoint.find_scenario(name))
            .or_else(|| endpoint.examples.first());

        return scenario
            .map(|s| {
                s.parameters
                    .iter()
                    .map(|(name, value)| (name.clone(), literal_to_string(value)))
                    .collect()
            })
            .unwrap_or_default();
    }

    endpoint
        .query_params()
        .iter()
        .filter_map(|param| {
            config
                .get(&param.name)
                .filter(|v| !v.is_empty())
                .map(|v| (param.name.clone(), v.to_string()))
        })
        .collect()
}

/// Build the outbound request: method, URL or body placement, auth headers.
///
/// GET sends the resolved parameters as URL query pairs; every other method
/// sends them as a JSON body against the unmodified base + path.
pub fn build_plan(
    endpoint: &ApiEndpoint,
    base_url: &str,
    resolved: &[(String, String)],
    credentials: &Credentials,
) -> Result<RequestPlan, String> {
    let method = match endpoint.method.to_uppercase().as_str() {
        "GET" => reqwest::Method::GET,
        "POST" => reqwest::Method::POST,
        "PUT" => reqwest::Method::PUT,
        "PATCH" => reqwest::Method::PATCH,
        "DELETE" => reqwest::Method::DELETE,
        _ => reqwest::Method::GET,
    };

    let base = format!("{}{}", base_url.trim_end_matches('/'), endpoint.path);
    let mut url = Url::parse(&base).map_err(|e| format!("Invalid URL: {e}"))?;

    let body = if method == reqwest::Method::GET {
        for (name, value) in resolved {
            url.query_pairs_mut().append_pair(name, value);
        }
        None
    } else {
        let mut object = Map::new();
        for (name, value) in resolved {
            object.insert(name.clone(), Value::String(value.clone()));
        }
        Some(Value::Object(object))
    };

    let mut headers = vec![
        ("Content-Type".to_string(), "*/*".to_string()),
        ("Accept".to_string(), "*/*".to_string()),
    ];

    if endpoint.uses_api_key() {
        // the key rides in both the Authorization header and x-api-key
        headers.push((
            "Authorization".to_string(),
            format!("Bearer {}", credentials.api_key),
        ));
        headers.push(("x-api-key".to_string(), credentials.api_key.clone()));
    } else {
        let token = STANDARD.encode(format!(
            "{}:{}",
            credentials.username, credentials.password
        ));
        headers.push(("Authorization".to_string(), format!("Basic {token}")));
    }

    Ok(RequestPlan {
        method,
        url: url.to_string(),
        body,
        headers,
    })
}

/// Map an HTTP response onto the displayable outcome. Non-success statuses
/// surface the body's "message" field when there is one.
pub fn outcome_from_response(
    status: u16,
    headers: HashMap<String, String>,
    body: &str,
    duration: Duration,
) -> RequestOutcome {
    if (200..300).contains(&status) {
        let payload = serde_json::from_str(body)
            .unwrap_or_else(|_| Value::String(body.to_string()));
        RequestOutcome::Success {
            status,
            payload,
            headers,
            duration,
        }
    } else {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {status}"));

        RequestOutcome::Failure {
            status,
            message,
            headers,
            duration,
        }
    }
}

/// Executes one playground request for the selected endpoint in the background.
///
/// The send control is disabled while a request is pending; a selection change
/// while in flight advances the generation counter, and the handler drops the
/// stale response instead of clobbering the new endpoint's display state.
pub fn execute_request_background(state: Arc<RwLock<AppState>>, base_url: String) {
    let (endpoint, resolved, credentials, generation) = {
        let mut s = state.write().unwrap();

        let Some(endpoint) = s.request.selected.clone() else {
            return;
        };
        if s.request.in_flight {
            log_debug("Request already in flight, ignoring send");
            return;
        }

        let resolved = resolve_parameters(
            &endpoint,
            s.request.chosen_scenario.as_deref(),
            &s.request.config,
        );

        s.request.in_flight = true;
        s.request.outcome = None;

        (endpoint, resolved, s.request.credentials.clone(), s.request.generation)
    };

    tokio::spawn(async move {
        log_debug(&format!("Executing: {} {}", endpoint.method, endpoint.path));

        let start = Instant::now();
        let outcome = match build_plan(&endpoint, &base_url, &resolved, &credentials) {
            Ok(plan) => send_plan(plan).await,
            Err(msg) => RequestOutcome::transport_error(msg, start.elapsed()),
        };

        let mut s = state.write().unwrap();
        if !install_outcome(&mut s, generation, outcome) {
            log_debug("Dropping stale response (endpoint re-selected)");
        }
    });
}

/// Install a settled outcome and switch to its status tab. Returns false
/// without touching display state when the selection changed while the
/// request was in flight.
pub fn install_outcome(state: &mut AppState, generation: u64, outcome: RequestOutcome) -> bool {
    if state.request.generation != generation {
        return false;
    }

    state.request.in_flight = false;
    if outcome.status() > 0 {
        state.ui.active_status_tab = outcome.status().to_string();
    }
    state.ui.playground_tab = PlaygroundTab::Response;
    state.ui.response_scroll = 0;
    state.ui.response_selected_line = 0;
    state.request.outcome = Some(outcome);
    true
}

async fn send_plan(plan: RequestPlan) -> RequestOutcome {
    let client = reqwest::Client::new();
    let mut request = client.request(plan.method.clone(), &plan.url);

    for (name, value) in &plan.headers {
        request = request.header(name.as_str(), value.as_str());
    }
    if let Some(body) = &plan.body {
        request = request.body(body.to_string());
    }

    let start = Instant::now();
    match request.send().await {
        Ok(response) => {
            let duration = start.elapsed();
            let status = response.status().as_u16();

            // normalize header keys to lowercase for display
            let headers: HashMap<String, String> = response
                .headers()
                .iter()
                .map(|(key, value)| {
                    (
                        key.as_str().to_lowercase(),
                        value.to_str().unwrap_or("").to_string(),
                    )
                })
                .collect();

            match response.text().await {
                Ok(body) => outcome_from_response(status, headers, &body, duration),
                Err(e) => RequestOutcome::transport_error(
                    format!("Failed to read response body: {e}"),
                    duration,
                ),
            }
        }
        Err(e) => {
            RequestOutcome::transport_error(format!("Request failed: {e}"), start.elapsed())
        }
    }
}

fn literal_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{bare_endpoint, ApiParameter, ExampleScenario, SecurityScheme};
    use serde_json::json;

    fn query_param(name: &str) -> ApiParameter {
        ApiParameter {
            name: name.to_string(),
            location: "query".to_string(),
            description: None,
            required: false,
            schema_type: None,
            example: None,
        }
    }

    fn scenario(name: &str, params: &[(&str, &str)]) -> ExampleScenario {
        let mut map = Map::new();
        for (k, v) in params {
            map.insert(k.to_string(), Value::String(v.to_string()));
        }
        ExampleScenario {
            scenario: name.to_string(),
            parameters: map,
        }
    }

    const BASE: &str = "https://apigateway.example.com/auth";

    #[test]
    fn test_api_key_auth_sets_bearer_and_dedicated_header() {
        let mut endpoint = bare_endpoint("GET", "/extraction/financials");
        endpoint.security = vec![SecurityScheme::ApiKey];

        let creds = Credentials {
            username: "ignored".to_string(),
            password: "ignored".to_string(),
            api_key: "K".to_string(),
        };

        let plan = build_plan(&endpoint, BASE, &[], &creds).unwrap();
        assert_eq!(plan.header("Authorization"), Some("Bearer K"));
        assert_eq!(plan.header("x-api-key"), Some("K"));
    }

    #[test]
    fn test_basic_auth_encodes_username_password() {
        let mut endpoint = bare_endpoint("POST", "/business-identity/org");
        endpoint.security = vec![SecurityScheme::Basic];

        let creds = Credentials {
            username: "u".to_string(),
            password: "p".to_string(),
            api_key: String::new(),
        };

        let plan = build_plan(&endpoint, BASE, &[], &creds).unwrap();
        // base64("u:p") == "dTpw"
        assert_eq!(plan.header("Authorization"), Some("Basic dTpw"));
        assert!(plan.header("x-api-key").is_none());
    }

    #[test]
    fn test_no_declared_security_defaults_to_basic() {
        let endpoint = bare_endpoint("GET", "/anything");
        let creds = Credentials {
            username: "u".to_string(),
            password: "p".to_string(),
            api_key: "K".to_string(),
        };

        let plan = build_plan(&endpoint, BASE, &[], &creds).unwrap();
        assert_eq!(plan.header("Authorization"), Some("Basic dTpw"));
    }

    #[test]
    fn test_get_puts_resolved_params_in_query_string() {
        let endpoint = bare_endpoint("GET", "/business-identity/le");
        let resolved = vec![
            ("company_name".to_string(), "Flower".to_string()),
            ("website".to_string(), "www.flowersfoods.com".to_string()),
        ];

        let plan = build_plan(&endpoint, BASE, &resolved, &Credentials::default()).unwrap();
        assert_eq!(
            plan.url,
            format!("{BASE}/business-identity/le?company_name=Flower&website=www.flowersfoods.com")
        );
        assert!(plan.body.is_none());
    }

    #[test]
    fn test_non_get_puts_resolved_params_in_body() {
        let endpoint = bare_endpoint("POST", "/business-identity/org");
        let resolved = vec![("company_name".to_string(), "Flower".to_string())];

        let plan = build_plan(&endpoint, BASE, &resolved, &Credentials::default()).unwrap();
        // URL stays the unmodified base + path
        assert_eq!(plan.url, format!("{BASE}/business-identity/org"));
        assert_eq!(plan.body, Some(json!({"company_name": "Flower"})));
    }

    #[test]
    fn test_fixed_wildcard_headers() {
        let endpoint = bare_endpoint("GET", "/x");
        let plan = build_plan(&endpoint, BASE, &[], &Credentials::default()).unwrap();
        assert_eq!(plan.header("Content-Type"), Some("*/*"));
        assert_eq!(plan.header("Accept"), Some("*/*"));
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        let endpoint = bare_endpoint("GET", "/orgs");
        let plan = build_plan(
            &endpoint,
            "https://apigateway.example.com/auth/",
            &[],
            &Credentials::default(),
        )
        .unwrap();
        assert_eq!(plan.url, "https://apigateway.example.com/auth/orgs");
    }

    #[test]
    fn test_invalid_base_url_is_an_error() {
        let endpoint = bare_endpoint("GET", "/orgs");
        let err = build_plan(&endpoint, "not a url", &[], &Credentials::default());
        assert!(err.unwrap_err().contains("Invalid URL"));
    }

    #[test]
    fn test_query_values_are_url_encoded() {
        let endpoint = bare_endpoint("GET", "/orgs");
        let resolved = vec![("address".to_string(), "1919 Flowers Cir".to_string())];
        let plan = build_plan(&endpoint, BASE, &resolved, &Credentials::default()).unwrap();
        assert!(plan.url.ends_with("/orgs?address=1919+Flowers+Cir"));
    }

    #[test]
    fn test_resolve_without_scenarios_keeps_non_empty_query_values() {
        let mut endpoint = bare_endpoint("GET", "/business-identity/le");
        endpoint.parameters = vec![
            query_param("company_name"),
            query_param("address"),
            query_param("email"),
        ];

        let mut config = RequestConfig::default();
        config.set("company_name".to_string(), "Flower".to_string());
        config.set("address".to_string(), String::new()); // empty, dropped
        config.set("email".to_string(), "a@b.com".to_string());

        let resolved = resolve_parameters(&endpoint, None, &config);
        assert_eq!(
            resolved,
            vec![
                ("company_name".to_string(), "Flower".to_string()),
                ("email".to_string(), "a@b.com".to_string()),
            ]
        );
    }

    #[test]
    fn test_resolve_ignores_non_query_locations() {
        let mut endpoint = bare_endpoint("GET", "/orgs");
        let mut header_param = query_param("x-trace");
        header_param.location = "header".to_string();
        endpoint.parameters = vec![header_param];

        let mut config = RequestConfig::default();
        config.set("x-trace".to_string(), "abc".to_string());

        assert!(resolve_parameters(&endpoint, None, &config).is_empty());
    }

    #[test]
    fn test_chosen_scenario_replaces_adhoc_entry_entirely() {
        let mut endpoint = bare_endpoint("POST", "/business-identity/org");
        endpoint.parameters = vec![query_param("company_name"), query_param("ticker")];
        endpoint.examples = vec![
            scenario("Name Only", &[("company_name", "Flower")]),
            scenario("Ticker Only", &[("ticker", "MSFT")]),
        ];

        // ad-hoc values exist but must not leak through
        let mut config = RequestConfig::default();
        config.set("company_name".to_string(), "Acme".to_string());

        let resolved = resolve_parameters(&endpoint, Some("Ticker Only"), &config);
        assert_eq!(resolved, vec![("ticker".to_string(), "MSFT".to_string())]);
    }

    #[test]
    fn test_unknown_scenario_falls_back_to_first() {
        let mut endpoint = bare_endpoint("POST", "/orgs");
        endpoint.examples = vec![scenario("Name Only", &[("company_name", "Flower")])];

        let resolved = resolve_parameters(&endpoint, Some("gone"), &RequestConfig::default());
        assert_eq!(
            resolved,
            vec![("company_name".to_string(), "Flower".to_string())]
        );
    }

    #[test]
    fn test_scenario_literals_keep_non_string_values() {
        let mut endpoint = bare_endpoint("GET", "/extraction/locations");
        let mut map = Map::new();
        map.insert("org_id".to_string(), json!(100003273517i64));
        map.insert("page".to_string(), json!(1));
        endpoint.examples = vec![ExampleScenario {
            scenario: "By Id".to_string(),
            parameters: map,
        }];

        let resolved = resolve_parameters(&endpoint, None, &RequestConfig::default());
        assert_eq!(
            resolved,
            vec![
                ("org_id".to_string(), "100003273517".to_string()),
                ("page".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_get_with_scenario_lands_in_query_not_body() {
        let mut endpoint = bare_endpoint("GET", "/business-identity/location");
        endpoint.examples = vec![scenario(
            "Address Only",
            &[("address", "2250 Highmoor Rd")],
        )];

        let resolved = resolve_parameters(&endpoint, None, &RequestConfig::default());
        let plan = build_plan(&endpoint, BASE, &resolved, &Credentials::default()).unwrap();

        assert!(plan.url.contains("address=2250+Highmoor+Rd"));
        assert!(plan.body.is_none());
    }

    #[test]
    fn test_failure_outcome_carries_server_message_and_status() {
        let outcome = outcome_from_response(
            422,
            HashMap::new(),
            r#"{"message": "Search Parameter Missing"}"#,
            Duration::from_millis(40),
        );

        match outcome {
            RequestOutcome::Failure {
                status, message, ..
            } => {
                assert_eq!(status, 422);
                assert_eq!(message, "Search Parameter Missing");
            }
            _ => panic!("expected failure outcome"),
        }
    }

    #[test]
    fn test_failure_without_message_gets_generic_text() {
        let outcome =
            outcome_from_response(500, HashMap::new(), "<html>oops</html>", Duration::ZERO);
        match outcome {
            RequestOutcome::Failure {
                status, message, ..
            } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Request failed with status 500");
            }
            _ => panic!("expected failure outcome"),
        }
    }

    #[test]
    fn test_success_outcome_parses_json_payload() {
        let outcome = outcome_from_response(
            200,
            HashMap::new(),
            r#"{"results": [{"org_id": 1}]}"#,
            Duration::ZERO,
        );
        match outcome {
            RequestOutcome::Success { status, payload, .. } => {
                assert_eq!(status, 200);
                assert_eq!(payload, json!({"results": [{"org_id": 1}]}));
            }
            _ => panic!("expected success outcome"),
        }
    }

    #[test]
    fn test_stale_response_does_not_touch_display_state() {
        use crate::state::AppState;

        let mut state = AppState::default();
        state.select_endpoint(bare_endpoint("GET", "/business-identity/le"));
        let stale_generation = state.request.generation;

        // re-selecting advances the generation
        state.select_endpoint(bare_endpoint("POST", "/business-identity/org"));

        let outcome = outcome_from_response(200, HashMap::new(), "{}", Duration::ZERO);
        assert!(!install_outcome(&mut state, stale_generation, outcome));
        assert!(state.request.outcome.is_none());
        assert_eq!(state.ui.active_status_tab, "200");
    }

    #[test]
    fn test_fresh_response_installs_and_selects_status_tab() {
        use crate::state::AppState;
        use crate::types::PlaygroundTab;

        let mut state = AppState::default();
        state.select_endpoint(bare_endpoint("POST", "/business-identity/org"));
        state.request.in_flight = true;

        let outcome = outcome_from_response(
            422,
            HashMap::new(),
            r#"{"message": "Search Parameter Missing"}"#,
            Duration::ZERO,
        );
        let generation = state.request.generation;
        assert!(install_outcome(&mut state, generation, outcome));
        assert!(!state.request.in_flight);
        assert_eq!(state.ui.active_status_tab, "422");
        assert_eq!(state.ui.playground_tab, PlaygroundTab::Response);
        assert!(state.request.outcome.is_some());
    }

    #[test]
    fn test_transport_error_keeps_status_tab() {
        use crate::state::AppState;

        let mut state = AppState::default();
        state.select_endpoint(bare_endpoint("GET", "/business-identity/le"));
        state.request.in_flight = true;

        let outcome =
            RequestOutcome::transport_error("Request failed: dns error".to_string(), Duration::ZERO);
        let generation = state.request.generation;
        assert!(install_outcome(&mut state, generation, outcome));
        // no HTTP status, so the tab selection stays where it was
        assert_eq!(state.ui.active_status_tab, "200");
        assert!(matches!(
            state.request.outcome,
            Some(RequestOutcome::Failure { status: 0, .. })
        ));
    }

    #[test]
    fn test_success_with_non_json_body_kept_as_text() {
        let outcome = outcome_from_response(200, HashMap::new(), "pong", Duration::ZERO);
        match outcome {
            RequestOutcome::Success { payload, .. } => {
                assert_eq!(payload, Value::String("pong".to_string()));
            }
            _ => panic!("expected success outcome"),
        }
    }
}
