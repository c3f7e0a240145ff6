use crate::catalog::spec::CatalogSpec;
use crate::types::{ApiEndpoint, ResponseExample, SecurityScheme};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A category label plus its endpoints, both in catalog order
#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    pub endpoints: Vec<ApiEndpoint>,
}

/// Flatten the nested catalog into an ordered, category-indexed endpoint list.
///
/// Walks categories, path groups, paths and method keys in document order;
/// every method key except the literal "parameters" marker emits one endpoint.
/// That order decides which endpoint is "first" for default selection, so
/// nothing here sorts.
pub fn project_catalog(spec: &CatalogSpec) -> Vec<Category> {
    let mut categories: Vec<Category> = Vec::new();

    for category_group in &spec.paths {
        for (name, path_groups) in category_group {
            let slot = match categories.iter().position(|c| &c.name == name) {
                Some(i) => i,
                None => {
                    categories.push(Category {
                        name: name.clone(),
                        endpoints: Vec::new(),
                    });
                    categories.len() - 1
                }
            };

            let Some(path_groups) = path_groups.as_array() else {
                continue;
            };

            for path_group in path_groups {
                let Some(path_group) = path_group.as_object() else {
                    continue;
                };

                for (path, methods) in path_group {
                    let Some(methods) = methods.as_object() else {
                        continue;
                    };

                    for (method, details) in methods {
                        // "parameters" at the method level is a shared-parameter
                        // marker, not an operation
                        if method == "parameters" {
                            continue;
                        }
                        let Some(details) = details.as_object() else {
                            continue;
                        };
                        categories[slot]
                            .endpoints
                            .push(endpoint_from_details(path, method, details));
                    }
                }
            }
        }
    }

    categories
}

/// Retain endpoints whose path or summary contains the query
/// (case-insensitive); categories left empty are dropped. Order is preserved
/// from the unfiltered projection.
pub fn filter_categories(categories: &[Category], query: &str) -> Vec<Category> {
    if query.is_empty() {
        return categories.to_vec();
    }

    let needle = query.to_lowercase();
    categories
        .iter()
        .filter_map(|category| {
            let endpoints: Vec<ApiEndpoint> = category
                .endpoints
                .iter()
                .filter(|endpoint| {
                    endpoint.path.to_lowercase().contains(&needle)
                        || endpoint
                            .summary
                            .as_ref()
                            .is_some_and(|s| s.to_lowercase().contains(&needle))
                })
                .cloned()
                .collect();

            if endpoints.is_empty() {
                None
            } else {
                Some(Category {
                    name: category.name.clone(),
                    endpoints,
                })
            }
        })
        .collect()
}

/// Build one endpoint from an operation details object.
///
/// Every field is extracted leniently: an absent or malformed field degrades
/// to "none" rather than failing the whole projection.
fn endpoint_from_details(path: &str, method: &str, details: &Map<String, Value>) -> ApiEndpoint {
    let responses = details
        .get("responses")
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .map(|(status, payload)| ResponseExample {
                    status: status.clone(),
                    payload: payload.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    let security = details
        .get("security")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_object)
                .filter_map(|entry| entry.keys().next())
                .map(|key| SecurityScheme::from_key(key))
                .collect()
        })
        .unwrap_or_default();

    ApiEndpoint {
        method: method.to_ascii_uppercase(),
        path: path.to_string(),
        summary: field(details, "summary"),
        description: field(details, "description"),
        parameters: lenient_array(details, "parameters"),
        request_body: field(details, "requestBody"),
        responses,
        security,
        examples: lenient_array(details, "example"),
    }
}

fn field<T: DeserializeOwned>(details: &Map<String, Value>, key: &str) -> Option<T> {
    details
        .get(key)
        .and_then(|value| serde_json::from_value(value.clone()).ok())
}

/// Deserialize an array item by item, dropping entries that don't fit
/// (hand-authored catalogs contain the odd null or half-filled record)
fn lenient_array<T: DeserializeOwned>(details: &Map<String, Value>, key: &str) -> Vec<T> {
    details
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(raw: &str) -> CatalogSpec {
        serde_json::from_str(raw).unwrap()
    }

    fn sample() -> CatalogSpec {
        catalog(
            r#"{
              "paths": [
                {
                  "Zeta Search": [
                    {
                      "/zeta/org": {
                        "post": {
                          "summary": "Organization Search",
                          "security": [{"basicAuth": []}],
                          "parameters": [
                            {"name": "company_name", "in": "query", "type": "string"},
                            {"name": "address", "in": "query", "type": "string"}
                          ],
                          "responses": {"200": {"message": "Success"}}
                        },
                        "get": {
                          "summary": "Organization Lookup"
                        }
                      }
                    },
                    {
                      "/zeta/le": {
                        "get": {
                          "summary": "Legal Entities",
                          "security": [{"apiKey": []}]
                        }
                      }
                    }
                  ],
                  "Alpha Append": [
                    {
                      "/alpha/org": {
                        "post": {
                          "summary": "Company Search"
                        }
                      }
                    }
                  ]
                }
              ]
            }"#,
        )
    }

    #[test]
    fn test_category_order_is_insertion_order() {
        let categories = project_catalog(&sample());
        // "Zeta" before "Alpha": document order, never sorted
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Zeta Search");
        assert_eq!(categories[1].name, "Alpha Append");
    }

    #[test]
    fn test_endpoint_order_within_category() {
        let categories = project_catalog(&sample());
        let paths: Vec<(&str, &str)> = categories[0]
            .endpoints
            .iter()
            .map(|e| (e.path.as_str(), e.method.as_str()))
            .collect();
        assert_eq!(
            paths,
            vec![
                ("/zeta/org", "POST"),
                ("/zeta/org", "GET"),
                ("/zeta/le", "GET"),
            ]
        );
    }

    #[test]
    fn test_method_names_uppercased() {
        let categories = project_catalog(&sample());
        assert!(categories
            .iter()
            .flat_map(|c| &c.endpoints)
            .all(|e| e.method.chars().all(|c| c.is_ascii_uppercase())));
    }

    #[test]
    fn test_parameters_marker_is_not_an_operation() {
        let spec = catalog(
            r#"{"paths": [{"APIs": [{"/a": {
                "parameters": [{"name": "shared", "in": "query"}],
                "get": {"summary": "A"}
            }}]}]}"#,
        );
        let categories = project_catalog(&spec);
        assert_eq!(categories[0].endpoints.len(), 1);
        assert_eq!(categories[0].endpoints[0].method, "GET");
    }

    #[test]
    fn test_same_category_in_two_groups_merges_in_order() {
        let spec = catalog(
            r#"{"paths": [
                {"APIs": [{"/a": {"get": {}}}]},
                {"APIs": [{"/b": {"get": {}}}], "Other": [{"/c": {"get": {}}}]}
            ]}"#,
        );
        let categories = project_catalog(&spec);
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "APIs");
        let paths: Vec<&str> = categories[0]
            .endpoints
            .iter()
            .map(|e| e.path.as_str())
            .collect();
        assert_eq!(paths, vec!["/a", "/b"]);
    }

    #[test]
    fn test_malformed_layers_never_panic() {
        let spec = catalog(
            r#"{"paths": [
                {"Broken": 42},
                {"AlsoBroken": ["not an object", {"/x": "not methods"}]},
                {"Partial": [{"/ok": {"get": {"parameters": "nope", "responses": []}}}]}
            ]}"#,
        );
        let categories = project_catalog(&spec);
        let partial = categories.iter().find(|c| c.name == "Partial").unwrap();
        assert_eq!(partial.endpoints.len(), 1);
        // malformed optional fields degrade to empty
        assert!(partial.endpoints[0].parameters.is_empty());
        assert!(partial.endpoints[0].responses.is_empty());
    }

    #[test]
    fn test_empty_catalog_projects_to_nothing() {
        assert!(project_catalog(&CatalogSpec::default()).is_empty());
    }

    #[test]
    fn test_operation_fields_carried_through() {
        let categories = project_catalog(&sample());
        let org = &categories[0].endpoints[0];
        assert_eq!(org.summary.as_deref(), Some("Organization Search"));
        assert_eq!(org.parameters.len(), 2);
        assert_eq!(org.parameters[0].name, "company_name");
        assert_eq!(org.security, vec![SecurityScheme::Basic]);
        assert_eq!(org.status_tabs(), vec!["200"]);
    }

    #[test]
    fn test_filter_matches_path_case_insensitive() {
        let categories = project_catalog(&sample());
        let filtered = filter_categories(&categories, "ZETA/LE");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].endpoints.len(), 1);
        assert_eq!(filtered[0].endpoints[0].path, "/zeta/le");
    }

    #[test]
    fn test_filter_matches_summary() {
        let categories = project_catalog(&sample());
        let filtered = filter_categories(&categories, "company search");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Alpha Append");
    }

    #[test]
    fn test_filter_drops_empty_categories_and_keeps_order() {
        let categories = project_catalog(&sample());
        let filtered = filter_categories(&categories, "org");
        // "Alpha Append" survives too (/alpha/org) and stays after "Zeta Search"
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].name, "Zeta Search");
        assert_eq!(filtered[1].name, "Alpha Append");
        let survivors: Vec<&str> = filtered[0]
            .endpoints
            .iter()
            .map(|e| e.path.as_str())
            .collect();
        // relative order unchanged
        assert_eq!(survivors, vec!["/zeta/org", "/zeta/org"]);
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let categories = project_catalog(&sample());
        let filtered = filter_categories(&categories, "");
        assert_eq!(filtered.len(), categories.len());
        assert_eq!(filtered[0].endpoints.len(), categories[0].endpoints.len());
    }

    #[test]
    fn test_filter_no_matches_returns_empty() {
        let categories = project_catalog(&sample());
        assert!(filter_categories(&categories, "does-not-exist").is_empty());
    }
}
