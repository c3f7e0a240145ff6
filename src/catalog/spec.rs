use serde::Deserialize;
use serde_json::{Map, Value};

/// Raw catalog document, an OpenAPI-like shape:
/// categories -> array of path groups -> path -> method -> operation details.
///
/// Only the layers with a fixed shape are typed here; the category/path/method
/// layers stay as ordered JSON maps because their keys are the data. The
/// projector walks them leniently, so a partial document never fails the load.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSpec {
    #[serde(default)]
    pub info: Option<CatalogInfo>,

    #[serde(default)]
    pub servers: Vec<ServerSpec>,

    /// Each entry maps a category label to its path groups
    #[serde(default)]
    pub paths: Vec<Map<String, Value>>,
}

impl CatalogSpec {
    pub fn title(&self) -> &str {
        self.info
            .as_ref()
            .and_then(|i| i.title.as_deref())
            .unwrap_or("API Catalog")
    }

    /// Gateway base URL declared by the catalog, if any
    pub fn server_url(&self) -> Option<&str> {
        self.servers.first().map(|s| s.url.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogInfo {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSpec {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_catalog() {
        let spec: CatalogSpec = serde_json::from_str(r#"{"paths": []}"#).unwrap();
        assert_eq!(spec.title(), "API Catalog");
        assert!(spec.server_url().is_none());
        assert!(spec.paths.is_empty());
    }

    #[test]
    fn test_parse_catalog_without_paths() {
        // a catalog missing "paths" entirely still deserializes
        let spec: CatalogSpec =
            serde_json::from_str(r#"{"info": {"title": "Gateway"}}"#).unwrap();
        assert_eq!(spec.title(), "Gateway");
        assert!(spec.paths.is_empty());
    }

    #[test]
    fn test_server_url_takes_first_entry() {
        let spec: CatalogSpec = serde_json::from_str(
            r#"{"servers": [{"url": "https://gw.example.com/auth"}, {"url": "https://backup"}]}"#,
        )
        .unwrap();
        assert_eq!(spec.server_url(), Some("https://gw.example.com/auth"));
    }
}
