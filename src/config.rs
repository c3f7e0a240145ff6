use crate::catalog::load::CatalogSource;
use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL requests are sent to; falls back to the catalog's declared server
    pub base_url: Option<String>,

    /// Fetch the catalog from this URL instead of the embedded one
    pub catalog_url: Option<String>,

    /// Read the catalog from this file instead of the embedded one
    pub catalog_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Bearer token attached to application-internal gateway calls
    pub token: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        // Use ~/.config instead of platform-specific directory
        let home_dir = dirs::home_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not find home directory"))?;

        let app_dir = home_dir.join(".config").join("api-console");

        if !app_dir.exists() {
            fs::create_dir_all(&app_dir)?;
        }

        Ok(app_dir.join("config.toml"))
    }

    /// Load config from file, or return default if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;

        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&config_path, toml_string)?;
        Ok(())
    }

    /// Set gateway URLs and save
    pub fn set_gateway(
        &mut self,
        base_url: Option<String>,
        catalog_url: Option<String>,
    ) -> Result<()> {
        self.gateway.base_url = base_url.filter(|u| !u.is_empty());
        self.gateway.catalog_url = catalog_url.filter(|u| !u.is_empty());
        self.save()?;
        Ok(())
    }

    /// Set or clear the session token and save
    pub fn set_token(&mut self, token: Option<String>) -> Result<()> {
        self.session.token = token.filter(|t| !t.is_empty());
        self.save()?;
        Ok(())
    }

    /// Where the catalog comes from: URL and file override the embedded copy
    pub fn catalog_source(&self) -> CatalogSource {
        if let Some(url) = &self.gateway.catalog_url {
            CatalogSource::Url(url.clone())
        } else if let Some(path) = &self.gateway.catalog_path {
            CatalogSource::File(PathBuf::from(path))
        } else {
            CatalogSource::Embedded
        }
    }
}

/// Simple URL validation
pub fn validate_url(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err("URL must start with http:// or https://".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_http_and_https() {
        assert!(validate_url("http://localhost:5000").is_ok());
        assert!(validate_url("https://gw.example.com/auth").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_bad_input() {
        assert!(validate_url("").is_err());
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("example.com").is_err());
    }

    #[test]
    fn test_catalog_source_priority() {
        let mut config = Config::default();
        assert!(matches!(config.catalog_source(), CatalogSource::Embedded));

        config.gateway.catalog_path = Some("/tmp/catalog.json".to_string());
        assert!(matches!(config.catalog_source(), CatalogSource::File(_)));

        // URL wins over file
        config.gateway.catalog_url = Some("https://gw/catalog.json".to_string());
        assert!(matches!(config.catalog_source(), CatalogSource::Url(_)));
    }
}
