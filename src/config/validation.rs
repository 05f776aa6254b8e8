use crate::config::types::{ApiConfig, CatalogConfig, Config, CrawlerConfig, OutputConfig};
use crate::endpoint::Endpoint;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    if let Some(catalog) = &config.catalog {
        validate_catalog(catalog)?;
    }
    Ok(())
}

/// Validates target API configuration
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.max_concurrent_requests == Some(0) {
        return Err(ConfigError::Validation(
            "max-concurrent-requests must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if config.summary_file.trim().is_empty()
        || config.summary_file.contains(['/', '\\'])
        || config.summary_file == "."
        || config.summary_file == ".."
    {
        return Err(ConfigError::Validation(format!(
            "summary-file must be a plain file name, got '{}'",
            config.summary_file
        )));
    }

    Ok(())
}

/// Validates catalog overrides
fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    for root in catalog.roots.iter().flatten() {
        validate_endpoint(root)?;
    }

    if let Some(templates) = &catalog.templates {
        for (resource_type, entries) in templates {
            validate_resource_type(resource_type)?;
            for template in entries {
                validate_endpoint(template)?;
            }
        }
    }

    for (name, value) in &catalog.bindings {
        validate_binding(name, value)?;
    }

    if let Some(prefixes) = &catalog.prefixes {
        for (prefix, resource_type) in prefixes {
            validate_endpoint(prefix)?;
            validate_resource_type(resource_type)?;
        }
    }

    Ok(())
}

fn validate_endpoint(path: &str) -> Result<(), ConfigError> {
    Endpoint::parse(path)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidTemplate(e.to_string()))
}

fn validate_resource_type(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConfigError::Validation(format!(
            "Resource type '{}' must be non-empty and alphanumeric",
            name
        )));
    }
    Ok(())
}

/// Binding names are placeholder identifiers; `id` is reserved for discovered ids
fn validate_binding(name: &str, value: &str) -> Result<(), ConfigError> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ConfigError::Validation(format!(
            "Binding name '{}' must be non-empty and alphanumeric",
            name
        )));
    }

    if name == "id" {
        return Err(ConfigError::Validation(
            "The 'id' placeholder cannot be bound in config".to_string(),
        ));
    }

    if value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '{' | '}'))
    {
        return Err(ConfigError::Validation(format!(
            "Binding '{}' has invalid value '{}'",
            name, value
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_base_url() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));

        config.api.base_url = "ftp://graph.example.com".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));

        config.api.base_url = "http://127.0.0.1:8080/v1.0".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_timeouts() {
        let mut config = Config::default();
        config.crawler.request_timeout_secs = 0;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_summary_file() {
        let mut config = Config::default();
        config.output.summary_file = "../escape.json".to_string();
        assert!(validate(&config).is_err());

        config.output.summary_file = "summary.json".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_catalog_templates() {
        let mut templates = BTreeMap::new();
        templates.insert("user".to_string(), vec!["users/{id}".to_string()]);

        let mut config = Config::default();
        config.catalog = Some(CatalogConfig {
            templates: Some(templates),
            ..Default::default()
        });

        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidTemplate(_))
        ));
    }

    #[test]
    fn test_validate_binding() {
        assert!(validate_binding("period", "D7").is_ok());
        assert!(validate_binding("tagId", "abc").is_ok());

        assert!(validate_binding("", "D7").is_err());
        assert!(validate_binding("id", "x").is_err());
        assert!(validate_binding("period", "").is_err());
        assert!(validate_binding("period", "D 7").is_err());
        assert!(validate_binding("period", "a/b").is_err());
    }

    #[test]
    fn test_validate_resource_type() {
        assert!(validate_resource_type("servicePrincipal").is_ok());
        assert!(validate_resource_type("").is_err());
        assert!(validate_resource_type("../x").is_err());
    }
}
