//! Endpoint template table
//!
//! Maps each resource type to the child endpoint templates generated for an
//! identifier of that type, and carries the root set that seeds every crawl.

use super::catalog;
use super::{Endpoint, ResourceId, ResourceType};
use crate::config::CatalogConfig;
use crate::{ConfigError, ConfigResult, EndpointError, EndpointResult};
use std::collections::BTreeMap;

/// Placeholder substituted with the discovered resource identifier
pub const ID_PLACEHOLDER: &str = "{id}";

/// Immutable crawl catalog: roots, templates, placeholder bindings and
/// resource type prefix overrides
///
/// Tables are plain values injected into a crawl, so independent crawls can
/// run side by side with different tables.
#[derive(Debug, Clone, Default)]
pub struct TemplateTable {
    roots: Vec<Endpoint>,
    templates: BTreeMap<ResourceType, Vec<Endpoint>>,
    bindings: BTreeMap<String, String>,
    /// Longest prefix first
    prefixes: Vec<(String, ResourceType)>,
}

impl TemplateTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in Microsoft Graph directory catalog
    pub fn directory() -> Self {
        let mut table = Self::new();

        table.roots = catalog::ROOTS
            .iter()
            .map(|root| Endpoint::from_trusted(root.to_string()))
            .collect();

        for (resource_type, templates) in catalog::TEMPLATES {
            table.templates.insert(
                ResourceType::new(*resource_type),
                templates
                    .iter()
                    .map(|template| Endpoint::from_trusted(template.to_string()))
                    .collect(),
            );
        }

        for (name, value) in catalog::BINDINGS {
            table.bindings.insert(name.to_string(), value.to_string());
        }

        for (prefix, resource_type) in catalog::PREFIXES {
            table.push_prefix(prefix.to_string(), ResourceType::new(*resource_type));
        }

        table
    }

    /// Builds a table from the `[catalog]` config section
    ///
    /// Starts from the built-in directory catalog; `roots`, `templates` and
    /// `prefixes` replace the built-in value when present, `bindings` are
    /// merged over the built-in bindings.
    pub fn from_catalog(catalog: Option<&CatalogConfig>) -> ConfigResult<Self> {
        let mut table = Self::directory();
        let Some(catalog) = catalog else {
            return Ok(table);
        };

        if let Some(roots) = &catalog.roots {
            table.roots.clear();
            for root in roots {
                table.add_root(root).map_err(invalid_template)?;
            }
        }

        if let Some(templates) = &catalog.templates {
            table.templates.clear();
            for (resource_type, entries) in templates {
                for template in entries {
                    table
                        .add_template(resource_type.as_str(), template)
                        .map_err(invalid_template)?;
                }
            }
        }

        for (name, value) in &catalog.bindings {
            table.bind(name, value);
        }

        if let Some(prefixes) = &catalog.prefixes {
            table.prefixes.clear();
            for (prefix, resource_type) in prefixes {
                table
                    .add_prefix(prefix, resource_type.as_str())
                    .map_err(invalid_template)?;
            }
        }

        Ok(table)
    }

    /// Adds an endpoint to the root set
    pub fn add_root(&mut self, root: &str) -> EndpointResult<()> {
        let endpoint = Endpoint::parse(root)?;
        if !self.roots.contains(&endpoint) {
            self.roots.push(endpoint);
        }
        Ok(())
    }

    /// Appends a child endpoint template for a resource type
    pub fn add_template(
        &mut self,
        resource_type: impl Into<ResourceType>,
        template: &str,
    ) -> EndpointResult<()> {
        let endpoint = Endpoint::parse(template)?;
        self.templates
            .entry(resource_type.into())
            .or_default()
            .push(endpoint);
        Ok(())
    }

    /// Binds a non-id placeholder (e.g. `period`) to a fixed value
    pub fn bind(&mut self, name: &str, value: &str) {
        self.bindings.insert(name.to_string(), value.to_string());
    }

    /// Maps every endpoint under `prefix` to `resource_type`
    pub fn add_prefix(
        &mut self,
        prefix: &str,
        resource_type: impl Into<ResourceType>,
    ) -> EndpointResult<()> {
        let prefix = Endpoint::parse(prefix)?;
        self.push_prefix(
            prefix.as_str().trim_end_matches('/').to_string(),
            resource_type.into(),
        );
        Ok(())
    }

    fn push_prefix(&mut self, prefix: String, resource_type: ResourceType) {
        self.prefixes.retain(|(existing, _)| *existing != prefix);
        self.prefixes.push((prefix, resource_type));
        self.prefixes
            .sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    }

    /// Endpoints fetched unconditionally at crawl start
    pub fn roots(&self) -> &[Endpoint] {
        &self.roots
    }

    /// Templates registered for a resource type (empty if unknown)
    pub fn templates(&self, resource_type: &ResourceType) -> &[Endpoint] {
        self.templates
            .get(resource_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All resource types with at least one template
    pub fn resource_types(&self) -> impl Iterator<Item = &ResourceType> {
        self.templates.keys()
    }

    /// Placeholder bindings applied during expansion
    pub fn bindings(&self) -> &BTreeMap<String, String> {
        &self.bindings
    }

    /// Returns true if the table has templates for this resource type
    pub fn knows(&self, resource_type: &ResourceType) -> bool {
        self.templates.contains_key(resource_type)
    }

    /// Derives the resource type of an endpoint
    ///
    /// A registered prefix override wins; otherwise the first path segment is
    /// singularized. Returns `None` for an empty path.
    pub fn resource_type_of(&self, endpoint: &Endpoint) -> Option<ResourceType> {
        let path = endpoint.as_str();

        for (prefix, resource_type) in &self.prefixes {
            if let Some(rest) = path.strip_prefix(prefix.as_str()) {
                if rest.is_empty() || rest.starts_with('/') || rest.starts_with('?') {
                    return Some(resource_type.clone());
                }
            }
        }

        endpoint.first_segment().and_then(ResourceType::from_segment)
    }

    /// Expands the templates of `resource_type` for one identifier
    ///
    /// Every `{id}` is replaced by `id` and every bound placeholder by its
    /// value. Placeholders without a binding are left in place; callers
    /// decide whether to drop such endpoints. Unknown resource types yield an
    /// empty list.
    ///
    /// # Example
    ///
    /// ```
    /// use graph_crawler::{ResourceId, ResourceType, TemplateTable};
    ///
    /// let table = TemplateTable::directory();
    /// let id = ResourceId::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
    /// let children = table.expand(&ResourceType::new("user"), &id);
    /// assert!(children.iter().all(|e| !e.as_str().contains("{id}")));
    /// ```
    pub fn expand(&self, resource_type: &ResourceType, id: &ResourceId) -> Vec<Endpoint> {
        self.templates(resource_type)
            .iter()
            .map(|template| self.substitute(template, id))
            .collect()
    }

    fn substitute(&self, template: &Endpoint, id: &ResourceId) -> Endpoint {
        let mut path = template.as_str().replace(ID_PLACEHOLDER, id.as_str());
        for (name, value) in &self.bindings {
            path = path.replace(&format!("{{{}}}", name), value);
        }
        Endpoint::from_trusted(path)
    }
}

fn invalid_template(error: EndpointError) -> ConfigError {
    ConfigError::InvalidTemplate(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_id() -> ResourceId {
        ResourceId::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap()
    }

    #[test]
    fn test_directory_catalog_is_well_formed() {
        let table = TemplateTable::directory();
        assert_eq!(table.roots().len(), 29);

        for root in table.roots() {
            assert!(Endpoint::parse(root.as_str()).is_ok(), "bad root {}", root);
        }
        for resource_type in table.resource_types() {
            for template in table.templates(resource_type) {
                assert!(
                    Endpoint::parse(template.as_str()).is_ok(),
                    "bad template {}",
                    template
                );
            }
        }
    }

    #[test]
    fn test_expand_user_replaces_every_id() {
        let table = TemplateTable::directory();
        let id = user_id();
        let children = table.expand(&ResourceType::new("user"), &id);

        assert_eq!(children.len(), 23);
        for child in &children {
            assert!(!child.as_str().contains(ID_PLACEHOLDER));
            assert!(child.as_str().starts_with(&format!("/users/{}/", id)));
        }
        assert!(children.contains(&Endpoint::parse(&format!("/users/{}/manager", id)).unwrap()));
    }

    #[test]
    fn test_expand_unknown_type_is_empty() {
        let table = TemplateTable::directory();
        assert!(table
            .expand(&ResourceType::new("widget"), &user_id())
            .is_empty());
    }

    #[test]
    fn test_expand_applies_bindings() {
        let table = TemplateTable::directory();
        let children = table.expand(&ResourceType::new("report"), &user_id());

        assert_eq!(children.len(), 4);
        assert!(children.iter().all(Endpoint::is_concrete));
        assert!(children
            .iter()
            .any(|e| e.as_str() == "/reports/getEmailActivityUserDetail(period='D7')"));
    }

    #[test]
    fn test_expand_leaves_unbound_placeholders() {
        let table = TemplateTable::directory();
        let children = table.expand(&ResourceType::new("team"), &user_id());

        let unresolved: Vec<_> = children.iter().filter(|e| !e.is_concrete()).collect();
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].placeholders(), vec!["tagId"]);
    }

    #[test]
    fn test_resource_type_of() {
        let table = TemplateTable::directory();
        let of = |path: &str| table.resource_type_of(&Endpoint::parse(path).unwrap());

        assert_eq!(of("/users"), Some(ResourceType::new("user")));
        assert_eq!(of("/servicePrincipals"), Some(ResourceType::new("servicePrincipal")));
        assert_eq!(of("/directoryRoles/x/members"), Some(ResourceType::new("directoryRole")));
        assert_eq!(of("/policies/authorizationPolicy"), Some(ResourceType::new("policy")));
        assert_eq!(of("/security/alerts"), Some(ResourceType::new("securityAlert")));
        assert_eq!(of("/security/alerts/x/comments"), Some(ResourceType::new("securityAlert")));
        assert_eq!(of("/security/alertsV2"), Some(ResourceType::new("security")));
        assert_eq!(of("/me"), Some(ResourceType::new("me")));
        assert_eq!(of("/"), None);
    }

    #[test]
    fn test_custom_table() {
        let mut table = TemplateTable::new();
        table.add_root("/widgets").unwrap();
        table.add_root("/widgets").unwrap();
        table.add_template("widget", "/widgets/{id}/parts").unwrap();

        assert_eq!(table.roots().len(), 1);
        assert!(table.knows(&ResourceType::new("widget")));
        assert!(table.add_template("widget", "widgets").is_err());

        let children = table.expand(&ResourceType::new("widget"), &user_id());
        assert_eq!(
            children,
            vec![Endpoint::parse(&format!("/widgets/{}/parts", user_id())).unwrap()]
        );
    }

    #[test]
    fn test_from_catalog_overrides() {
        let mut templates = BTreeMap::new();
        templates.insert("widget".to_string(), vec!["/widgets/{id}".to_string()]);
        let mut bindings = BTreeMap::new();
        bindings.insert("period".to_string(), "D30".to_string());

        let catalog = CatalogConfig {
            roots: Some(vec!["/widgets".to_string()]),
            templates: Some(templates),
            bindings,
            prefixes: None,
        };

        let table = TemplateTable::from_catalog(Some(&catalog)).unwrap();
        assert_eq!(table.roots(), &[Endpoint::parse("/widgets").unwrap()]);
        assert!(!table.knows(&ResourceType::new("user")));
        assert_eq!(table.bindings().get("period").map(String::as_str), Some("D30"));
    }

    #[test]
    fn test_from_catalog_rejects_bad_root() {
        let catalog = CatalogConfig {
            roots: Some(vec!["users".to_string()]),
            ..Default::default()
        };
        let result = TemplateTable::from_catalog(Some(&catalog));
        assert!(matches!(result, Err(ConfigError::InvalidTemplate(_))));
    }

    #[test]
    fn test_from_catalog_none_is_directory() {
        let table = TemplateTable::from_catalog(None).unwrap();
        assert_eq!(table.roots().len(), TemplateTable::directory().roots().len());
    }
}
