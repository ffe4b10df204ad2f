//! Manager configuration.
//!
//! Options can be built in code or loaded from TOML:
//!
//! ```toml
//! cache_namespace = "admin_ui_configuration"
//! cache_enabled = true
//! override_domain = "admin_42"
//! apply_overrides = true
//! ```
//!
//! Missing keys take their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uiconf_cache::DEFAULT_NAMESPACE;

/// Behaviour switches of a [`Manager`](crate::Manager).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerOptions {
    /// Prefix of every cache key
    #[serde(default = "default_namespace")]
    pub cache_namespace: String,

    /// When false, pools are built on every call and never saved
    #[serde(default = "default_true")]
    pub cache_enabled: bool,

    /// Domain overrides are fetched for; the surface name when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_domain: Option<String>,

    /// Run the override overlay
    #[serde(default = "default_true")]
    pub apply_overrides: bool,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            cache_namespace: default_namespace(),
            cache_enabled: true,
            override_domain: None,
            apply_overrides: true,
        }
    }
}

impl ManagerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.cache_namespace = namespace.into();
        self
    }

    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    pub fn with_override_domain(mut self, domain: impl Into<String>) -> Self {
        self.override_domain = Some(domain.into());
        self
    }

    pub fn with_apply_overrides(mut self, apply: bool) -> Self {
        self.apply_overrides = apply;
        self
    }

    /// The override domain used when preparing `surface`.
    pub fn override_domain_for<'a>(&'a self, surface: &'a str) -> &'a str {
        self.override_domain.as_deref().unwrap_or(surface)
    }

    /// Parse options from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, OptionsError> {
        let options: Self = toml::from_str(content).map_err(|e| OptionsError::Parse {
            location: "<inline>".to_string(),
            reason: e.to_string(),
        })?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let options: Self = toml::from_str(&content).map_err(|e| OptionsError::Parse {
            location: path.display().to_string(),
            reason: e.to_string(),
        })?;
        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> Result<(), OptionsError> {
        if self.cache_namespace.is_empty() {
            return Err(OptionsError::Invalid(
                "cache_namespace must not be empty".into(),
            ));
        }
        if self.override_domain.as_deref() == Some("") {
            return Err(OptionsError::Invalid(
                "override_domain must not be empty when set".into(),
            ));
        }
        Ok(())
    }
}

/// Errors raised while loading [`ManagerOptions`].
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("Failed to read options file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse options at {location}: {reason}")]
    Parse { location: String, reason: String },

    #[error("Invalid options: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ManagerOptions::default();
        assert_eq!(options.cache_namespace, "ui_component_configuration_data");
        assert!(options.cache_enabled);
        assert!(options.apply_overrides);
        assert_eq!(options.override_domain_for("cms_page_listing"), "cms_page_listing");
    }

    #[test]
    fn test_partial_toml() {
        let options = ManagerOptions::from_toml_str(
            r#"
            cache_enabled = false
            override_domain = "admin_42"
            "#,
        )
        .unwrap();
        assert!(!options.cache_enabled);
        assert_eq!(options.cache_namespace, DEFAULT_NAMESPACE);
        assert_eq!(options.override_domain_for("cms_page_listing"), "admin_42");
    }

    #[test]
    fn test_toml_roundtrip() {
        let options = ManagerOptions::new()
            .with_cache_namespace("admin_ui")
            .with_apply_overrides(false);
        let text = toml::to_string(&options).unwrap();
        assert_eq!(ManagerOptions::from_toml_str(&text).unwrap(), options);
    }

    #[test]
    fn test_invalid_options() {
        assert!(matches!(
            ManagerOptions::from_toml_str(r#"cache_namespace = """#),
            Err(OptionsError::Invalid(_))
        ));
        assert!(matches!(
            ManagerOptions::from_toml_str("cache_enabled = \"yes\""),
            Err(OptionsError::Parse { .. })
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uiconf.toml");
        std::fs::write(&path, "apply_overrides = false\n").unwrap();

        let options = ManagerOptions::from_file(&path).unwrap();
        assert!(!options.apply_overrides);

        let missing = ManagerOptions::from_file(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(OptionsError::Read { .. })));
    }
}
