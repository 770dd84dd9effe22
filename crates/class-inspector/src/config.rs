//! Inspector configuration
//!
//! Permissions can be configured in TOML:
//!
//! ```toml
//! [reflect.permissions]
//! global = "ALL"  # Default for all classes
//!
//! [reflect.permissions.classes]
//! "app.Secret" = "PUBLIC_ONLY"
//! "plugins.*" = "NON_PRIVATE"
//! "untrusted.**" = "NONE"
//! ```
//!
//! Every key is optional; an empty document yields the `ALL` policy.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::permissions::{PermissionStore, ReflectionPermission};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    reflect: RawReflect,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawReflect {
    permissions: RawPermissions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawPermissions {
    global: Option<String>,
    classes: BTreeMap<String, String>,
}

/// Configuration for a [`ClassInspector`](crate::ClassInspector)
#[derive(Debug, Clone, Default)]
pub struct InspectorConfig {
    /// Permission policy for access suppression
    pub permissions: PermissionStore,
}

impl InspectorConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        let mut permissions = PermissionStore::new();

        if let Some(global) = raw.reflect.permissions.global {
            permissions.set_global(parse_permission("global", &global)?);
        }

        for (pattern, value) in &raw.reflect.permissions.classes {
            permissions.set_class(pattern, parse_permission(pattern, value)?);
        }

        Ok(Self { permissions })
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

fn parse_permission(key: &str, value: &str) -> Result<ReflectionPermission, ConfigError> {
    ReflectionPermission::parse_combined(value).ok_or_else(|| ConfigError::InvalidPermission {
        key: key.to_string(),
        value: value.to_string(),
    })
}
