//! Reflection Security & Permissions
//!
//! Controls whether access checks on non-public constructors may be
//! suppressed. Public constructors never need suppression.
//!
//! | Flag               | Bits | Allows opening                 |
//! |--------------------|------|--------------------------------|
//! | `ACCESS_PUBLIC`    | 0x01 | public constructors            |
//! | `ACCESS_PROTECTED` | 0x02 | protected constructors         |
//! | `ACCESS_PACKAGE`   | 0x04 | package-private constructors   |
//! | `ACCESS_PRIVATE`   | 0x08 | private constructors           |
//!
//! Permissions resolve per class name: exact rule, then the longest
//! matching wildcard rule, then the global default.

use std::collections::HashMap;

use crate::metadata::Visibility;

/// Reflection permission flags (bitflags)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReflectionPermission(u8);

impl ReflectionPermission {
    /// Nothing may be opened
    pub const NONE: Self = Self(0x00);
    /// Open public constructors
    pub const ACCESS_PUBLIC: Self = Self(0x01);
    /// Open protected constructors
    pub const ACCESS_PROTECTED: Self = Self(0x02);
    /// Open package-private constructors
    pub const ACCESS_PACKAGE: Self = Self(0x04);
    /// Open private constructors
    pub const ACCESS_PRIVATE: Self = Self(0x08);

    // Common combinations
    /// ACCESS_PUBLIC only
    pub const PUBLIC_ONLY: Self = Self(0x01);
    /// Everything except private
    pub const NON_PRIVATE: Self = Self(0x07);
    /// Everything
    pub const ALL: Self = Self(0x0F);

    /// Create from raw bits
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Get raw bits
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Check if permission contains a flag
    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Union of permissions
    pub const fn union(&self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Difference (remove flags)
    pub const fn difference(&self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Flag required to open a member of the given visibility
    pub const fn required_for(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Public => Self::ACCESS_PUBLIC,
            Visibility::Protected => Self::ACCESS_PROTECTED,
            Visibility::Package => Self::ACCESS_PACKAGE,
            Visibility::Private => Self::ACCESS_PRIVATE,
        }
    }

    /// Whether a member of the given visibility may be opened
    pub const fn allows(&self, visibility: Visibility) -> bool {
        self.contains(Self::required_for(visibility))
    }

    /// Parse a single flag name, hex (`0x0F`) or decimal
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "NONE" => Some(Self::NONE),
            "ACCESS_PUBLIC" | "PUBLIC_ONLY" => Some(Self::ACCESS_PUBLIC),
            "ACCESS_PROTECTED" => Some(Self::ACCESS_PROTECTED),
            "ACCESS_PACKAGE" => Some(Self::ACCESS_PACKAGE),
            "ACCESS_PRIVATE" => Some(Self::ACCESS_PRIVATE),
            "NON_PRIVATE" => Some(Self::NON_PRIVATE),
            "ALL" => Some(Self::ALL),
            _ => {
                if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                    u8::from_str_radix(hex, 16).ok().map(Self::from_bits)
                } else {
                    s.parse::<u8>().ok().map(Self::from_bits)
                }
            }
        }
    }

    /// Parse combined flags from pipe-separated string (e.g., "ACCESS_PUBLIC|ACCESS_PRIVATE")
    pub fn parse_combined(s: &str) -> Option<Self> {
        let mut result = Self::NONE;
        for part in s.split('|') {
            let perm = Self::parse(part.trim())?;
            result = result.union(perm);
        }
        Some(result)
    }
}

impl Default for ReflectionPermission {
    fn default() -> Self {
        Self::ALL
    }
}

impl std::fmt::Display for ReflectionPermission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::NONE => f.write_str("NONE"),
            Self::PUBLIC_ONLY => f.write_str("PUBLIC_ONLY"),
            Self::ACCESS_PROTECTED => f.write_str("ACCESS_PROTECTED"),
            Self::ACCESS_PACKAGE => f.write_str("ACCESS_PACKAGE"),
            Self::ACCESS_PRIVATE => f.write_str("ACCESS_PRIVATE"),
            Self::NON_PRIVATE => f.write_str("NON_PRIVATE"),
            Self::ALL => f.write_str("ALL"),
            _ => write!(f, "0x{:02X}", self.0),
        }
    }
}

/// Class-name permission pattern (supports wildcards)
#[derive(Debug, Clone)]
pub struct ClassPermissionRule {
    /// Pattern (e.g., "app.Secret", "plugins.*", "**")
    pub pattern: String,
    /// Permissions for matching classes
    pub permissions: ReflectionPermission,
}

impl ClassPermissionRule {
    /// Check if a class name matches this pattern
    ///
    /// `pkg.*` matches any class below `pkg`; `*` and `**` match everything.
    pub fn matches(&self, class_name: &str) -> bool {
        if self.pattern == "**" || self.pattern == "*" {
            return true;
        }

        if let Some(prefix) = self.pattern.strip_suffix(".**") {
            class_name.starts_with(prefix)
        } else if let Some(prefix) = self.pattern.strip_suffix('*') {
            class_name.starts_with(prefix) && class_name.len() > prefix.len()
        } else {
            self.pattern == class_name
        }
    }
}

/// Resolved permission policy
#[derive(Debug, Clone, Default)]
pub struct PermissionStore {
    /// Global default permissions
    global_default: ReflectionPermission,

    /// Exact class-name permissions
    class_permissions: HashMap<String, ReflectionPermission>,

    /// Wildcard rules, longest pattern first
    class_rules: Vec<ClassPermissionRule>,
}

impl PermissionStore {
    /// Create a store with default (ALL) permissions
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if anything is restricted (fast path for the default policy)
    pub fn has_any_restrictions(&self) -> bool {
        self.global_default != ReflectionPermission::ALL
            || !self.class_permissions.is_empty()
            || !self.class_rules.is_empty()
    }

    /// Set global default permissions
    pub fn set_global(&mut self, permissions: ReflectionPermission) {
        self.global_default = permissions;
    }

    /// Get global default permissions
    pub fn get_global(&self) -> ReflectionPermission {
        self.global_default
    }

    /// Set permissions for a class name or wildcard pattern
    pub fn set_class(&mut self, pattern: &str, permissions: ReflectionPermission) {
        if pattern.contains('*') {
            self.class_rules.push(ClassPermissionRule {
                pattern: pattern.to_string(),
                permissions,
            });
            self.class_rules
                .sort_by(|a, b| b.pattern.len().cmp(&a.pattern.len()));
        } else {
            self.class_permissions.insert(pattern.to_string(), permissions);
        }
    }

    /// Exact class permissions (no pattern matching)
    pub fn get_class(&self, class_name: &str) -> Option<ReflectionPermission> {
        self.class_permissions.get(class_name).copied()
    }

    /// Resolve permissions for a class
    pub fn resolve(&self, class_name: &str) -> ReflectionPermission {
        if let Some(perms) = self.get_class(class_name) {
            return perms;
        }

        self.class_rules
            .iter()
            .find(|rule| rule.matches(class_name))
            .map(|rule| rule.permissions)
            .unwrap_or(self.global_default)
    }
}
