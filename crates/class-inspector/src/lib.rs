//! Class Inspector
//!
//! Runtime type introspection over registered class descriptors:
//! - **Annotated fields**: names of directly declared fields bearing an annotation
//! - **Declared methods**: own method names plus those of directly implemented interfaces
//! - **Instantiation**: first-match constructor lookup with access suppression
//!
//! # Example
//!
//! ```rust,ignore
//! use class_inspector::{ClassBuilder, ConstructorDefinition, TypeInfo, Value};
//!
//! let villager = ClassBuilder::class("Villager")
//!     .constructor(
//!         ConstructorDefinition::new(|args| Ok(Villager::new(args)))
//!             .param("name", TypeInfo::String)
//!             .param("description", TypeInfo::String)
//!             .private(),
//!     )
//!     .build()?;
//!
//! let instance = class_inspector::create_instance_of(
//!     &villager,
//!     &[Value::from("Nazwa"), Value::from("Opis")],
//! )?;
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Class descriptor builder
pub mod builder;

/// Inspector configuration (TOML)
pub mod config;

/// Constructor handles
pub mod constructor;

/// Error types
pub mod error;

/// Subtype and instance checks
pub mod hierarchy;

/// The inspection operations
pub mod inspector;

/// Type descriptors
pub mod metadata;

/// Reflection permissions
pub mod permissions;

/// Static type binding
pub mod reflect;

/// Name-based class registry
pub mod registry;

/// Runtime values
pub mod value;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::{ClassBuilder, ConstructorDefinition, FieldDefinition, MethodDefinition};
pub use config::InspectorConfig;
pub use constructor::Constructor;
pub use error::{ConfigError, InspectError, InspectResult};
pub use hierarchy::{get_class_hierarchy, is_instance, is_subclass_of};
pub use inspector::{
    create_instance, create_instance_of, get_all_declared_methods, get_annotated_fields,
    ClassInspector,
};
pub use metadata::{
    ClassId, ClassInfo, ClassRef, ConstructorInfo, FieldInfo, MethodInfo, Modifiers,
    ParameterInfo, PrimitiveType, TypeInfo, TypeKind, Visibility,
};
pub use permissions::{PermissionStore, ReflectionPermission};
pub use reflect::Reflect;
pub use registry::ClassRegistry;
pub use value::{Instance, Value};
