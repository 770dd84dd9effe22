//! Class Inspector
//!
//! The three inspection operations:
//!
//! | Operation                  | Result                                               |
//! |----------------------------|------------------------------------------------------|
//! | `get_annotated_fields`     | names of directly declared fields with an annotation |
//! | `get_all_declared_methods` | own method names plus direct interfaces' methods     |
//! | `create_instance`          | new object from the first matching constructor       |
//!
//! The free functions use the default policy, which may open constructors
//! of any visibility. [`ClassInspector`] carries a configurable
//! [`PermissionStore`].

use std::any::type_name;

use rustc_hash::FxHashSet;
use tracing::{debug, trace, warn};

use crate::config::InspectorConfig;
use crate::error::{InspectError, InspectResult};
use crate::metadata::{ClassInfo, ClassRef};
use crate::permissions::{PermissionStore, ReflectionPermission};
use crate::reflect::Reflect;
use crate::value::{Instance, Value};

/// Names of fields declared directly on `class` that carry `annotation`
///
/// Superclass fields are not considered. Never fails; no match yields an
/// empty set.
pub fn get_annotated_fields(class: &ClassInfo, annotation: &ClassInfo) -> FxHashSet<String> {
    class
        .declared_fields()
        .iter()
        .filter(|field| field.is_annotation_present(annotation))
        .map(|field| field.name.clone())
        .collect()
}

/// Names of methods declared on `class` and on each interface it directly implements
///
/// Overloads collapse to one name. Superclass methods and methods of
/// super-interfaces are not included.
pub fn get_all_declared_methods(class: &ClassInfo) -> FxHashSet<String> {
    let own = class.declared_methods().iter();
    let from_interfaces = class
        .interfaces()
        .iter()
        .flat_map(|iface| iface.declared_methods().iter());

    own.chain(from_interfaces)
        .map(|method| method.name.clone())
        .collect()
}

/// Instantiate `T` through the first declared constructor accepting `args`
pub fn create_instance<T: Reflect>(args: &[Value]) -> InspectResult<T> {
    ClassInspector::default().create_instance(args)
}

/// Instantiate `class` through the first declared constructor accepting `args`
pub fn create_instance_of(class: &ClassRef, args: &[Value]) -> InspectResult<Instance> {
    ClassInspector::default().create_instance_of(class, args)
}

/// Inspector with a permission policy for access suppression
#[derive(Debug, Clone, Default)]
pub struct ClassInspector {
    permissions: PermissionStore,
}

impl ClassInspector {
    /// Create an inspector with the default (ALL) policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an inspector from configuration
    pub fn with_config(config: InspectorConfig) -> Self {
        Self {
            permissions: config.permissions,
        }
    }

    /// Permission policy in effect
    pub fn permissions(&self) -> &PermissionStore {
        &self.permissions
    }

    /// See [`get_annotated_fields`]
    pub fn get_annotated_fields(
        &self,
        class: &ClassInfo,
        annotation: &ClassInfo,
    ) -> FxHashSet<String> {
        get_annotated_fields(class, annotation)
    }

    /// See [`get_all_declared_methods`]
    pub fn get_all_declared_methods(&self, class: &ClassInfo) -> FxHashSet<String> {
        get_all_declared_methods(class)
    }

    /// Instantiate `T`, downcasting the constructed value
    pub fn create_instance<T: Reflect>(&self, args: &[Value]) -> InspectResult<T> {
        let class = T::class();
        let value = self.construct(&class, args)?;

        value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| InspectError::ClassCast {
                expected: type_name::<T>().to_string(),
                actual: class.name().to_string(),
            })
    }

    /// Instantiate `class`
    pub fn create_instance_of(&self, class: &ClassRef, args: &[Value]) -> InspectResult<Instance> {
        let value = self.construct(class, args)?;
        Ok(Instance::from_boxed(ClassRef::clone(class), value))
    }

    /// First-match scan over declared constructors in declaration order
    fn construct(
        &self,
        class: &ClassInfo,
        args: &[Value],
    ) -> InspectResult<Box<dyn std::any::Any + Send + Sync>> {
        for (index, mut ctor) in class.declared_constructors().enumerate() {
            if !ctor.accepts(args) {
                trace!(class = class.name(), index, "constructor rejected");
                continue;
            }

            debug!(
                class = class.name(),
                index,
                arity = args.len(),
                visibility = %ctor.visibility(),
                "matched constructor"
            );

            if let Err(err) = ctor.set_accessible(true, self.permissions_for(class)) {
                warn!(class = class.name(), %err, "access suppression denied");
                return Err(err);
            }
            return ctor.new_instance(args);
        }

        Err(InspectError::NoMatchingConstructor {
            class: class.name().to_string(),
            arity: args.len(),
        })
    }

    fn permissions_for(&self, class: &ClassInfo) -> ReflectionPermission {
        if !self.permissions.has_any_restrictions() {
            return ReflectionPermission::ALL;
        }
        self.permissions.resolve(class.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{ClassBuilder, ConstructorDefinition, FieldDefinition, MethodDefinition};
    use crate::metadata::TypeInfo;

    #[test]
    fn test_annotated_fields_basic() {
        let inject = ClassBuilder::annotation("Inject").build().unwrap();
        let class = ClassBuilder::class("Service")
            .field(FieldDefinition::new("repo", TypeInfo::Object).annotated(&inject).private())
            .field(FieldDefinition::new("name", TypeInfo::String))
            .build()
            .unwrap();

        let fields = get_annotated_fields(&class, &inject);
        assert_eq!(fields.len(), 1);
        assert!(fields.contains("repo"));
    }

    #[test]
    fn test_declared_methods_basic() {
        let class = ClassBuilder::class("Calc")
            .method(MethodDefinition::new("add").param("a", TypeInfo::int()))
            .method(MethodDefinition::new("add").param("a", TypeInfo::double()))
            .method(MethodDefinition::new("reset"))
            .build()
            .unwrap();

        let methods = get_all_declared_methods(&class);
        assert_eq!(methods.len(), 2);
        assert!(methods.contains("add"));
        assert!(methods.contains("reset"));
    }

    #[test]
    fn test_create_instance_of_no_constructors() {
        let class = ClassBuilder::class("Empty").build().unwrap();
        let err = create_instance_of(&class, &[]).unwrap_err();
        assert!(err.is_no_matching_constructor());
    }

    #[test]
    fn test_create_instance_of_reports_class() {
        let class = ClassBuilder::class("Unit")
            .constructor(ConstructorDefinition::new(|_| Ok(())).private())
            .build()
            .unwrap();

        let instance = create_instance_of(&class, &[]).unwrap();
        assert_eq!(instance.class().id(), class.id());
        assert!(instance.downcast_ref::<()>().is_some());
    }

    #[test]
    fn test_restricted_policy_fast_path() {
        let inspector = ClassInspector::new();
        assert!(!inspector.permissions().has_any_restrictions());

        let class = ClassBuilder::class("Anything").build().unwrap();
        assert_eq!(inspector.permissions_for(&class), ReflectionPermission::ALL);
    }
}
