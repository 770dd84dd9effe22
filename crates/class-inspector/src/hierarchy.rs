//! Type relationships
//!
//! Subclass and interface assignability, and the per-argument instance
//! check used when matching constructors.

use crate::metadata::{ClassInfo, ClassRef, TypeInfo};
use crate::value::Value;

/// Check if `sub` is `sup` or one of its subtypes
///
/// Follows the superclass chain and every implemented interface,
/// including super-interfaces, at any depth.
pub fn is_subclass_of(sub: &ClassInfo, sup: &ClassInfo) -> bool {
    if sub.id() == sup.id() {
        return true;
    }

    if sub.interfaces().iter().any(|iface| is_subclass_of(iface, sup)) {
        return true;
    }

    match sub.superclass() {
        Some(parent) => is_subclass_of(parent, sup),
        None => false,
    }
}

/// Get the superclass chain for a class
///
/// The first element is the class itself, the last is the root ancestor.
pub fn get_class_hierarchy(class: &ClassRef) -> Vec<ClassRef> {
    let mut hierarchy = vec![ClassRef::clone(class)];
    let mut current = class.superclass();

    while let Some(parent) = current {
        hierarchy.push(ClassRef::clone(parent));
        current = parent.superclass();
    }

    hierarchy
}

/// Check whether `value` may be bound to a slot declared as `type_info`
///
/// Null binds to any reference type and never to a primitive. Primitive
/// slots take a value of exactly that primitive kind; there is no
/// widening or boxing.
pub fn is_instance(type_info: &TypeInfo, value: &Value) -> bool {
    match (type_info, value) {
        (TypeInfo::Primitive(_), Value::Null) => false,
        (_, Value::Null) => true,
        (TypeInfo::Primitive(expected), other) => other.primitive_type() == Some(*expected),
        (TypeInfo::Object, _) => true,
        (TypeInfo::String, Value::Str(_)) => true,
        (TypeInfo::String, _) => false,
        (TypeInfo::Class(class), Value::Object(instance)) => {
            is_subclass_of(instance.class(), class)
        }
        (TypeInfo::Class(_), _) => false,
    }
}
