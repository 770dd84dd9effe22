//! Type metadata for reflection
//!
//! Immutable descriptors for classes, interfaces and annotation types.
//! A descriptor lists only what the type declares directly; inherited
//! members are reached by following `superclass` and `interfaces`.
//!
//! Descriptors are produced by [`ClassBuilder`](crate::builder::ClassBuilder)
//! and shared as [`ClassRef`].

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::value::Value;

/// Shared handle to a class descriptor
pub type ClassRef = Arc<ClassInfo>;

/// Constructor body: receives already type-checked arguments
pub type ConstructorFn =
    dyn Fn(&[Value]) -> anyhow::Result<Box<dyn Any + Send + Sync>> + Send + Sync;

static NEXT_CLASS_ID: AtomicUsize = AtomicUsize::new(0);

/// Process-unique class identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(usize);

impl ClassId {
    /// Allocate a fresh id
    pub(crate) fn next() -> Self {
        Self(NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value
    pub fn as_usize(self) -> usize {
        self.0
    }
}

/// Kind of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Concrete or abstract class
    Class,
    /// Interface (declares methods, no constructors)
    Interface,
    /// Annotation type (attachable to fields)
    Annotation,
}

/// Member visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Accessible everywhere
    #[default]
    Public,
    /// Accessible to subclasses
    Protected,
    /// Accessible within the declaring package
    Package,
    /// Accessible only within the declaring class
    Private,
}

impl Visibility {
    /// Whether this is `Public`
    pub fn is_public(self) -> bool {
        self == Visibility::Public
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Package => "package-private",
            Visibility::Private => "private",
        };
        f.write_str(s)
    }
}

/// Modifier flags for classes and members
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Declared visibility
    pub visibility: Visibility,
    /// Static member
    pub is_static: bool,
    /// Final member or class
    pub is_final: bool,
    /// Abstract class or method
    pub is_abstract: bool,
}

/// Primitive value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// `boolean`
    Boolean,
    /// `int` (32-bit)
    Int,
    /// `long` (64-bit)
    Long,
    /// `double`
    Double,
    /// `char`
    Char,
}

impl PrimitiveType {
    /// Source-level name
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Double => "double",
            PrimitiveType::Char => "char",
        }
    }
}

/// Declared type of a field, parameter or return value
#[derive(Debug, Clone)]
pub enum TypeInfo {
    /// Primitive type; never holds null
    Primitive(PrimitiveType),
    /// String reference
    String,
    /// Any reference (root of the hierarchy)
    Object,
    /// Reference to a declared class or interface
    Class(ClassRef),
}

impl TypeInfo {
    /// Shorthand for `Primitive(Int)`
    pub fn int() -> Self {
        TypeInfo::Primitive(PrimitiveType::Int)
    }

    /// Shorthand for `Primitive(Long)`
    pub fn long() -> Self {
        TypeInfo::Primitive(PrimitiveType::Long)
    }

    /// Shorthand for `Primitive(Boolean)`
    pub fn boolean() -> Self {
        TypeInfo::Primitive(PrimitiveType::Boolean)
    }

    /// Shorthand for `Primitive(Double)`
    pub fn double() -> Self {
        TypeInfo::Primitive(PrimitiveType::Double)
    }

    /// Shorthand for `Primitive(Char)`
    pub fn char() -> Self {
        TypeInfo::Primitive(PrimitiveType::Char)
    }

    /// Reference to a declared class
    pub fn class(class: &ClassRef) -> Self {
        TypeInfo::Class(Arc::clone(class))
    }

    /// Whether values of this type can never be null
    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeInfo::Primitive(_))
    }

    /// Type name as it would appear in a signature
    pub fn name(&self) -> &str {
        match self {
            TypeInfo::Primitive(p) => p.name(),
            TypeInfo::String => "String",
            TypeInfo::Object => "Object",
            TypeInfo::Class(class) => class.name(),
        }
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field information for reflection
#[derive(Debug, Clone)]
pub struct FieldInfo {
    /// Field name
    pub name: String,
    /// Declared type
    pub type_info: TypeInfo,
    /// Modifier flags
    pub modifiers: Modifiers,
    /// Annotations attached to the field
    pub annotations: Vec<ClassRef>,
}

impl FieldInfo {
    /// Whether `annotation` is attached to this field
    pub fn is_annotation_present(&self, annotation: &ClassInfo) -> bool {
        self.annotations.iter().any(|a| a.id() == annotation.id())
    }
}

/// Parameter information for reflection
#[derive(Debug, Clone)]
pub struct ParameterInfo {
    /// Parameter name
    pub name: String,
    /// Declared type
    pub type_info: TypeInfo,
    /// Position in the parameter list
    pub index: usize,
}

/// Method information for reflection
#[derive(Debug, Clone)]
pub struct MethodInfo {
    /// Method name
    pub name: String,
    /// Parameters in declaration order
    pub parameters: Vec<ParameterInfo>,
    /// Return type (`None` for void)
    pub return_type: Option<TypeInfo>,
    /// Modifier flags
    pub modifiers: Modifiers,
}

/// Constructor information for reflection
#[derive(Clone)]
pub struct ConstructorInfo {
    /// Parameters in declaration order
    pub parameters: Vec<ParameterInfo>,
    /// Declared visibility
    pub visibility: Visibility,
    pub(crate) body: Arc<ConstructorFn>,
}

impl ConstructorInfo {
    /// Number of declared parameters
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

impl fmt::Debug for ConstructorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorInfo")
            .field("parameters", &self.parameters)
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}

/// Reflection metadata for a single class, interface or annotation type
#[derive(Debug)]
pub struct ClassInfo {
    pub(crate) id: ClassId,
    pub(crate) name: String,
    pub(crate) kind: TypeKind,
    pub(crate) modifiers: Modifiers,
    pub(crate) superclass: Option<ClassRef>,
    pub(crate) interfaces: Vec<ClassRef>,
    pub(crate) fields: Vec<FieldInfo>,
    pub(crate) methods: Vec<MethodInfo>,
    pub(crate) constructors: Vec<ConstructorInfo>,
}

impl ClassInfo {
    /// Unique id of this type
    pub fn id(&self) -> ClassId {
        self.id
    }

    /// Fully qualified name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class, interface or annotation
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Class-level modifiers
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Whether this is an interface
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// Whether this is an annotation type
    pub fn is_annotation(&self) -> bool {
        self.kind == TypeKind::Annotation
    }

    /// Whether instances of this type cannot be created directly
    pub fn is_abstract(&self) -> bool {
        self.kind != TypeKind::Class || self.modifiers.is_abstract
    }

    /// Direct superclass, if any
    pub fn superclass(&self) -> Option<&ClassRef> {
        self.superclass.as_ref()
    }

    /// Interfaces this type directly implements (or extends, for interfaces)
    pub fn interfaces(&self) -> &[ClassRef] {
        &self.interfaces
    }

    /// Fields declared directly on this type
    pub fn declared_fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Methods declared directly on this type
    pub fn declared_methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    /// Constructors declared on this type, in declaration order
    pub fn constructor_infos(&self) -> &[ConstructorInfo] {
        &self.constructors
    }

    /// Look up a declared field by name (first declaration wins)
    pub fn get_declared_field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl PartialEq for ClassInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ClassInfo {}

impl fmt::Display for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Annotation => "@interface",
        };
        write!(f, "{} {}", prefix, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{ClassBuilder, FieldDefinition};

    #[test]
    fn test_type_info_primitive() {
        let info = TypeInfo::int();
        assert!(info.is_primitive());
        assert_eq!(info.name(), "int");
    }

    #[test]
    fn test_type_info_reference() {
        assert!(!TypeInfo::String.is_primitive());
        assert!(!TypeInfo::Object.is_primitive());
        assert_eq!(TypeInfo::String.to_string(), "String");
    }

    #[test]
    fn test_type_info_class() {
        let point = ClassBuilder::class("geo.Point").build().unwrap();
        let info = TypeInfo::class(&point);
        assert!(!info.is_primitive());
        assert_eq!(info.name(), "geo.Point");
    }

    #[test]
    fn test_modifiers_default() {
        let mods = Modifiers::default();
        assert_eq!(mods.visibility, Visibility::Public);
        assert!(!mods.is_static);
        assert!(!mods.is_abstract);
    }

    #[test]
    fn test_class_ids_are_unique() {
        let a = ClassBuilder::class("A").build().unwrap();
        let b = ClassBuilder::class("A").build().unwrap();
        assert_ne!(a.id(), b.id());
        assert_ne!(*a, *b);
        assert_eq!(*a, *a.clone());
    }

    #[test]
    fn test_is_annotation_present_uses_identity() {
        let marker = ClassBuilder::annotation("Marker").build().unwrap();
        let impostor = ClassBuilder::annotation("Marker").build().unwrap();
        let class = ClassBuilder::class("Tagged")
            .field(FieldDefinition::new("x", TypeInfo::int()).annotated(&marker))
            .build()
            .unwrap();

        let field = class.get_declared_field("x").unwrap();
        assert!(field.is_annotation_present(&marker));
        assert!(!field.is_annotation_present(&impostor));
    }

    #[test]
    fn test_is_abstract() {
        let iface = ClassBuilder::interface("Runnable").build().unwrap();
        let shape = ClassBuilder::class("Shape").abstract_class().build().unwrap();
        let circle = ClassBuilder::class("Circle").extends(&shape).build().unwrap();
        assert!(iface.is_abstract());
        assert!(shape.is_abstract());
        assert!(!circle.is_abstract());
        assert_eq!(iface.to_string(), "interface Runnable");
    }
}
