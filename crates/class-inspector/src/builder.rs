//! Class descriptor builder
//!
//! Definitions are collected with a fluent API and validated once in
//! [`ClassBuilder::build`], which produces an immutable [`ClassRef`].
//!
//! ```rust,ignore
//! let greeter = ClassBuilder::interface("Greeter")
//!     .method(MethodDefinition::new("greet").as_abstract())
//!     .build()?;
//!
//! let villager = ClassBuilder::class("Villager")
//!     .implements(&greeter)
//!     .field(FieldDefinition::new("name", TypeInfo::String).private())
//!     .method(MethodDefinition::new("greet"))
//!     .constructor(
//!         ConstructorDefinition::new(|args| Ok(Villager::new(args[0].as_str().unwrap_or_default())))
//!             .param("name", TypeInfo::String)
//!             .private(),
//!     )
//!     .build()?;
//! ```

use std::any::Any;
use std::sync::Arc;

use crate::error::{InspectError, InspectResult};
use crate::metadata::{
    ClassId, ClassInfo, ClassRef, ConstructorFn, ConstructorInfo, FieldInfo, MethodInfo,
    Modifiers, ParameterInfo, TypeInfo, TypeKind, Visibility,
};
use crate::value::Value;

/// Definition for a field
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    /// Field name
    pub name: String,
    /// Declared type
    pub type_info: TypeInfo,
    /// Modifier flags
    pub modifiers: Modifiers,
    /// Attached annotations
    pub annotations: Vec<ClassRef>,
}

impl FieldDefinition {
    /// Create a public instance field
    pub fn new(name: impl Into<String>, type_info: TypeInfo) -> Self {
        Self {
            name: name.into(),
            type_info,
            modifiers: Modifiers::default(),
            annotations: Vec::new(),
        }
    }

    /// Attach an annotation
    pub fn annotated(mut self, annotation: &ClassRef) -> Self {
        self.annotations.push(Arc::clone(annotation));
        self
    }

    /// Set visibility
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.modifiers.visibility = visibility;
        self
    }

    /// Mark as private
    pub fn private(self) -> Self {
        self.visibility(Visibility::Private)
    }

    /// Mark as static
    pub fn as_static(mut self) -> Self {
        self.modifiers.is_static = true;
        self
    }

    /// Mark as final
    pub fn as_final(mut self) -> Self {
        self.modifiers.is_final = true;
        self
    }

    fn into_info(self) -> FieldInfo {
        FieldInfo {
            name: self.name,
            type_info: self.type_info,
            modifiers: self.modifiers,
            annotations: self.annotations,
        }
    }
}

/// Definition for a method
#[derive(Debug, Clone)]
pub struct MethodDefinition {
    /// Method name
    pub name: String,
    /// Parameters as (name, type)
    pub parameters: Vec<(String, TypeInfo)>,
    /// Return type (`None` for void)
    pub return_type: Option<TypeInfo>,
    /// Modifier flags
    pub modifiers: Modifiers,
}

impl MethodDefinition {
    /// Create a public void method without parameters
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: None,
            modifiers: Modifiers::default(),
        }
    }

    /// Add a parameter
    pub fn param(mut self, name: impl Into<String>, type_info: TypeInfo) -> Self {
        self.parameters.push((name.into(), type_info));
        self
    }

    /// Set return type
    pub fn returns(mut self, type_info: TypeInfo) -> Self {
        self.return_type = Some(type_info);
        self
    }

    /// Set visibility
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.modifiers.visibility = visibility;
        self
    }

    /// Mark as private
    pub fn private(self) -> Self {
        self.visibility(Visibility::Private)
    }

    /// Mark as static
    pub fn as_static(mut self) -> Self {
        self.modifiers.is_static = true;
        self
    }

    /// Mark as abstract
    pub fn as_abstract(mut self) -> Self {
        self.modifiers.is_abstract = true;
        self
    }

    fn into_info(self) -> MethodInfo {
        MethodInfo {
            name: self.name,
            parameters: to_parameter_infos(self.parameters),
            return_type: self.return_type,
            modifiers: self.modifiers,
        }
    }
}

/// Definition for a constructor
pub struct ConstructorDefinition {
    parameters: Vec<(String, TypeInfo)>,
    visibility: Visibility,
    body: Arc<ConstructorFn>,
}

impl ConstructorDefinition {
    /// Create a public constructor from its body
    ///
    /// The body only runs after every argument has passed its parameter
    /// check, so it may rely on the declared types.
    pub fn new<T, F>(body: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&[Value]) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        let body: Arc<ConstructorFn> = Arc::new(move |args: &[Value]| {
            body(args).map(|value| Box::new(value) as Box<dyn Any + Send + Sync>)
        });
        Self {
            parameters: Vec::new(),
            visibility: Visibility::Public,
            body,
        }
    }

    /// Add a parameter
    pub fn param(mut self, name: impl Into<String>, type_info: TypeInfo) -> Self {
        self.parameters.push((name.into(), type_info));
        self
    }

    /// Set visibility
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark as private
    pub fn private(self) -> Self {
        self.visibility(Visibility::Private)
    }

    /// Mark as protected
    pub fn protected(self) -> Self {
        self.visibility(Visibility::Protected)
    }

    /// Mark as package-private
    pub fn package_private(self) -> Self {
        self.visibility(Visibility::Package)
    }

    fn into_info(self) -> ConstructorInfo {
        ConstructorInfo {
            parameters: to_parameter_infos(self.parameters),
            visibility: self.visibility,
            body: self.body,
        }
    }
}

fn to_parameter_infos(parameters: Vec<(String, TypeInfo)>) -> Vec<ParameterInfo> {
    parameters
        .into_iter()
        .enumerate()
        .map(|(index, (name, type_info))| ParameterInfo {
            name,
            type_info,
            index,
        })
        .collect()
}

/// Builder for class, interface and annotation descriptors
pub struct ClassBuilder {
    name: String,
    kind: TypeKind,
    modifiers: Modifiers,
    superclass: Option<ClassRef>,
    interfaces: Vec<ClassRef>,
    fields: Vec<FieldDefinition>,
    methods: Vec<MethodDefinition>,
    constructors: Vec<ConstructorDefinition>,
}

impl ClassBuilder {
    fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            modifiers: Modifiers::default(),
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
        }
    }

    /// Start a class definition
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    /// Start an interface definition
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    /// Start an annotation type definition
    pub fn annotation(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Annotation)
    }

    /// Set the superclass
    pub fn extends(mut self, superclass: &ClassRef) -> Self {
        self.superclass = Some(Arc::clone(superclass));
        self
    }

    /// Add a directly implemented interface
    ///
    /// On an interface this adds a super-interface.
    pub fn implements(mut self, interface: &ClassRef) -> Self {
        self.interfaces.push(Arc::clone(interface));
        self
    }

    /// Mark the class abstract
    pub fn abstract_class(mut self) -> Self {
        self.modifiers.is_abstract = true;
        self
    }

    /// Mark the class final
    pub fn final_class(mut self) -> Self {
        self.modifiers.is_final = true;
        self
    }

    /// Set class visibility
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.modifiers.visibility = visibility;
        self
    }

    /// Declare a field
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare a method
    pub fn method(mut self, method: MethodDefinition) -> Self {
        self.methods.push(method);
        self
    }

    /// Declare a constructor; declaration order is lookup order
    pub fn constructor(mut self, constructor: ConstructorDefinition) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Validate and freeze the definition
    pub fn build(self) -> InspectResult<ClassRef> {
        self.validate()?;

        Ok(Arc::new(ClassInfo {
            id: ClassId::next(),
            name: self.name,
            kind: self.kind,
            modifiers: self.modifiers,
            superclass: self.superclass,
            interfaces: self.interfaces,
            fields: self.fields.into_iter().map(FieldDefinition::into_info).collect(),
            methods: self.methods.into_iter().map(MethodDefinition::into_info).collect(),
            constructors: self
                .constructors
                .into_iter()
                .map(ConstructorDefinition::into_info)
                .collect(),
        }))
    }

    fn validate(&self) -> InspectResult<()> {
        let invalid = |msg: String| Err(InspectError::InvalidDefinition(msg));

        if self.name.is_empty() {
            return invalid("class name must not be empty".to_string());
        }

        if self.kind != TypeKind::Class {
            if self.superclass.is_some() {
                return invalid(format!("{} cannot extend a class", self.name));
            }
            if !self.constructors.is_empty() {
                return invalid(format!("{} cannot declare constructors", self.name));
            }
        }

        if let Some(parent) = &self.superclass {
            if parent.kind() != TypeKind::Class {
                return invalid(format!("{} cannot extend {}", self.name, parent));
            }
            if parent.modifiers().is_final {
                return invalid(format!(
                    "{} cannot inherit from final {}",
                    self.name,
                    parent.name()
                ));
            }
        }

        if let Some(bad) = self.interfaces.iter().find(|i| !i.is_interface()) {
            return invalid(format!("{} cannot implement {}", self.name, bad));
        }

        for field in &self.fields {
            if let Some(bad) = field.annotations.iter().find(|a| !a.is_annotation()) {
                return invalid(format!(
                    "field {}.{} cannot be annotated with {}",
                    self.name, field.name, bad
                ));
            }
        }

        Ok(())
    }
}
