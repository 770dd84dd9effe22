//! Runtime values passed to constructors
//!
//! `Value` is a tagged argument; `Instance` is a constructed object paired
//! with its runtime class.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::metadata::{ClassInfo, ClassRef, PrimitiveType};
use crate::reflect::Reflect;

/// A constructed object with its runtime class
#[derive(Clone)]
pub struct Instance {
    class: ClassRef,
    data: Arc<dyn Any + Send + Sync>,
}

impl Instance {
    /// Wrap a reflectable value
    pub fn of<T: Reflect>(value: T) -> Self {
        Self {
            class: T::class(),
            data: Arc::new(value),
        }
    }

    pub(crate) fn from_boxed(class: ClassRef, data: Box<dyn Any + Send + Sync>) -> Self {
        Self {
            class,
            data: Arc::from(data),
        }
    }

    /// Runtime class of this instance
    pub fn class(&self) -> &ClassInfo {
        &self.class
    }

    /// Shared handle to the runtime class
    pub fn class_ref(&self) -> &ClassRef {
        &self.class
    }

    /// Borrow the payload as `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }

    /// Whether two handles point at the same object
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class.name())
            .finish_non_exhaustive()
    }
}

/// Argument value
#[derive(Debug, Clone)]
pub enum Value {
    /// Null reference
    Null,
    /// `boolean`
    Bool(bool),
    /// `int`
    Int(i32),
    /// `long`
    Long(i64),
    /// `double`
    Double(f64),
    /// `char`
    Char(char),
    /// String reference
    Str(String),
    /// Object reference
    Object(Instance),
}

impl Value {
    /// Whether this is `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Primitive kind of this value, if it is one
    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        match self {
            Value::Bool(_) => Some(PrimitiveType::Boolean),
            Value::Int(_) => Some(PrimitiveType::Int),
            Value::Long(_) => Some(PrimitiveType::Long),
            Value::Double(_) => Some(PrimitiveType::Double),
            Value::Char(_) => Some(PrimitiveType::Char),
            _ => None,
        }
    }

    /// Runtime type name, used in diagnostics
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Str(_) => "String",
            Value::Object(instance) => instance.class().name(),
            other => other.primitive_type().map(PrimitiveType::name).unwrap_or("unknown"),
        }
    }

    /// Borrow as `bool`
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow as `i32`
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Borrow as `i64`
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Long(l) => Some(*l),
            _ => None,
        }
    }

    /// Borrow as `f64`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Borrow as `char`
    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Borrow as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow as object
    pub fn as_object(&self) -> Option<&Instance> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i)
    }
}

impl From<i64> for Value {
    fn from(l: i64) -> Self {
        Value::Long(l)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Object(instance)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}
