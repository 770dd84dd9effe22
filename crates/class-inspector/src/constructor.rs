//! Constructor handles
//!
//! A [`Constructor`] is a per-call view of one declared constructor. Its
//! accessibility flag lives on the handle, so forcing a private
//! constructor open never leaks to other callers or threads.

use std::any::Any;

use tracing::debug;

use crate::error::{InspectError, InspectResult};
use crate::hierarchy::is_instance;
use crate::metadata::{ClassInfo, ConstructorInfo, TypeInfo, Visibility};
use crate::permissions::ReflectionPermission;
use crate::value::Value;

/// Handle to a declared constructor
#[derive(Debug, Clone)]
pub struct Constructor<'a> {
    declaring: &'a ClassInfo,
    info: &'a ConstructorInfo,
    accessible: bool,
}

impl<'a> Constructor<'a> {
    fn new(declaring: &'a ClassInfo, info: &'a ConstructorInfo) -> Self {
        Self {
            declaring,
            info,
            accessible: false,
        }
    }

    /// Class declaring this constructor
    pub fn declaring_class(&self) -> &'a ClassInfo {
        self.declaring
    }

    /// Declared visibility
    pub fn visibility(&self) -> Visibility {
        self.info.visibility
    }

    /// Number of declared parameters
    pub fn parameter_count(&self) -> usize {
        self.info.arity()
    }

    /// Declared parameter types in order
    pub fn parameter_types(&self) -> impl Iterator<Item = &'a TypeInfo> + 'a {
        self.info.parameters.iter().map(|p| &p.type_info)
    }

    /// Whether access checks have been suppressed on this handle
    pub fn is_accessible(&self) -> bool {
        self.accessible
    }

    /// Whether `args` match this constructor's arity and parameter types
    pub fn accepts(&self, args: &[Value]) -> bool {
        self.parameter_count() == args.len()
            && self
                .parameter_types()
                .zip(args)
                .all(|(ty, arg)| is_instance(ty, arg))
    }

    /// Set the accessibility flag
    ///
    /// Opening a non-public constructor requires the matching flag in
    /// `permissions`.
    pub fn set_accessible(
        &mut self,
        flag: bool,
        permissions: ReflectionPermission,
    ) -> InspectResult<()> {
        let visibility = self.visibility();
        if flag && !visibility.is_public() && !permissions.allows(visibility) {
            return Err(InspectError::PermissionDenied {
                class: self.declaring.name().to_string(),
                visibility,
            });
        }

        if flag && !visibility.is_public() {
            debug!(
                class = self.declaring.name(),
                %visibility,
                "suppressing access checks on constructor"
            );
        }
        self.accessible = flag;
        Ok(())
    }

    /// Invoke the constructor
    pub fn new_instance(&self, args: &[Value]) -> InspectResult<Box<dyn Any + Send + Sync>> {
        let visibility = self.visibility();
        if !visibility.is_public() && !self.accessible {
            return Err(InspectError::IllegalAccess {
                class: self.declaring.name().to_string(),
                visibility,
            });
        }

        if self.declaring.is_abstract() {
            return Err(InspectError::Instantiation(self.declaring.name().to_string()));
        }

        if args.len() != self.parameter_count() {
            return Err(InspectError::ArgumentCount {
                expected: self.parameter_count(),
                actual: args.len(),
            });
        }

        for (param, arg) in self.info.parameters.iter().zip(args) {
            if !is_instance(&param.type_info, arg) {
                return Err(InspectError::IllegalArgument {
                    index: param.index,
                    expected: param.type_info.name().to_string(),
                });
            }
        }

        (self.info.body)(args).map_err(InspectError::Invocation)
    }
}

impl ClassInfo {
    /// Constructors declared on this type, any visibility, in declaration order
    pub fn declared_constructors(&self) -> impl Iterator<Item = Constructor<'_>> {
        self.constructors
            .iter()
            .map(move |info| Constructor::new(self, info))
    }
}
