//! Class registry
//!
//! Resolves class descriptors by fully qualified name.

use rustc_hash::FxHashMap;

use crate::error::{InspectError, InspectResult};
use crate::metadata::ClassRef;

/// Registry of class descriptors indexed by name
#[derive(Debug, Default)]
pub struct ClassRegistry {
    /// Classes in registration order
    classes: Vec<ClassRef>,
    /// Class name to index mapping
    name_to_index: FxHashMap<String, usize>,
}

impl ClassRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class; a later registration under the same name replaces it
    pub fn register(&mut self, class: ClassRef) {
        let existing = self.name_to_index.get(class.name()).copied();
        match existing {
            Some(index) => self.classes[index] = class,
            None => {
                self.name_to_index
                    .insert(class.name().to_string(), self.classes.len());
                self.classes.push(class);
            }
        }
    }

    /// Get class by name
    pub fn get_class_by_name(&self, name: &str) -> Option<&ClassRef> {
        self.name_to_index
            .get(name)
            .and_then(|&index| self.classes.get(index))
    }

    /// Resolve a class by name, failing if it is not registered
    pub fn for_name(&self, name: &str) -> InspectResult<ClassRef> {
        self.get_class_by_name(name)
            .cloned()
            .ok_or_else(|| InspectError::ClassNotFound(name.to_string()))
    }

    /// Iterate over all classes in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ClassRef> {
        self.classes.iter()
    }

    /// Number of registered classes
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
