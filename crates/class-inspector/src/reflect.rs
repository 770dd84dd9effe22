//! Binding between Rust types and their class descriptors

use std::any::Any;

use crate::metadata::ClassRef;

/// A Rust type with a registered class descriptor
///
/// Implementations usually keep the descriptor in a
/// `once_cell::sync::Lazy` so every call returns the same `ClassRef`:
///
/// ```rust,ignore
/// static VILLAGER: Lazy<ClassRef> = Lazy::new(|| {
///     ClassBuilder::class("Villager")
///         .constructor(ConstructorDefinition::new(|_| Ok(Villager::default())).private())
///         .build()
///         .expect("valid class definition")
/// });
///
/// impl Reflect for Villager {
///     fn class() -> ClassRef {
///         VILLAGER.clone()
///     }
/// }
/// ```
pub trait Reflect: Any + Send + Sync + Sized {
    /// Descriptor of this type
    fn class() -> ClassRef;
}
